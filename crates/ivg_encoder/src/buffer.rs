//! Variable-length number encodings of the IconVG format
//!
//! Every number is tagged in its low bits with its own length:
//!
//! - `...0` one byte
//! - `..01` two bytes, little endian
//! - `..11` four bytes, little endian
//!
//! Four-byte reals and coordinates are IEEE 754 floats whose two lowest
//! mantissa bits are replaced by the tag.

/// Growable output buffer with IconVG number writers
#[derive(Clone, Debug, Default)]
pub(crate) struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Encode an unsigned integer below 2^30
    pub fn encode_natural(&mut self, u: u32) {
        if u < 1 << 7 {
            self.bytes.push((u << 1) as u8);
            return;
        }
        if u < 1 << 14 {
            let u = (u << 2) | 0x01;
            self.bytes.extend_from_slice(&[u as u8, (u >> 8) as u8]);
            return;
        }
        let u = (u << 2) | 0x03;
        self.bytes.extend_from_slice(&u.to_le_bytes());
    }

    /// Encode a coordinate: integers in [-64, 64) take one byte, multiples
    /// of 1/64 in [-128, 128) take two
    pub fn encode_coordinate(&mut self, f: f32) -> usize {
        let i = f as i32;
        if (-64..64).contains(&i) && i as f32 == f {
            self.bytes.push(((i + 64) as u32 as u8) << 1);
            return 1;
        }
        let scaled = f * 64.0;
        let i = scaled as i32;
        if (-128 * 64..128 * 64).contains(&i) && i as f32 == scaled {
            let u = (((i + 128 * 64) as u32) << 2) | 0x01;
            self.bytes.extend_from_slice(&[u as u8, (u >> 8) as u8]);
            return 2;
        }
        self.encode_4_byte_real(f);
        4
    }

    /// Encode a number in [0, 1): multiples of 1/120 take one byte,
    /// multiples of 1/15120 take two
    pub fn encode_zero_to_one(&mut self, f: f32) -> usize {
        let scaled = f * 15120.0;
        let i = scaled as i32;
        if (0..15120).contains(&i) && i as f32 == scaled {
            if i % 126 == 0 {
                self.bytes.push(((i / 126) as u8) << 1);
                return 1;
            }
            let u = ((i as u32) << 2) | 0x01;
            self.bytes.extend_from_slice(&[u as u8, (u >> 8) as u8]);
            return 2;
        }
        self.encode_4_byte_real(f);
        4
    }

    fn encode_4_byte_real(&mut self, f: f32) {
        let mut u = f.to_bits();

        // Round the 23 fraction bits to a multiple of 4 without carrying
        // into the exponent; the low two bits then hold the length tag.
        let mut fraction = u & 0x007f_ffff;
        if fraction < 0x007f_fffe {
            fraction += 2;
        }
        u = (u & 0xff80_0000) | fraction;

        u |= 0x03;
        self.bytes.extend_from_slice(&u.to_le_bytes());
    }
}

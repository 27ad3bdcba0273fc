//! IconVG colors
//!
//! A color is either a direct RGBA value, a reference into the custom
//! palette (CPAL) or the color registers (CREG), or a blend of two one-byte
//! colors. The encoder picks the shortest of the five color encodings that
//! can represent the value.

/// Alpha-premultiplied RGBA color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0x00, 0x00, 0x00, 0xff);
    pub const TRANSPARENT: Rgba = Rgba::new(0x00, 0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether no color channel exceeds alpha
    pub fn is_premultiplied(&self) -> bool {
        self.r <= self.a && self.g <= self.a && self.b <= self.a
    }
}

/// A value that can be stored in a color register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Direct color
    Rgba(Rgba),
    /// Custom palette entry, index below 64
    Palette(u8),
    /// Color register, index below 64
    CReg(u8),
    /// `(255 - t) * c0 + t * c1`, where `c0` and `c1` are one-byte color codes
    Blend { t: u8, c0: u8, c1: u8 },
}

impl Color {
    /// One-byte code of the fully transparent color
    pub const TRANSPARENT_CODE: u8 = 0x7f;

    pub const fn blend(t: u8, c0: u8, c1: u8) -> Self {
        Color::Blend { t, c0, c1 }
    }

    /// One-byte code referring to custom palette entry `index`
    pub const fn palette_code(index: u8) -> u8 {
        0x80 + index
    }

    pub(crate) fn encode_1(&self) -> Option<u8> {
        match *self {
            Color::Rgba(c) if c.a != 0xff => match (c.r, c.g, c.b, c.a) {
                (0x00, 0x00, 0x00, 0x00) => Some(127),
                (0x80, 0x80, 0x80, 0x80) => Some(126),
                (0xc0, 0xc0, 0xc0, 0xc0) => Some(125),
                _ => None,
            },
            Color::Rgba(c) => {
                let r = five_level(c.r)?;
                let g = five_level(c.g)?;
                let b = five_level(c.b)?;
                Some(25 * r + 5 * g + b)
            }
            Color::Palette(i) if i < 64 => Some(0x80 + i),
            Color::CReg(i) if i < 64 => Some(0xc0 + i),
            _ => None,
        }
    }

    pub(crate) fn encode_2(&self) -> Option<[u8; 2]> {
        let Color::Rgba(c) = *self else {
            return None;
        };
        let r = nibble(c.r)?;
        let g = nibble(c.g)?;
        let b = nibble(c.b)?;
        let a = nibble(c.a)?;
        Some([(r << 4) | g, (b << 4) | a])
    }

    pub(crate) fn encode_3_direct(&self) -> Option<[u8; 3]> {
        match *self {
            Color::Rgba(c) if c.a == 0xff => Some([c.r, c.g, c.b]),
            _ => None,
        }
    }

    pub(crate) fn encode_4(&self) -> Option<[u8; 4]> {
        match *self {
            Color::Rgba(c) => Some([c.r, c.g, c.b, c.a]),
            _ => None,
        }
    }

    pub(crate) fn encode_3_indirect(&self) -> Option<[u8; 3]> {
        match *self {
            Color::Blend { t, c0, c1 } => Some([t, c0, c1]),
            _ => None,
        }
    }
}

fn five_level(channel: u8) -> Option<u8> {
    match channel {
        0x00 => Some(0),
        0x40 => Some(1),
        0x80 => Some(2),
        0xc0 => Some(3),
        0xff => Some(4),
        _ => None,
    }
}

fn nibble(channel: u8) -> Option<u8> {
    (channel % 0x11 == 0).then_some(channel / 0x11)
}

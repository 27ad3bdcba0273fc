//! IconVG binary encoder
//!
//! The encoder is a two-mode state machine. In styling mode it accepts
//! color register writes and `start_path`; once a path is open it accepts
//! drawing operations until `close_path_end_path` returns it to styling
//! mode. Consecutive drawing operations of the same kind share one opcode
//! whose low bits hold the repeat count.

use crate::buffer::Buffer;
use crate::color::Color;
use crate::error::EncodeError;
use crate::geom::Point;
use crate::metadata::{
    Metadata, DEFAULT_PALETTE, DEFAULT_VIEW_BOX, MID_SUGGESTED_PALETTE, MID_VIEW_BOX,
};
use crate::sink::{EncoderSink, Position, Segment};
use crate::MAGIC;

const OP_START_PATH: u8 = 0xc0;
const OP_CLOSE_PATH_END_PATH: u8 = 0xe1;
const OP_CLOSE_PATH_ABS_MOVE_TO: u8 = 0xe2;
const OP_CLOSE_PATH_REL_MOVE_TO: u8 = 0xe3;
const OP_ABS_H_LINE_TO: u8 = 0xe6;
const OP_REL_H_LINE_TO: u8 = 0xe7;
const OP_ABS_V_LINE_TO: u8 = 0xe8;
const OP_REL_V_LINE_TO: u8 = 0xe9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Nothing written yet, not even the magic bytes
    Initial,
    Styling,
    Drawing,
}

/// A run of drawing operations sharing one opcode family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Run {
    /// Opcode for a single repetition
    base: u8,
    /// Most repetitions one opcode can carry
    max_reps: usize,
}

impl Run {
    /// Opcode family of a batchable segment; horizontal and vertical lines
    /// have fixed opcodes and are never batched
    fn of(position: Position, segment: &Segment) -> Option<Self> {
        let (abs, max_reps) = match segment {
            Segment::LineTo(_) => (0x00, 16),
            Segment::SmoothQuadTo(_) => (0x20, 16),
            Segment::QuadTo { .. } => (0x40, 16),
            Segment::SmoothCubeTo { .. } => (0x60, 16),
            Segment::CubeTo { .. } => (0x80, 32),
            Segment::ArcTo { .. } => (0xc0, 16),
            Segment::HLineTo(_) | Segment::VLineTo(_) => return None,
        };
        let base = match position {
            Position::Absolute => abs,
            Position::Relative => abs + max_reps as u8,
        };
        Some(Self { base, max_reps })
    }
}

/// Serializes operations into an IconVG graphic
#[derive(Clone, Debug)]
pub struct Encoder {
    /// Encode coordinates at full precision instead of quantizing them to
    /// 1/64 of a unit
    pub high_resolution_coordinates: bool,
    buf: Buffer,
    mode: Mode,
    run: Option<Run>,
    pending: Vec<Segment>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            high_resolution_coordinates: false,
            buf: Buffer::new(),
            mode: Mode::Initial,
            run: None,
            pending: Vec::new(),
        }
    }

    pub fn with_high_resolution_coordinates(mut self, enabled: bool) -> Self {
        self.high_resolution_coordinates = enabled;
        self
    }

    fn write_metadata(&mut self, metadata: &Metadata) {
        self.buf.extend_from_slice(&MAGIC);

        let view_box = metadata.view_box != DEFAULT_VIEW_BOX;
        let palette = metadata.palette != DEFAULT_PALETTE;
        self.buf
            .encode_natural(u32::from(view_box) + u32::from(palette));

        if view_box {
            let mut chunk = Buffer::new();
            chunk.encode_natural(MID_VIEW_BOX);
            chunk.encode_coordinate(metadata.view_box.min.x);
            chunk.encode_coordinate(metadata.view_box.min.y);
            chunk.encode_coordinate(metadata.view_box.max.x);
            chunk.encode_coordinate(metadata.view_box.max.y);
            self.write_chunk(&chunk);
        }
        if palette {
            let mut chunk = Buffer::new();
            chunk.encode_natural(MID_SUGGESTED_PALETTE);
            chunk.extend_from_slice(&metadata.palette.encode());
            self.write_chunk(&chunk);
        }
    }

    fn write_chunk(&mut self, chunk: &Buffer) {
        self.buf.encode_natural(chunk.len() as u32);
        self.buf.extend_from_slice(chunk.as_slice());
    }

    fn ensure_styling(&mut self) -> Result<(), EncodeError> {
        match self.mode {
            Mode::Initial => {
                self.write_metadata(&Metadata::default());
                self.mode = Mode::Styling;
                Ok(())
            }
            Mode::Styling => Ok(()),
            Mode::Drawing => Err(EncodeError::StylingOpInDrawingMode),
        }
    }

    fn ensure_drawing(&self) -> Result<(), EncodeError> {
        match self.mode {
            Mode::Drawing => Ok(()),
            Mode::Initial | Mode::Styling => Err(EncodeError::DrawingOpInStylingMode),
        }
    }

    fn quantize(&self, coord: f32) -> f32 {
        if !self.high_resolution_coordinates && (-128.0..128.0).contains(&coord) {
            (coord * 64.0 + 0.5).floor() / 64.0
        } else {
            coord
        }
    }

    fn coordinate(&mut self, coord: f32) {
        let coord = self.quantize(coord);
        self.buf.encode_coordinate(coord);
    }

    fn point(&mut self, p: Point) {
        self.coordinate(p.x);
        self.coordinate(p.y);
    }

    fn segment_args(&mut self, segment: &Segment) {
        match *segment {
            Segment::LineTo(end) | Segment::SmoothQuadTo(end) => self.point(end),
            Segment::QuadTo { control, end } => {
                self.point(control);
                self.point(end);
            }
            Segment::SmoothCubeTo { control2, end } => {
                self.point(control2);
                self.point(end);
            }
            Segment::CubeTo {
                control1,
                control2,
                end,
            } => {
                self.point(control1);
                self.point(control2);
                self.point(end);
            }
            Segment::ArcTo {
                radii,
                rotation,
                large_arc,
                sweep,
                end,
            } => {
                self.coordinate(radii.x);
                self.coordinate(radii.y);
                self.buf.encode_zero_to_one(rotation / 360.0);
                self.buf
                    .encode_natural(u32::from(large_arc) | (u32::from(sweep) << 1));
                self.point(end);
            }
            Segment::HLineTo(v) | Segment::VLineTo(v) => self.coordinate(v),
        }
    }

    /// Write out the pending run, split into opcodes of at most
    /// `max_reps` repetitions each
    fn flush(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        let pending = std::mem::take(&mut self.pending);
        for chunk in pending.chunks(run.max_reps) {
            self.buf.push(run.base + (chunk.len() - 1) as u8);
            for segment in chunk {
                self.segment_args(segment);
            }
        }
    }
}

impl EncoderSink for Encoder {
    fn reset(&mut self, metadata: Metadata) {
        *self = Self::new().with_high_resolution_coordinates(self.high_resolution_coordinates);
        self.write_metadata(&metadata);
        self.mode = Mode::Styling;
    }

    fn set_creg(&mut self, adj: u8, incr: bool, color: Color) -> Result<(), EncodeError> {
        if adj > 6 {
            return Err(EncodeError::InvalidSelectorAdjustment(adj));
        }
        let adj = if incr {
            if adj != 0 {
                return Err(EncodeError::InvalidIncrementingAdjustment(adj));
            }
            7
        } else {
            adj
        };
        self.ensure_styling()?;

        if let Color::Rgba(c) = color {
            if !c.is_premultiplied() {
                return Err(EncodeError::InvalidColor);
            }
        }

        if let Some(x) = color.encode_1() {
            self.buf.extend_from_slice(&[0x80 | adj, x]);
        } else if let Some(x) = color.encode_2() {
            self.buf.push(0x88 | adj);
            self.buf.extend_from_slice(&x);
        } else if let Some(x) = color.encode_3_direct() {
            self.buf.push(0x90 | adj);
            self.buf.extend_from_slice(&x);
        } else if let Some(x) = color.encode_4() {
            self.buf.push(0x98 | adj);
            self.buf.extend_from_slice(&x);
        } else if let Some(x) = color.encode_3_indirect() {
            self.buf.push(0xa0 | adj);
            self.buf.extend_from_slice(&x);
        } else {
            return Err(EncodeError::InvalidColor);
        }
        Ok(())
    }

    fn start_path(&mut self, adj: u8, x: f32, y: f32) -> Result<(), EncodeError> {
        if adj > 6 {
            return Err(EncodeError::InvalidSelectorAdjustment(adj));
        }
        self.ensure_styling()?;
        self.buf.push(OP_START_PATH + adj);
        self.coordinate(x);
        self.coordinate(y);
        self.mode = Mode::Drawing;
        Ok(())
    }

    fn close_path_move_to(
        &mut self,
        position: Position,
        x: f32,
        y: f32,
    ) -> Result<(), EncodeError> {
        self.ensure_drawing()?;
        self.flush();
        self.buf.push(match position {
            Position::Absolute => OP_CLOSE_PATH_ABS_MOVE_TO,
            Position::Relative => OP_CLOSE_PATH_REL_MOVE_TO,
        });
        self.coordinate(x);
        self.coordinate(y);
        Ok(())
    }

    fn draw(&mut self, position: Position, segment: Segment) -> Result<(), EncodeError> {
        self.ensure_drawing()?;

        let Some(run) = Run::of(position, &segment) else {
            self.flush();
            let op = match (segment, position) {
                (Segment::HLineTo(_), Position::Absolute) => OP_ABS_H_LINE_TO,
                (Segment::HLineTo(_), Position::Relative) => OP_REL_H_LINE_TO,
                (_, Position::Absolute) => OP_ABS_V_LINE_TO,
                (_, Position::Relative) => OP_REL_V_LINE_TO,
            };
            self.buf.push(op);
            self.segment_args(&segment);
            return Ok(());
        };

        if self.run != Some(run) {
            self.flush();
            self.run = Some(run);
        }
        self.pending.push(segment);
        Ok(())
    }

    fn close_path_end_path(&mut self) -> Result<(), EncodeError> {
        self.ensure_drawing()?;
        self.flush();
        self.buf.push(OP_CLOSE_PATH_END_PATH);
        self.mode = Mode::Styling;
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, EncodeError> {
        if self.mode == Mode::Initial {
            self.ensure_styling()?;
        }
        self.flush();
        Ok(self.buf.as_slice().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::geom::{Rectangle, Vec2};

    const HEADER_48: [u8; 11] = [
        0x89, 0x49, 0x56, 0x47, // magic
        0x02, // one metadata chunk
        0x0a, 0x00, // chunk length 5, view box
        0x50, 0x50, 0xb0, 0xb0, // -24, -24, +24, +24
    ];

    fn view_box_48() -> Metadata {
        Metadata::new(Rectangle::new(
            Point::new(-24.0, -24.0),
            Point::new(24.0, 24.0),
        ))
    }

    #[test]
    fn test_empty_graphic_has_default_header() {
        let mut enc = Encoder::new();
        assert_eq!(enc.finish().unwrap(), vec![0x89, 0x49, 0x56, 0x47, 0x00]);
    }

    #[test]
    fn test_view_box_chunk() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        assert_eq!(enc.finish().unwrap(), HEADER_48.to_vec());
    }

    #[test]
    fn test_circle_as_two_arcs() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        enc.start_path(0, -10.0, 0.0).unwrap();
        for dx in [20.0, -20.0] {
            enc.draw(
                Position::Relative,
                Segment::ArcTo {
                    radii: Vec2::new(10.0, 10.0),
                    rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                    end: Point::new(dx, 0.0),
                },
            )
            .unwrap();
        }
        enc.close_path_end_path().unwrap();

        let mut expected = HEADER_48.to_vec();
        expected.extend_from_slice(&[
            0xc0, 0x6c, 0x80, // start path at (-10, 0)
            0xd1, // two relative arcs
            0x94, 0x94, 0x00, 0x04, 0xa8, 0x80, // r=10, rot 0, sweep, (+20, 0)
            0x94, 0x94, 0x00, 0x04, 0x58, 0x80, // r=10, rot 0, sweep, (-20, 0)
            0xe1,
        ]);
        assert_eq!(enc.finish().unwrap(), expected);
    }

    #[test]
    fn test_runs_split_by_kind_and_position() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        enc.start_path(0, 0.0, 0.0).unwrap();
        enc.draw(Position::Absolute, Segment::LineTo(Point::new(1.0, 1.0)))
            .unwrap();
        enc.draw(Position::Absolute, Segment::LineTo(Point::new(2.0, 2.0)))
            .unwrap();
        enc.draw(Position::Relative, Segment::LineTo(Point::new(1.0, 0.0)))
            .unwrap();
        enc.draw(Position::Absolute, Segment::HLineTo(3.0)).unwrap();
        enc.draw(Position::Relative, Segment::VLineTo(-1.0)).unwrap();
        enc.close_path_end_path().unwrap();

        let bytes = enc.finish().unwrap();
        assert_eq!(
            &bytes[HEADER_48.len()..],
            &[
                0xc0, 0x80, 0x80, // start path at (0, 0)
                0x01, 0x82, 0x82, 0x84, 0x84, // L x2
                0x10, 0x82, 0x80, // l x1
                0xe6, 0x86, // H 3
                0xe9, 0x7e, // v -1
                0xe1,
            ]
        );
    }

    #[test]
    fn test_long_runs_are_split() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        enc.start_path(0, 0.0, 0.0).unwrap();
        for _ in 0..17 {
            enc.draw(Position::Relative, Segment::LineTo(Point::new(1.0, 0.0)))
                .unwrap();
        }
        enc.close_path_end_path().unwrap();

        let bytes = enc.finish().unwrap();
        let body = &bytes[HEADER_48.len() + 3..];
        assert_eq!(body[0], 0x1f);
        assert_eq!(body[1 + 16 * 2], 0x10);
        assert_eq!(body.len(), 1 + 32 + 1 + 2 + 1);
    }

    #[test]
    fn test_close_and_move() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        enc.start_path(0, 0.0, 0.0).unwrap();
        enc.close_path_move_to(Position::Absolute, 1.0, 1.0).unwrap();
        enc.close_path_move_to(Position::Relative, -1.0, 0.0)
            .unwrap();
        enc.close_path_end_path().unwrap();

        let bytes = enc.finish().unwrap();
        assert_eq!(
            &bytes[HEADER_48.len()..],
            &[0xc0, 0x80, 0x80, 0xe2, 0x82, 0x82, 0xe3, 0x7e, 0x80, 0xe1]
        );
    }

    #[test]
    fn test_blend_register() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        enc.set_creg(1, false, Color::blend(0x4c, 0x7f, 0x80)).unwrap();
        let bytes = enc.finish().unwrap();
        assert_eq!(&bytes[HEADER_48.len()..], &[0xa1, 0x4c, 0x7f, 0x80]);
    }

    #[test]
    fn test_rejects_bad_adjustments() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        assert_eq!(
            enc.set_creg(7, false, Color::CReg(0)),
            Err(EncodeError::InvalidSelectorAdjustment(7))
        );
        assert_eq!(
            enc.set_creg(1, true, Color::CReg(0)),
            Err(EncodeError::InvalidIncrementingAdjustment(1))
        );
        assert_eq!(
            enc.start_path(7, 0.0, 0.0),
            Err(EncodeError::InvalidSelectorAdjustment(7))
        );
        assert_eq!(
            enc.set_creg(0, false, Color::Rgba(Rgba::new(0xff, 0, 0, 0x10))),
            Err(EncodeError::InvalidColor)
        );
    }

    #[test]
    fn test_mode_discipline() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        assert_eq!(
            enc.close_path_end_path(),
            Err(EncodeError::DrawingOpInStylingMode)
        );
        assert_eq!(
            enc.close_path_move_to(Position::Relative, 1.0, 1.0),
            Err(EncodeError::DrawingOpInStylingMode)
        );

        enc.start_path(0, 0.0, 0.0).unwrap();
        assert_eq!(
            enc.start_path(0, 0.0, 0.0),
            Err(EncodeError::StylingOpInDrawingMode)
        );
        assert_eq!(
            enc.set_creg(0, false, Color::CReg(0)),
            Err(EncodeError::StylingOpInDrawingMode)
        );
    }

    #[test]
    fn test_quantization() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        enc.start_path(0, 0.3, 0.0).unwrap();
        let low = enc.finish().unwrap();
        // 0.3 rounds to 19/64, a two-byte coordinate
        assert_eq!(low.len(), HEADER_48.len() + 1 + 2 + 1);

        let mut enc = Encoder::new().with_high_resolution_coordinates(true);
        enc.reset(view_box_48());
        enc.start_path(0, 0.3, 0.0).unwrap();
        let high = enc.finish().unwrap();
        assert_eq!(high.len(), HEADER_48.len() + 1 + 4 + 1);
    }

    #[test]
    fn test_reset_discards_previous_graphic() {
        let mut enc = Encoder::new();
        enc.reset(view_box_48());
        enc.start_path(0, 0.0, 0.0).unwrap();
        enc.reset(view_box_48());
        assert_eq!(enc.finish().unwrap(), HEADER_48.to_vec());
    }
}

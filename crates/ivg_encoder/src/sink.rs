//! The operation set a converter drives to produce an icon
//!
//! [`EncoderSink`] is implemented by the binary [`Encoder`](crate::Encoder)
//! and by [`RecordingSink`], which keeps the operations as a list of
//! [`SinkCommand`]s so converters can be tested without decoding bytes.

use crate::color::Color;
use crate::error::EncodeError;
use crate::geom::{Point, Vec2};
use crate::metadata::Metadata;

/// Whether segment coordinates are absolute or relative to the current point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Absolute,
    Relative,
}

/// One drawing primitive of an open path
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Straight line
    LineTo(Point),
    /// Quadratic Bézier curve reflecting the previous control point
    SmoothQuadTo(Point),
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Cubic Bézier curve reflecting the previous second control point
    SmoothCubeTo { control2: Point, end: Point },
    /// Cubic Bézier curve
    CubeTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Horizontal line to an x coordinate
    HLineTo(f32),
    /// Vertical line to a y coordinate
    VLineTo(f32),
    /// Elliptical arc; `rotation` is the x-axis rotation in degrees
    ArcTo {
        radii: Vec2,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
}

/// Receiver of styling and drawing operations
///
/// Operations are only valid in the right mode: styling operations
/// (`set_creg`, `start_path`) between paths, drawing operations
/// (`close_path_move_to`, `draw`, `close_path_end_path`) inside a path
/// opened by `start_path`.
pub trait EncoderSink {
    /// Discard everything and begin a new graphic
    fn reset(&mut self, metadata: Metadata);

    /// Set color register `CSEL - adj`, or `CSEL` followed by an increment
    /// when `incr` is set (which requires `adj == 0`)
    fn set_creg(&mut self, adj: u8, incr: bool, color: Color) -> Result<(), EncodeError>;

    /// Open a path filled with color register `CSEL + adj`
    fn start_path(&mut self, adj: u8, x: f32, y: f32) -> Result<(), EncodeError>;

    /// Close the current subpath and begin another one at the given point
    fn close_path_move_to(
        &mut self,
        position: Position,
        x: f32,
        y: f32,
    ) -> Result<(), EncodeError>;

    /// Append a segment to the current subpath
    fn draw(&mut self, position: Position, segment: Segment) -> Result<(), EncodeError>;

    /// Close the current subpath and end the path
    fn close_path_end_path(&mut self) -> Result<(), EncodeError>;

    /// Serialize the graphic
    fn finish(&mut self) -> Result<Vec<u8>, EncodeError>;
}

/// A recorded sink operation
#[derive(Clone, Debug, PartialEq)]
pub enum SinkCommand {
    Reset(Metadata),
    SetCReg { adj: u8, incr: bool, color: Color },
    StartPath { adj: u8, at: Point },
    ClosePathMoveTo(Position, Point),
    Draw(Position, Segment),
    ClosePathEndPath,
}

/// Sink that records operations instead of encoding them
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    commands: Vec<SinkCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[SinkCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<SinkCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl EncoderSink for RecordingSink {
    fn reset(&mut self, metadata: Metadata) {
        self.commands.clear();
        self.commands.push(SinkCommand::Reset(metadata));
    }

    fn set_creg(&mut self, adj: u8, incr: bool, color: Color) -> Result<(), EncodeError> {
        self.commands.push(SinkCommand::SetCReg { adj, incr, color });
        Ok(())
    }

    fn start_path(&mut self, adj: u8, x: f32, y: f32) -> Result<(), EncodeError> {
        self.commands.push(SinkCommand::StartPath {
            adj,
            at: Point::new(x, y),
        });
        Ok(())
    }

    fn close_path_move_to(
        &mut self,
        position: Position,
        x: f32,
        y: f32,
    ) -> Result<(), EncodeError> {
        self.commands
            .push(SinkCommand::ClosePathMoveTo(position, Point::new(x, y)));
        Ok(())
    }

    fn draw(&mut self, position: Position, segment: Segment) -> Result<(), EncodeError> {
        self.commands.push(SinkCommand::Draw(position, segment));
        Ok(())
    }

    fn close_path_end_path(&mut self) -> Result<(), EncodeError> {
        self.commands.push(SinkCommand::ClosePathEndPath);
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, EncodeError> {
        Ok(Vec::new())
    }
}

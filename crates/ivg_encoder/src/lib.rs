//! IconVG encoding for svg2ivg
//!
//! This crate provides the binary side of the converter:
//!
//! - **Encoder**: serializes styling and drawing operations into the IconVG
//!   container (magic, metadata chunks, run-length batched drawing opcodes)
//! - **EncoderSink**: the operation set the converter drives, implemented by
//!   [`Encoder`] and by [`RecordingSink`] for inspection in tests
//!
//! # Example
//!
//! ```rust
//! use ivg_encoder::{Encoder, EncoderSink, Metadata, Point, Position, Segment};
//!
//! let mut enc = Encoder::new();
//! enc.reset(Metadata::default());
//! enc.start_path(0, -8.0, -8.0).unwrap();
//! enc.draw(Position::Absolute, Segment::LineTo(Point::new(8.0, -8.0)))
//!     .unwrap();
//! enc.draw(Position::Absolute, Segment::LineTo(Point::new(0.0, 8.0)))
//!     .unwrap();
//! enc.close_path_end_path().unwrap();
//!
//! let bytes = enc.finish().unwrap();
//! assert_eq!(&bytes[..4], b"\x89IVG");
//! ```

mod buffer;
pub mod color;
pub mod encoder;
mod error;
pub mod geom;
pub mod metadata;
pub mod sink;

pub use color::{Color, Rgba};
pub use encoder::Encoder;
pub use error::EncodeError;
pub use geom::{Point, Rectangle, Vec2};
pub use metadata::{Metadata, Palette, DEFAULT_PALETTE, DEFAULT_VIEW_BOX};
pub use sink::{EncoderSink, Position, RecordingSink, Segment, SinkCommand};

/// The four bytes every IconVG graphic starts with
pub const MAGIC: [u8; 4] = [0x89, 0x49, 0x56, 0x47];

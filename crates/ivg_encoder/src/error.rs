//! Encoder error types

use thiserror::Error;

/// Operations the encoder refuses to serialize
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Color register adjustments are limited to 0..=6
    #[error("invalid selector adjustment {0} (must be at most 6)")]
    InvalidSelectorAdjustment(u8),

    /// An incrementing register write must not carry an adjustment
    #[error("invalid incrementing adjustment {0} (must be 0)")]
    InvalidIncrementingAdjustment(u8),

    /// Styling opcode issued while a path is open
    #[error("styling operation used in drawing mode")]
    StylingOpInDrawingMode,

    /// Drawing opcode issued with no open path
    #[error("drawing operation used in styling mode")]
    DrawingOpInStylingMode,

    /// Color has no IconVG encoding (e.g. not alpha-premultiplied)
    #[error("invalid color")]
    InvalidColor,
}

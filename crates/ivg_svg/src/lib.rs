//! SVG to IconVG conversion
//!
//! This crate reads the `<path>` and `<circle>` elements of an SVG image
//! and re-encodes them as an IconVG graphic in a fixed 48x48 coordinate
//! space. Paths are filled with the first palette color, blended toward
//! transparent by their opacity.
//!
//! # Example
//!
//! ```
//! use ivg_svg::SvgImage;
//!
//! let svg = r#"<svg width="24" height="24"><path d="M2 2h20v20H2z"/></svg>"#;
//! let bytes = SvgImage::from_str(svg)?.to_ivg()?;
//! assert_eq!(bytes[..4], ivg_encoder::MAGIC);
//! # Ok::<(), ivg_svg::SvgError>(())
//! ```

mod convert;
mod document;
mod error;
pub mod geometry;
mod path;
pub mod shape;

pub use convert::{convert, convert_with, ConvertOptions};
pub use document::{Circle, PathElement, SvgImage};
pub use error::SvgError;
pub use geometry::{Normalizer, ViewBox, OUT_SIZE, OUT_VIEW_BOX};

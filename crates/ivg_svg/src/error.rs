//! SVG conversion error types

use std::io;
use std::num::ParseFloatError;

use ivg_encoder::EncodeError;
use thiserror::Error;

/// Errors that can occur when loading or converting an SVG image
///
/// `path` fields hold the index of the record being converted: the
/// position of the `<path>` element, or the path count for the trailing
/// record that carries unclaimed circles.
#[derive(Error, Debug)]
pub enum SvgError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// SVG source is not UTF-8
    #[error("SVG is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing error
    #[error("SVG parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `<svg>`
    #[error("expected an <svg> root element, found <{0}>")]
    MissingRoot(String),

    /// Width or height is missing, unparseable or not positive
    #[error("invalid {attribute} {value:?}: expected a positive number")]
    InvalidDimension {
        attribute: &'static str,
        value: String,
    },

    /// A numeric attribute of a path or circle does not parse
    #[error("invalid {attribute} {value:?} on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// The viewBox does not split into four numbers
    #[error("malformed viewBox {value:?}")]
    MalformedViewBox {
        value: String,
        #[source]
        source: Option<ParseFloatError>,
    },

    /// Command letter outside the supported path grammar
    #[error("path {path}: unknown opcode {opcode:?} at byte {offset}")]
    UnknownOpcode {
        path: usize,
        opcode: char,
        offset: usize,
    },

    /// Missing, unparseable or unexpected number in path data
    #[error("path {path}: malformed number {token:?} at byte {offset}")]
    MalformedNumber {
        path: usize,
        token: String,
        offset: usize,
        #[source]
        source: Option<ParseFloatError>,
    },

    /// The encoder rejected an operation of a record
    #[error("path {path}: {source}")]
    PathEncode {
        path: usize,
        #[source]
        source: EncodeError,
    },

    /// The encoder failed outside any record
    #[error("encoding error: {0}")]
    Encode(#[from] EncodeError),
}

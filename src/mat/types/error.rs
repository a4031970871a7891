//! Custom error types for the mat-reader crate.

use std::io;
use thiserror::Error;

use super::models::{ArrayClass, DataKind};

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum MatError {
    /// An error originating from I/O operations other than a short read.
    #[error("I/O error: {0:?}")]
    Io(io::Error),

    /// The byte-order indicator at offset 126 is neither `MI` nor `IM`.
    #[error("Malformed header: unrecognized byte-order indicator {magic:#06x}")]
    MalformedHeader { magic: u16 },

    /// Fewer bytes were available than a read required.
    ///
    /// Raised for the outer stream and for the inflating sub-stream alike.
    #[error("Unexpected end of data")]
    UnexpectedEndOfData,

    /// The inflating sub-stream reported corrupt deflate data.
    #[error("Decompression failed: {0}")]
    DecompressionError(String),

    /// Decompression was started while a compressed span was already being read.
    #[error("Decompression is already active; compressed spans cannot be nested")]
    DecompressionActive,

    /// A values sub-element uses a data kind that has no numeric decode path.
    #[error("Unsupported element kind: {0:?}")]
    UnsupportedElementKind(DataKind),

    /// The matrix is not a real numeric array (cell, struct, object, char, sparse or complex).
    #[error("Unsupported array: class {class:?}, complex={complex}")]
    UnsupportedArray { class: ArrayClass, complex: bool },

    /// A flat index lies beyond the number of stored values.
    #[error("Index {index} out of range for {len} values")]
    IndexOutOfRange { index: usize, len: usize },

    /// A coordinate lies beyond its axis.
    #[error("Coordinate {coordinate} out of range on axis {axis} of size {size}")]
    CoordinateOutOfRange {
        axis: usize,
        coordinate: usize,
        size: usize,
    },

    /// The number of coordinates does not match the number of axes.
    #[error("Expected {expected} coordinates, got {found}")]
    CoordinateCount { expected: usize, found: usize },

    /// The number of decoded values differs from the product of the dimensions.
    #[error("Dimension mismatch: dimensions describe {expected} values, but found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A sub-element is structurally impossible.
    #[error("Malformed element: {0}")]
    MalformedElement(String),

    /// Header text must be 4 to 115 characters and fit into 116 encoded bytes.
    #[error("Invalid header text length: {len}")]
    InvalidHeaderText { len: usize },

    /// The reader has been closed.
    #[error("Reader used after close")]
    UseAfterClose,
}

impl From<io::Error> for MatError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => MatError::UnexpectedEndOfData,
            _ => MatError::Io(e),
        }
    }
}

/// A convenience `Result` type alias using the crate's `MatError` type.
pub type Result<T> = std::result::Result<T, MatError>;

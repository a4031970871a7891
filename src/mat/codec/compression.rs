//! Decompression gate for `MiCompressed` elements.
//!
//! A compressed element holds a zlib stream. The reader skips the 2-byte zlib
//! header itself and hands the remaining bytes to a raw inflate decoder; the
//! trailing Adler-32 checksum is never reached by the decoder and is ignored.

use std::io::{self, Cursor, Read};

use flate2::read::DeflateDecoder;
use log::trace;

use crate::mat::types::error::MatError;

/// The byte source currently serving reads.
#[derive(Default)]
pub enum Gate {
    /// Reads go straight to the outer stream.
    #[default]
    Direct,
    /// Reads go through an inflate decoder over a buffered compressed span.
    Inflating {
        stream: DeflateDecoder<Cursor<Vec<u8>>>,
        /// Outer stream position just past the compressed span.
        resume_at: u64,
    },
}

impl Gate {
    /// Installs an inflate decoder over `compressed`.
    pub fn inflating(compressed: Vec<u8>, resume_at: u64) -> Self {
        trace!(
            "Opening inflate stream over {} compressed bytes (outer resumes at {})",
            compressed.len(),
            resume_at
        );
        Gate::Inflating {
            stream: DeflateDecoder::new(Cursor::new(compressed)),
            resume_at,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Gate::Inflating { .. })
    }

    /// Outer stream position recorded when the gate was opened.
    pub fn resume_at(&self) -> Option<u64> {
        match self {
            Gate::Direct => None,
            Gate::Inflating { resume_at, .. } => Some(*resume_at),
        }
    }
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::Direct => write!(f, "Direct"),
            Gate::Inflating { resume_at, .. } => {
                write!(f, "Inflating {{ resume_at: {} }}", resume_at)
            }
        }
    }
}

/// Fills `buf` from an inflate stream, mapping failures onto crate errors.
pub fn inflate_exact<R: Read>(stream: &mut R, buf: &mut [u8]) -> Result<(), MatError> {
    stream.read_exact(buf).map_err(inflate_error)
}

/// Discards `count` inflated bytes.
pub fn inflate_skip<R: Read>(stream: &mut R, count: u64) -> Result<(), MatError> {
    let skipped = io::copy(&mut stream.by_ref().take(count), &mut io::sink()).map_err(inflate_error)?;
    if skipped < count {
        return Err(MatError::UnexpectedEndOfData);
    }
    Ok(())
}

fn inflate_error(e: io::Error) -> MatError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => MatError::UnexpectedEndOfData,
        _ => MatError::DecompressionError(format!("Deflate stream error: {}", e)),
    }
}

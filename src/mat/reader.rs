use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, trace};

use super::codec::binary::BinaryRead;
use super::codec::compression::{self, Gate};
use super::format::{header, matrix, tag};
use super::iter::Matrices;
use super::types::error::{MatError, Result};
use super::types::models::*;
use super::utils;

/// Size of the zlib header preceding the deflate data of an `MiCompressed` element.
const ZLIB_HEADER_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Header not read yet.
    Unopened,
    /// Positioned at a top-level tag boundary.
    Ready,
    /// At or past the end of the stream.
    Done,
}

/// The main reader for MAT-files.
///
/// Reads a Level-5 MAT-file sequentially from any `Read + Seek` source. The
/// header is parsed once and fixes the byte order of every later numeric
/// read; compressed elements are inflated on the fly, one element at a time.
///
/// The reader owns `R`. Pass `&mut F` to borrow a source and keep it open
/// after the reader is closed or dropped; pass `F` itself to have it closed
/// along with the reader.
///
/// A single reader must not be shared between threads: every read mutates the
/// active source, the tracked element position and the byte-order state.
#[derive(Debug)]
pub struct MatReader<R> {
    inner: Option<R>,
    gate: Gate,
    encoding: &'static Encoding,
    endianness: Endianness,
    header: Option<MatHeader>,
    state: State,
    next_tag_position: u64,
}

impl MatReader<BufReader<File>> {
    /// Opens a MAT-file from the given path.
    ///
    /// # Arguments
    /// * `path` - File path to the .mat file
    /// * `encoding_label` - Optional text encoding label (e.g. `"utf-8"`, `"windows-1252"`);
    ///   UTF-8 when `None` or unrecognized
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened. The header is read lazily.
    pub fn open(path: impl AsRef<Path>, encoding_label: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening MAT-file: {}", path.display());
        let file = File::open(path)?;
        let encoding = encoding_label.map(utils::parse_encoding).unwrap_or(UTF_8);
        Ok(Self::with_encoding(BufReader::new(file), encoding))
    }
}

impl<R: Read + Seek> MatReader<R> {
    /// Creates a reader decoding text as UTF-8.
    pub fn new(inner: R) -> Self {
        Self::with_encoding(inner, UTF_8)
    }

    /// Creates a reader decoding text with `encoding`.
    pub fn with_encoding(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner: Some(inner),
            gate: Gate::Direct,
            encoding,
            endianness: Endianness::NATIVE,
            header: None,
            state: State::Unopened,
            next_tag_position: header::HEADER_LEN as u64,
        }
    }

    /// The header, if it has been read.
    pub fn header(&self) -> Option<&MatHeader> {
        self.header.as_ref()
    }

    /// Overrides the byte order until the next header is read.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    pub fn is_decompressing(&self) -> bool {
        self.gate.is_active()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Releases the inflate buffer and the source.
    ///
    /// An owned source is dropped (and thereby closed); a borrowed one is left
    /// open. Every later operation fails with [`MatError::UseAfterClose`].
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            debug!("Closing MAT reader");
        }
        self.gate = Gate::Direct;
        self.state = State::Done;
    }

    /// Returns the source, or `None` if the reader was closed.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }

    fn source(&mut self) -> Result<&mut R> {
        self.inner.as_mut().ok_or(MatError::UseAfterClose)
    }

    /// Position in the outer stream.
    ///
    /// While a compressed span is open this is the position just past it.
    pub fn outer_position(&mut self) -> Result<u64> {
        if let Some(position) = self.gate.resume_at() {
            return Ok(position);
        }
        Ok(self.source()?.stream_position()?)
    }

    fn stream_len(&mut self) -> Result<u64> {
        let source = self.source()?;
        let position = source.stream_position()?;
        let end = source.seek(SeekFrom::End(0))?;
        if position != end {
            source.seek(SeekFrom::Start(position))?;
        }
        Ok(end)
    }

    /// Reads the 128-byte header from offset 0.
    ///
    /// Ends any active decompression, caches the header and applies its byte
    /// order to every later read. Iteration restarts at the first element.
    ///
    /// # Errors
    /// - [`MatError::MalformedHeader`] if the endian indicator is not recognized
    /// - [`MatError::UnexpectedEndOfData`] if the stream is shorter than a header
    pub fn read_header(&mut self) -> Result<MatHeader> {
        self.end_decompress()?;
        let source = self.source()?;
        if source.stream_position()? != 0 {
            source.seek(SeekFrom::Start(0))?;
        }

        let parsed = header::parse(self)?;
        self.endianness = parsed.endianness;
        self.next_tag_position = header::HEADER_LEN as u64;
        self.state = State::Ready;
        self.header = Some(parsed.clone());
        Ok(parsed)
    }

    /// Reads one tag from the active source.
    pub fn read_element_tag(&mut self) -> Result<ElementTag> {
        Ok(tag::read(self)?.0)
    }

    /// Reads an array-flags payload (flags word plus reserved word).
    pub fn read_array_flags(&mut self) -> Result<ArrayFlags> {
        matrix::read_array_flags(self)
    }

    /// Reads the flags, dimensions and name sub-elements of a matrix.
    pub fn read_matrix_header(&mut self) -> Result<MatrixHeader> {
        matrix::read_header(self)
    }

    /// Reads `count` compressed bytes from the outer stream and routes every
    /// following read through an inflate decoder over them.
    ///
    /// # Errors
    /// - [`MatError::DecompressionActive`] if a compressed span is already open
    /// - [`MatError::UnexpectedEndOfData`] if fewer than `count` bytes remain
    pub fn begin_decompress(&mut self, count: usize) -> Result<()> {
        self.source()?;
        if self.gate.is_active() {
            return Err(MatError::DecompressionActive);
        }

        let compressed = self.read_bytes(count)?;
        let resume_at = self.source()?.stream_position()?;
        debug!("Begin decompression of {} bytes", count);
        self.gate = Gate::inflating(compressed, resume_at);
        Ok(())
    }

    /// Drops the inflate decoder and restores the outer stream. No-op when inactive.
    pub fn end_decompress(&mut self) -> Result<()> {
        self.source()?;
        if self.gate.is_active() {
            debug!("End decompression");
            self.gate = Gate::Direct;
        }
        Ok(())
    }

    /// Runs `f` with `count` compressed bytes inflated, ending decompression
    /// whether or not `f` succeeds.
    pub fn decompressed<T, F>(&mut self, count: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.begin_decompress(count)?;
        let result = f(self);
        let ended = self.end_decompress();
        let value = result?;
        ended?;
        Ok(value)
    }

    /// Reads the tag of the next top-level element.
    ///
    /// Reads the header first if needed. For `MiCompressed` elements the
    /// compressed span is opened and the tag of the element inside it is
    /// returned. Returns `None` once the end of the stream is reached, and on
    /// every call after that.
    pub fn read_next_tag(&mut self) -> Result<Option<ElementTag>> {
        if self.state == State::Unopened {
            self.read_header()?;
        }
        self.end_decompress()?;
        if self.state == State::Done {
            return Ok(None);
        }

        let end = self.stream_len()?;
        let next = self.next_tag_position;
        let source = self.source()?;
        if source.stream_position()? != next {
            source.seek(SeekFrom::Start(next))?;
        }
        if next >= end {
            debug!("End of stream reached at offset {}", next);
            self.state = State::Done;
            return Ok(None);
        }

        let (outer_tag, format) = tag::read(self)?;
        // A packed tag and its padded payload always fill 8 bytes.
        let span = match format {
            TagFormat::Small => 8,
            TagFormat::Normal => 8 + u64::from(outer_tag.byte_len),
        };
        self.next_tag_position = next + span;
        trace!(
            "Element at offset {}: {:?}, next element at {}",
            next, outer_tag.kind, self.next_tag_position
        );

        if outer_tag.kind != DataKind::Compressed {
            return Ok(Some(outer_tag));
        }

        let byte_len = outer_tag.byte_len as usize;
        if byte_len < ZLIB_HEADER_LEN {
            return Err(MatError::MalformedElement(format!(
                "Compressed element of {} bytes has no room for a zlib header",
                byte_len
            )));
        }
        self.skip(ZLIB_HEADER_LEN)?;
        self.begin_decompress(byte_len - ZLIB_HEADER_LEN)?;
        let (inner_tag, _) = tag::read(self)?;
        debug!(
            "Compressed element ({} bytes) holds {:?} ({} bytes)",
            byte_len, inner_tag.kind, inner_tag.byte_len
        );
        Ok(Some(inner_tag))
    }

    /// Reads the next top-level element.
    ///
    /// Numeric matrices are decoded; any other element is skipped as a whole
    /// and reported as [`NextElement::Skipped`]. [`NextElement::End`] is not
    /// an error and is returned again on every later call.
    pub fn read_next_element(&mut self) -> Result<NextElement> {
        let Some(tag) = self.read_next_tag()? else {
            return Ok(NextElement::End);
        };

        if tag.kind == DataKind::Matrix {
            let element = matrix::read(self, tag)?;
            Ok(NextElement::Matrix(element))
        } else {
            debug!("Skipping {:?} element ({} bytes)", tag.kind, tag.byte_len);
            Ok(NextElement::Skipped(tag))
        }
    }

    /// Returns an iterator over the numeric matrices that follow.
    pub fn matrices(&mut self) -> Matrices<'_, R> {
        Matrices::new(self)
    }
}

impl<R: Read + Seek> BinaryRead for MatReader<R> {
    fn skip(&mut self, count: usize) -> Result<()> {
        match &mut self.gate {
            Gate::Inflating { stream, .. } => compression::inflate_skip(stream, count as u64),
            Gate::Direct => {
                let source = self.inner.as_mut().ok_or(MatError::UseAfterClose)?;
                let position = source.stream_position()?;
                let end = source.seek(SeekFrom::End(0))?;
                let target = position.saturating_add(count as u64);
                // Left at the end of the stream on a short skip.
                if target > end {
                    return Err(MatError::UnexpectedEndOfData);
                }
                source.seek(SeekFrom::Start(target))?;
                Ok(())
            }
        }
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        match &mut self.gate {
            Gate::Inflating { stream, .. } => compression::inflate_exact(stream, buf),
            Gate::Direct => {
                let source = self.inner.as_mut().ok_or(MatError::UseAfterClose)?;
                source.read_exact(buf)?;
                Ok(())
            }
        }
    }

    fn endianness(&self) -> Endianness {
        self.endianness
    }

    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

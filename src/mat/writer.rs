//! Encoding of MAT-files, the inverse of the reader.
//!
//! Produces headers, tags and numeric matrices (plain or zlib-compressed) in
//! the layout the reader consumes.

use std::io::Write;

use encoding_rs::{Encoding, UTF_8};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::{debug, trace};

use super::codec::text;
use super::format::{header, tag};
use super::types::error::{MatError, Result};
use super::types::models::{ArrayClass, ArrayFlags, DataKind, ElementTag, Endianness, MatHeader};

/// Typed values of a numeric matrix, in column-major order.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericData {
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Single(Vec<f32>),
    Double(Vec<f64>),
}

impl NumericData {
    pub fn kind(&self) -> DataKind {
        match self {
            NumericData::Int8(_) => DataKind::Int8,
            NumericData::UInt8(_) => DataKind::UInt8,
            NumericData::Int16(_) => DataKind::Int16,
            NumericData::UInt16(_) => DataKind::UInt16,
            NumericData::Int32(_) => DataKind::Int32,
            NumericData::UInt32(_) => DataKind::UInt32,
            NumericData::Int64(_) => DataKind::Int64,
            NumericData::UInt64(_) => DataKind::UInt64,
            NumericData::Single(_) => DataKind::Single,
            NumericData::Double(_) => DataKind::Double,
        }
    }

    /// Array class matching the stored kind.
    pub fn class(&self) -> ArrayClass {
        match self {
            NumericData::Int8(_) => ArrayClass::Int8,
            NumericData::UInt8(_) => ArrayClass::UInt8,
            NumericData::Int16(_) => ArrayClass::Int16,
            NumericData::UInt16(_) => ArrayClass::UInt16,
            NumericData::Int32(_) => ArrayClass::Int32,
            NumericData::UInt32(_) => ArrayClass::UInt32,
            NumericData::Int64(_) => ArrayClass::Int64,
            NumericData::UInt64(_) => ArrayClass::UInt64,
            NumericData::Single(_) => ArrayClass::Single,
            NumericData::Double(_) => ArrayClass::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericData::Int8(v) => v.len(),
            NumericData::UInt8(v) => v.len(),
            NumericData::Int16(v) => v.len(),
            NumericData::UInt16(v) => v.len(),
            NumericData::Int32(v) => v.len(),
            NumericData::UInt32(v) => v.len(),
            NumericData::Int64(v) => v.len(),
            NumericData::UInt64(v) => v.len(),
            NumericData::Single(v) => v.len(),
            NumericData::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Packs the values in the given byte order.
    pub fn encode(&self, endianness: Endianness) -> Vec<u8> {
        let size = self.kind().size().unwrap_or(1);
        let mut buf = vec![0u8; self.len() * size];
        match self {
            NumericData::Int8(v) => {
                for (dst, &x) in buf.iter_mut().zip(v) {
                    *dst = x as u8;
                }
            }
            NumericData::UInt8(v) => buf.copy_from_slice(v),
            NumericData::Int16(v) => {
                for (dst, &x) in buf.chunks_exact_mut(2).zip(v) {
                    endianness.write_i16(dst, x);
                }
            }
            NumericData::UInt16(v) => {
                for (dst, &x) in buf.chunks_exact_mut(2).zip(v) {
                    endianness.write_u16(dst, x);
                }
            }
            NumericData::Int32(v) => {
                for (dst, &x) in buf.chunks_exact_mut(4).zip(v) {
                    endianness.write_i32(dst, x);
                }
            }
            NumericData::UInt32(v) => {
                for (dst, &x) in buf.chunks_exact_mut(4).zip(v) {
                    endianness.write_u32(dst, x);
                }
            }
            NumericData::Int64(v) => {
                for (dst, &x) in buf.chunks_exact_mut(8).zip(v) {
                    endianness.write_i64(dst, x);
                }
            }
            NumericData::UInt64(v) => {
                for (dst, &x) in buf.chunks_exact_mut(8).zip(v) {
                    endianness.write_u64(dst, x);
                }
            }
            NumericData::Single(v) => {
                for (dst, &x) in buf.chunks_exact_mut(4).zip(v) {
                    endianness.write_f32(dst, x);
                }
            }
            NumericData::Double(v) => {
                for (dst, &x) in buf.chunks_exact_mut(8).zip(v) {
                    endianness.write_f64(dst, x);
                }
            }
        }
        buf
    }
}

/// Writes MAT-file structures to any `Write` sink.
pub struct MatWriter<W> {
    inner: W,
    endianness: Endianness,
    encoding: &'static Encoding,
}

impl<W: Write> MatWriter<W> {
    /// Creates a writer using the native byte order.
    pub fn new(inner: W) -> Self {
        Self::with_endianness(inner, Endianness::NATIVE)
    }

    pub fn with_endianness(inner: W, endianness: Endianness) -> Self {
        Self {
            inner,
            endianness,
            encoding: UTF_8,
        }
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Writes the 128-byte header; the indicator follows this writer's byte order.
    pub fn write_header(&mut self, header: &MatHeader) -> Result<()> {
        let bytes = header::encode(header, self.endianness, self.encoding)?;
        self.inner.write_all(&bytes)?;
        debug!("Wrote header: {:?}", header.text);
        Ok(())
    }

    /// Writes a tag, packed when the payload is 1 to 4 bytes.
    pub fn write_element_tag(&mut self, tag: &ElementTag) -> Result<()> {
        self.inner.write_all(&tag::encode(tag, self.endianness))?;
        Ok(())
    }

    /// Writes the padding that follows the payload of `tag`.
    pub fn write_padding(&mut self, tag: &ElementTag) -> Result<()> {
        let padding = tag::format_for(tag).padding(tag);
        self.inner.write_all(&vec![0u8; padding])?;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.inner.write_all(&[value])?;
        Ok(())
    }

    /// Writes raw bytes without any framing.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    /// Writes a complete element: tag, payload and padding.
    pub fn write_element(&mut self, kind: DataKind, payload: &[u8]) -> Result<()> {
        let bytes = encode_element(kind, payload, self.endianness)?;
        self.inner.write_all(&bytes)?;
        Ok(())
    }

    /// Writes a complete `MiUInt32` element holding `values`.
    pub fn write_u32_element(&mut self, values: &[u32]) -> Result<()> {
        let payload = NumericData::UInt32(values.to_vec()).encode(self.endianness);
        self.write_element(DataKind::UInt32, &payload)
    }

    /// Writes an uncompressed numeric matrix whose class matches `data`.
    ///
    /// Dimensions are written as given and are not checked against `data`.
    pub fn write_matrix(&mut self, name: &str, dimensions: &[usize], data: &NumericData) -> Result<()> {
        self.write_matrix_with_flags(name, dimensions, ArrayFlags::new(data.class()), data)
    }

    /// Writes an uncompressed matrix with explicit array flags.
    pub fn write_matrix_with_flags(
        &mut self,
        name: &str,
        dimensions: &[usize],
        flags: ArrayFlags,
        data: &NumericData,
    ) -> Result<()> {
        let bytes = self.matrix_bytes(name, dimensions, flags, data)?;
        self.inner.write_all(&bytes)?;
        debug!("Wrote matrix '{}' ({} bytes)", name, bytes.len());
        Ok(())
    }

    /// Writes a numeric matrix wrapped in an `MiCompressed` element.
    pub fn write_compressed_matrix(
        &mut self,
        name: &str,
        dimensions: &[usize],
        data: &NumericData,
    ) -> Result<()> {
        let plain = self.matrix_bytes(name, dimensions, ArrayFlags::new(data.class()), data)?;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&plain)?;
        let compressed = encoder.finish()?;
        trace!(
            "Compressed matrix '{}': {} -> {} bytes",
            name,
            plain.len(),
            compressed.len()
        );

        let tag = ElementTag::new(DataKind::Compressed, payload_len(compressed.len())?);
        self.inner.write_all(&tag::encode_normal(&tag, self.endianness))?;
        self.inner.write_all(&compressed)?;
        debug!("Wrote compressed matrix '{}' ({} bytes)", name, compressed.len());
        Ok(())
    }

    /// Encodes a full `MiMatrix` element including its own tag.
    fn matrix_bytes(
        &self,
        name: &str,
        dimensions: &[usize],
        flags: ArrayFlags,
        data: &NumericData,
    ) -> Result<Vec<u8>> {
        let e = self.endianness;

        let mut flags_payload = [0u8; 8];
        e.write_u32(&mut flags_payload[..4], flags.to_word());

        let mut dims_payload = vec![0u8; dimensions.len() * 4];
        for (dst, &d) in dims_payload.chunks_exact_mut(4).zip(dimensions) {
            let d = i32::try_from(d)
                .map_err(|_| MatError::MalformedElement(format!("Dimension too large: {}", d)))?;
            e.write_i32(dst, d);
        }

        let mut body = encode_element(DataKind::UInt32, &flags_payload, e)?;
        body.extend(encode_element(DataKind::Int32, &dims_payload, e)?);
        body.extend(encode_element(DataKind::Int8, &text::encode(name, self.encoding), e)?);
        body.extend(encode_element(data.kind(), &data.encode(e), e)?);

        let tag = ElementTag::new(DataKind::Matrix, payload_len(body.len())?);
        let mut bytes = tag::encode(&tag, e);
        bytes.extend(body);
        Ok(bytes)
    }
}

fn payload_len(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| MatError::MalformedElement(format!("Element of {} bytes is too large", len)))
}

fn encode_element(kind: DataKind, payload: &[u8], endianness: Endianness) -> Result<Vec<u8>> {
    let tag = ElementTag::new(kind, payload_len(payload.len())?);
    let mut bytes = tag::encode(&tag, endianness);
    bytes.extend_from_slice(payload);
    bytes.resize(bytes.len() + tag::format_for(&tag).padding(&tag), 0);
    Ok(bytes)
}

//! Assembly of numeric matrices from `MiMatrix` elements.
//!
//! # Matrix Body
//! ```text
//! ┌──────────────────┐
//! │  Array flags     │ ← MiUInt32, 8 bytes: flags word + reserved word
//! ├──────────────────┤
//! │  Dimensions      │ ← MiInt32 × N axes
//! ├──────────────────┤
//! │  Name            │ ← MiInt8 text
//! ├──────────────────┤
//! │  Values          │ ← any numeric kind, column-major
//! └──────────────────┘
//! ```
//! Every sub-element carries its own tag and is padded independently.

use log::{debug, trace};

use super::tag;
use crate::mat::codec::binary::BinaryRead;
use crate::mat::types::error::{MatError, Result};
use crate::mat::types::matrix::MatrixElement;
use crate::mat::types::models::{
    ArrayFlags, DataKind, ElementTag, Endianness, MatrixHeader, TagFormat,
};

const FLAGS_LEN: u32 = 8;

/// Reads the body of a matrix whose `MiMatrix` tag has already been consumed.
///
/// # Errors
/// - [`MatError::UnsupportedArray`] for cell, struct, object, sparse or complex arrays
/// - [`MatError::UnsupportedElementKind`] if the values use a non-numeric kind
/// - [`MatError::DimensionMismatch`] if the value count disagrees with the dimensions
pub fn read<B: BinaryRead>(reader: &mut B, tag: ElementTag) -> Result<MatrixElement> {
    let header = read_header(reader)?;
    if !header.flags.class.has_numeric_values() || header.flags.complex {
        debug!(
            "Matrix '{}' has unsupported class {:?} (complex={})",
            header.name, header.flags.class, header.flags.complex
        );
        return Err(MatError::UnsupportedArray {
            class: header.flags.class,
            complex: header.flags.complex,
        });
    }

    let values = read_values(reader)?;
    debug!(
        "Matrix '{}': class={:?}, dimensions={:?}, {} values",
        header.name,
        header.flags.class,
        header.dimensions,
        values.len()
    );
    MatrixElement::new(tag, header, values)
}

/// Reads the flags, dimensions and name sub-elements.
pub fn read_header<B: BinaryRead>(reader: &mut B) -> Result<MatrixHeader> {
    let (flags_tag, flags_format) = tag::read(reader)?;
    if flags_tag.byte_len < FLAGS_LEN {
        return Err(MatError::MalformedElement(format!(
            "Array flags payload is {} bytes, expected {}",
            flags_tag.byte_len, FLAGS_LEN
        )));
    }
    let flags = read_array_flags(reader)?;
    skip_rest(reader, &flags_tag, flags_format, FLAGS_LEN as usize)?;

    let (dims_tag, dims_format) = tag::read(reader)?;
    let axes = dims_tag.byte_len as usize / 4;
    let raw_dims = reader.read_bytes(axes * 4)?;
    skip_rest(reader, &dims_tag, dims_format, axes * 4)?;
    let endianness = reader.endianness();
    let dimensions = raw_dims
        .chunks_exact(4)
        .map(|c| {
            let d = endianness.read_i32(c);
            usize::try_from(d)
                .map_err(|_| MatError::MalformedElement(format!("Negative dimension: {}", d)))
        })
        .collect::<Result<Vec<usize>>>()?;

    let (name_tag, name_format) = tag::read(reader)?;
    let name = reader.read_text(name_tag.byte_len as usize)?;
    skip_rest(reader, &name_tag, name_format, name_tag.byte_len as usize)?;

    Ok(MatrixHeader {
        flags,
        dimensions,
        name,
    })
}

/// Reads the flags word and consumes the reserved word after it.
pub fn read_array_flags<B: BinaryRead>(reader: &mut B) -> Result<ArrayFlags> {
    let word = reader.read_u32()?;
    let _reserved = reader.read_u32()?;
    trace!("Array flags word: {:#010x}", word);
    Ok(ArrayFlags::from_word(word))
}

/// Reads the values sub-element and widens every value to `f64`.
pub fn read_values<B: BinaryRead>(reader: &mut B) -> Result<Vec<f64>> {
    let (values_tag, values_format) = tag::read(reader)?;
    let size = values_tag
        .kind
        .size()
        .ok_or(MatError::UnsupportedElementKind(values_tag.kind))?;
    let count = values_tag.byte_len as usize / size;

    let bytes = reader.read_bytes(count * size)?;
    let values = decode_values(&bytes, values_tag.kind, reader.endianness())?;
    skip_rest(reader, &values_tag, values_format, count * size)?;
    Ok(values)
}

/// Decodes a packed numeric payload of `kind`.
pub fn decode_values(bytes: &[u8], kind: DataKind, endianness: Endianness) -> Result<Vec<f64>> {
    let values = match kind {
        DataKind::Int8 => bytes.iter().map(|&b| f64::from(b as i8)).collect(),
        DataKind::UInt8 => bytes.iter().map(|&b| f64::from(b)).collect(),
        DataKind::Int16 => bytes
            .chunks_exact(2)
            .map(|c| f64::from(endianness.read_i16(c)))
            .collect(),
        DataKind::UInt16 => bytes
            .chunks_exact(2)
            .map(|c| f64::from(endianness.read_u16(c)))
            .collect(),
        DataKind::Int32 => bytes
            .chunks_exact(4)
            .map(|c| f64::from(endianness.read_i32(c)))
            .collect(),
        DataKind::UInt32 => bytes
            .chunks_exact(4)
            .map(|c| f64::from(endianness.read_u32(c)))
            .collect(),
        DataKind::Single => bytes
            .chunks_exact(4)
            .map(|c| f64::from(endianness.read_f32(c)))
            .collect(),
        DataKind::Double => bytes
            .chunks_exact(8)
            .map(|c| endianness.read_f64(c))
            .collect(),
        DataKind::Int64 => bytes
            .chunks_exact(8)
            .map(|c| endianness.read_i64(c) as f64)
            .collect(),
        DataKind::UInt64 => bytes
            .chunks_exact(8)
            .map(|c| endianness.read_u64(c) as f64)
            .collect(),
        other => return Err(MatError::UnsupportedElementKind(other)),
    };
    Ok(values)
}

/// Skips whatever of the payload was not consumed, then the padding.
fn skip_rest<B: BinaryRead>(
    reader: &mut B,
    tag: &ElementTag,
    format: TagFormat,
    consumed: usize,
) -> Result<()> {
    let remaining = (tag.byte_len as usize).saturating_sub(consumed) + format.padding(tag);
    if remaining > 0 {
        trace!("Skipping {} bytes after {:?} payload", remaining, tag.kind);
        reader.skip(remaining)?;
    }
    Ok(())
}

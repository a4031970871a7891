//! Element tag decoding and encoding.
//!
//! # Tag Layouts
//! ```text
//! Normal: [4 bytes] data kind   [4 bytes] byte length
//! Small:  [2 bytes] byte length [2 bytes] data kind     (one word, length in the high half)
//! ```
//!
//! Data kind codes never exceed 18, so a first word above 256 can only be a
//! packed tag whose length occupies the high half-word.

use log::trace;

use crate::mat::codec::binary::BinaryRead;
use crate::mat::types::error::Result;
use crate::mat::types::models::{DataKind, ElementTag, Endianness, TagFormat};

const SMALL_TAG_THRESHOLD: u32 = 256;

/// Reads one tag from the reader's active source.
///
/// Padding is not skipped here; callers skip it after consuming the payload.
pub fn read<B: BinaryRead>(reader: &mut B) -> Result<(ElementTag, TagFormat)> {
    let word = reader.read_u32()?;
    let (tag, format) = if word > SMALL_TAG_THRESHOLD {
        let tag = ElementTag::new(DataKind::from(word & 0xFFFF), word >> 16);
        (tag, TagFormat::Small)
    } else {
        let byte_len = reader.read_u32()?;
        (ElementTag::new(DataKind::from(word), byte_len), TagFormat::Normal)
    };
    trace!(
        "Read {:?} tag: kind={:?}, length={}",
        format, tag.kind, tag.byte_len
    );
    Ok((tag, format))
}

/// Chooses the layout the writer uses for `tag`.
///
/// An empty payload keeps the normal layout: packed, its word would be
/// indistinguishable from a normal tag's kind word.
pub fn format_for(tag: &ElementTag) -> TagFormat {
    if tag.byte_len > 0 && tag.byte_len <= TagFormat::SMALL_MAX_LEN {
        TagFormat::Small
    } else {
        TagFormat::Normal
    }
}

/// Encodes `tag` in the layout returned by [`format_for`].
pub fn encode(tag: &ElementTag, endianness: Endianness) -> Vec<u8> {
    match format_for(tag) {
        TagFormat::Small => {
            let mut buf = vec![0u8; 4];
            let word = (tag.byte_len << 16) | (tag.kind.code() & 0xFFFF);
            endianness.write_u32(&mut buf, word);
            buf
        }
        TagFormat::Normal => encode_normal(tag, endianness),
    }
}

/// Encodes `tag` in the 8-byte layout regardless of its length.
pub fn encode_normal(tag: &ElementTag, endianness: Endianness) -> Vec<u8> {
    let mut buf = vec![0u8; 8];
    endianness.write_u32(&mut buf[..4], tag.kind.code());
    endianness.write_u32(&mut buf[4..], tag.byte_len);
    buf
}

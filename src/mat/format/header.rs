//! MAT-file header parsing and encoding.
//!
//! # Header Structure
//! ```text
//! [116 bytes] Descriptive text (space padded)
//! [  8 bytes] Subsystem data offset (ignored)
//! [  2 bytes] Version
//! [  2 bytes] Endian indicator ('M','I' as a 16-bit word)
//! ```

use encoding_rs::Encoding;
use log::{debug, info, trace};

use crate::mat::codec::binary::BinaryRead;
use crate::mat::codec::text;
use crate::mat::types::error::{MatError, Result};
use crate::mat::types::models::{Endianness, MatHeader};

pub const HEADER_LEN: usize = 128;
pub const TEXT_LEN: usize = 116;
pub const SUBSYSTEM_LEN: usize = 8;

/// Endian indicator read in the writer's own byte order.
pub const MAGIC_NATIVE: u16 = 19785;
/// Endian indicator read in the opposite byte order.
pub const MAGIC_SWAPPED: u16 = 18765;

/// Parses the 128-byte header from the reader's current position.
///
/// The caller is responsible for positioning the reader at offset 0 and for
/// applying the returned byte order to subsequent reads.
///
/// # Errors
/// - [`MatError::MalformedHeader`] if the endian indicator is not recognized
/// - [`MatError::UnexpectedEndOfData`] if fewer than 128 bytes are available
pub fn parse<B: BinaryRead>(reader: &mut B) -> Result<MatHeader> {
    info!("Parsing MAT-file header");

    let raw_text = reader.read_text(TEXT_LEN)?;
    let text = raw_text
        .trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string();
    trace!("Header text: {:?}", text);

    reader.skip(SUBSYSTEM_LEN)?;

    // Version precedes the indicator but can only be decoded once the order is known.
    let tail = reader.read_array::<4>()?;
    let endianness = detect_endianness([tail[2], tail[3]])?;
    let version = endianness.read_u16(&tail[0..2]);

    info!(
        "Header parsed successfully: version={:#06x}, byte order={:?}, swapped={}",
        version,
        endianness,
        endianness.requires_swap()
    );

    Ok(MatHeader {
        text,
        version,
        endianness,
    })
}

/// Derives the file's byte order from the two indicator bytes.
pub fn detect_endianness(indicator: [u8; 2]) -> Result<Endianness> {
    let magic = Endianness::NATIVE.read_u16(&indicator);
    match magic {
        MAGIC_NATIVE => {
            debug!("Endian indicator {} -> native byte order", magic);
            Ok(Endianness::NATIVE)
        }
        MAGIC_SWAPPED => {
            debug!("Endian indicator {} -> swapped byte order", magic);
            Ok(Endianness::NATIVE.swapped())
        }
        _ => Err(MatError::MalformedHeader { magic }),
    }
}

/// Encodes `header` as 128 bytes in the given byte order.
///
/// # Errors
/// Returns [`MatError::InvalidHeaderText`] if the text is not 4 to 115
/// characters long or does not fit into 116 encoded bytes.
pub fn encode(
    header: &MatHeader,
    endianness: Endianness,
    encoding: &'static Encoding,
) -> Result<[u8; HEADER_LEN]> {
    let len = header.text.chars().count();
    if !(MatHeader::MIN_TEXT_LEN..=MatHeader::MAX_TEXT_LEN).contains(&len) {
        return Err(MatError::InvalidHeaderText { len });
    }
    let text_bytes = text::encode(&header.text, encoding);
    if text_bytes.len() > TEXT_LEN {
        return Err(MatError::InvalidHeaderText {
            len: text_bytes.len(),
        });
    }

    let mut buf = [b' '; HEADER_LEN];
    buf[..text_bytes.len()].copy_from_slice(&text_bytes);
    buf[TEXT_LEN..TEXT_LEN + SUBSYSTEM_LEN].fill(0);
    endianness.write_u16(&mut buf[124..126], header.version);
    endianness.write_u16(&mut buf[126..128], MAGIC_NATIVE);
    Ok(buf)
}

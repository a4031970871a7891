//! Text decoding independent of numeric byte order.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

/// Bytes occupied by one character unit in `encoding`.
pub fn unit_width(encoding: &'static Encoding) -> usize {
    if encoding == UTF_16LE || encoding == UTF_16BE {
        2
    } else {
        1
    }
}

/// Decodes `bytes` without BOM sniffing; malformed sequences become U+FFFD.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Encodes `text`, replacing unmappable characters with numeric references.
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    // encoding_rs has no UTF-16 encoder; it falls back to UTF-8 for those.
    if encoding == UTF_16LE {
        return text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    }
    if encoding == UTF_16BE {
        return text.encode_utf16().flat_map(u16::to_be_bytes).collect();
    }
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}

//! Configuration helpers.

use encoding_rs::{Encoding, UTF_8};
use log::warn;

/// Resolves a WHATWG encoding label, falling back to UTF-8.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        warn!("Unknown encoding label '{}', falling back to UTF-8", label);
        UTF_8
    })
}

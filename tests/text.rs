use std::io::Cursor;

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use mat_reader::mat::utils::parse_encoding;
use mat_reader::{BinaryRead, MatReader};

#[test]
fn utf8_chars_are_single_bytes() {
    let mut reader = MatReader::new(Cursor::new(b"abcdef".to_vec()));
    assert_eq!(reader.read_char().expect("char"), 'a');
    assert_eq!(reader.read_chars(2).expect("chars"), vec!['b', 'c']);
    assert_eq!(reader.read_string(3).expect("string"), "def");
}

#[test]
fn utf16le_chars_take_two_bytes() {
    let bytes: Vec<u8> = "héllo".encode_utf16().flat_map(u16::to_le_bytes).collect();
    let mut reader = MatReader::with_encoding(Cursor::new(bytes), UTF_16LE);

    assert_eq!(reader.read_char().expect("char"), 'h');
    assert_eq!(reader.read_string(4).expect("string"), "éllo");
}

#[test]
fn utf16be_is_independent_of_numeric_order() {
    let bytes: Vec<u8> = "MAT".encode_utf16().flat_map(u16::to_be_bytes).collect();
    let mut reader = MatReader::with_encoding(Cursor::new(bytes), UTF_16BE);
    reader.set_endianness(mat_reader::Endianness::Little);

    assert_eq!(reader.read_string(3).expect("string"), "MAT");
}

#[test]
fn single_byte_encoding_maps_high_bytes() {
    let mut reader = MatReader::with_encoding(Cursor::new(vec![0x63, 0x61, 0x66, 0xE9]), WINDOWS_1252);
    assert_eq!(reader.read_text(4).expect("text"), "café");
}

#[test]
fn invalid_utf8_becomes_replacement_character() {
    let mut reader = MatReader::new(Cursor::new(vec![0xFF]));
    assert_eq!(reader.read_char().expect("char"), char::REPLACEMENT_CHARACTER);
}

#[test]
fn encoding_labels_resolve() {
    assert_eq!(parse_encoding("utf-8"), UTF_8);
    assert_eq!(parse_encoding(" latin1 "), WINDOWS_1252);
    assert_eq!(parse_encoding("utf-16le"), UTF_16LE);
    assert_eq!(parse_encoding("no-such-encoding"), UTF_8);
}

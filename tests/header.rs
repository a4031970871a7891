mod common;

use common::{HEADER_TEXT, mat_file, reader_over};
use mat_reader::mat::format::header::{self, HEADER_LEN, MAGIC_NATIVE, MAGIC_SWAPPED};
use mat_reader::{BinaryRead, Endianness, MatError, MatHeader, MatWriter};

#[test]
fn header_round_trips_in_both_orders() {
    for order in [Endianness::Little, Endianness::Big] {
        let bytes = mat_file(order, |_| {});
        assert_eq!(bytes.len(), HEADER_LEN);

        let mut reader = reader_over(bytes);
        let parsed = reader.read_header().expect("header");
        assert_eq!(parsed.text, HEADER_TEXT);
        assert_eq!(parsed.version, MatHeader::DEFAULT_VERSION);
        assert_eq!(parsed.endianness, order);
        assert_eq!(parsed.requires_swap(), order != Endianness::NATIVE);
        assert_eq!(reader.endianness(), order);
        assert_eq!(reader.header(), Some(&parsed));
    }
}

#[test]
fn text_is_padded_on_write_and_trimmed_on_read() {
    let bytes = mat_file(Endianness::NATIVE, |_| {});
    assert_eq!(&bytes[..HEADER_TEXT.len()], HEADER_TEXT.as_bytes());
    assert!(bytes[HEADER_TEXT.len()..116].iter().all(|&b| b == b' '));
    assert!(bytes[116..124].iter().all(|&b| b == 0));

    let mut raw = bytes;
    raw[HEADER_TEXT.len()] = 0;
    let parsed = reader_over(raw).read_header().expect("header");
    assert_eq!(parsed.text, HEADER_TEXT);
}

#[test]
fn version_is_decoded_in_file_order() {
    for order in [Endianness::Little, Endianness::Big] {
        let mut header = MatHeader::new("HEADER").expect("header");
        header.version = 0x0203;
        header.endianness = order;

        let mut writer = MatWriter::with_endianness(Vec::new(), order);
        writer.write_header(&header).expect("write header");
        let parsed = reader_over(writer.into_inner())
            .read_header()
            .expect("header");
        assert_eq!(parsed, header);
    }
}

#[test]
fn unknown_indicator_is_malformed() {
    let mut bytes = mat_file(Endianness::NATIVE, |_| {});
    bytes[126] = b'X';
    bytes[127] = b'X';

    let err = reader_over(bytes).read_header().expect_err("bad magic");
    match err {
        MatError::MalformedHeader { magic } => assert_eq!(magic, u16::from_ne_bytes(*b"XX")),
        other => panic!("expected MalformedHeader, got {:?}", other),
    }
}

#[test]
fn indicator_maps_to_native_or_swapped() {
    let native = Endianness::NATIVE.read_u16(&MAGIC_NATIVE.to_ne_bytes());
    assert_eq!(native, MAGIC_NATIVE);
    assert_eq!(
        header::detect_endianness(MAGIC_NATIVE.to_ne_bytes()).expect("native"),
        Endianness::NATIVE
    );
    assert_eq!(
        header::detect_endianness(MAGIC_SWAPPED.to_ne_bytes()).expect("swapped"),
        Endianness::NATIVE.swapped()
    );
    assert!(header::detect_endianness([0, 0]).is_err());
}

#[test]
fn truncated_header_is_end_of_data() {
    let bytes = mat_file(Endianness::NATIVE, |_| {});
    let err = reader_over(bytes[..100].to_vec())
        .read_header()
        .expect_err("short header");
    assert!(matches!(err, MatError::UnexpectedEndOfData), "got {:?}", err);
}

#[test]
fn header_is_reread_from_offset_zero() {
    let bytes = mat_file(Endianness::Big, |w| {
        w.write_u32_element(&[1, 2]).expect("element");
    });
    let mut reader = reader_over(bytes);
    reader.read_header().expect("first read");
    reader.read_u32().expect("consume a word");

    let again = reader.read_header().expect("second read");
    assert_eq!(again.endianness, Endianness::Big);
    assert_eq!(reader.outer_position().expect("position"), HEADER_LEN as u64);
}

#[test]
fn header_text_length_is_validated() {
    for text in ["abc", ""] {
        let err = MatHeader::new(text).expect_err("too short");
        assert!(matches!(err, MatError::InvalidHeaderText { .. }), "got {:?}", err);
    }
    let long = "x".repeat(116);
    assert!(matches!(
        MatHeader::new(long),
        Err(MatError::InvalidHeaderText { len: 116 })
    ));
    assert!(MatHeader::new("x".repeat(115)).is_ok());
    assert!(MatHeader::new("abcd").is_ok());
}

#[test]
fn writer_rejects_text_that_does_not_fit() {
    let mut header = MatHeader::new("HEADER").expect("header");
    header.text = "é".repeat(60);

    let mut writer = MatWriter::new(Vec::new());
    let err = writer.write_header(&header).expect_err("120 encoded bytes");
    assert!(matches!(err, MatError::InvalidHeaderText { len: 120 }), "got {:?}", err);
}

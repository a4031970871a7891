mod common;

use common::raw_reader;
use mat_reader::mat::format::tag;
use mat_reader::{BinaryRead, DataKind, ElementTag, Endianness, MatWriter, TagFormat};

#[test]
fn normal_tag_big_endian() {
    let bytes = vec![0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF];
    let mut reader = raw_reader(bytes.clone(), Endianness::Big);

    let tag = reader.read_element_tag().expect("normal tag");
    assert_eq!(tag, ElementTag::new(DataKind::Int8, 255));

    let mut writer = MatWriter::with_endianness(Vec::new(), Endianness::Big);
    writer.write_element_tag(&tag).expect("write tag");
    assert_eq!(writer.into_inner(), bytes);
}

#[test]
fn small_tag_big_endian() {
    let bytes = vec![0x00, 0x02, 0x00, 0x01];
    let mut reader = raw_reader(bytes.clone(), Endianness::Big);

    let tag = reader.read_element_tag().expect("small tag");
    assert_eq!(tag, ElementTag::new(DataKind::Int8, 2));
    assert!(reader.read_u8().is_err(), "a small tag consumes only four bytes");

    let mut writer = MatWriter::with_endianness(Vec::new(), Endianness::Big);
    writer.write_element_tag(&tag).expect("write tag");
    assert_eq!(writer.into_inner(), bytes);
}

#[test]
fn small_and_normal_layouts_decode_alike() {
    let kinds = [DataKind::Int8, DataKind::UInt16, DataKind::Single, DataKind::Utf8];
    for order in [Endianness::Little, Endianness::Big] {
        for kind in kinds {
            for len in 1..=4 {
                let expected = ElementTag::new(kind, len);

                let small = tag::encode(&expected, order);
                assert_eq!(small.len(), 4);
                let (decoded, format) = tag::read(&mut raw_reader(small, order)).expect("small");
                assert_eq!(format, TagFormat::Small);
                assert_eq!(decoded, expected);

                let normal = tag::encode_normal(&expected, order);
                assert_eq!(normal.len(), 8);
                let (decoded, format) = tag::read(&mut raw_reader(normal, order)).expect("normal");
                assert_eq!(format, TagFormat::Normal);
                assert_eq!(decoded, expected);
            }
        }
    }
}

#[test]
fn empty_payload_keeps_normal_layout() {
    let tag = ElementTag::new(DataKind::Int8, 0);
    assert_eq!(tag::format_for(&tag), TagFormat::Normal);
    assert_eq!(tag::encode(&tag, Endianness::Little).len(), 8);
}

#[test]
fn padding_law() {
    for len in 0..=64u32 {
        let tag = ElementTag::new(DataKind::UInt8, len);
        let padding = tag.padding() as u32;
        if len <= 4 {
            assert_eq!(len + padding, 4, "length {}", len);
        } else {
            assert_eq!((len + padding) % 8, 0, "length {}", len);
            assert!(padding < 8, "length {}", len);
        }
    }
}

#[test]
fn normal_frames_align_short_payloads_to_eight() {
    let tag = ElementTag::new(DataKind::UInt8, 3);
    assert_eq!(TagFormat::Small.padding(&tag), 1);
    assert_eq!(TagFormat::Normal.padding(&tag), 5);

    let long = ElementTag::new(DataKind::UInt8, 13);
    assert_eq!(TagFormat::Normal.padding(&long), long.padding());
}

#[test]
fn value_count_follows_kind_size() {
    assert_eq!(ElementTag::new(DataKind::Double, 24).value_count(), Some(3));
    assert_eq!(ElementTag::new(DataKind::Int16, 6).value_count(), Some(3));
    assert_eq!(ElementTag::new(DataKind::UInt8, 5).value_count(), Some(5));
    assert_eq!(ElementTag::new(DataKind::Matrix, 64).value_count(), None);
    assert_eq!(ElementTag::new(DataKind::Unknown(99), 8).value_count(), None);
}

#[test]
fn kind_codes_round_trip() {
    for code in [1, 2, 3, 4, 5, 6, 7, 9, 12, 13, 14, 15, 16, 17, 18] {
        let kind = DataKind::from(code);
        assert!(!matches!(kind, DataKind::Unknown(_)), "code {}", code);
        assert_eq!(kind.code(), code);
    }
    assert_eq!(DataKind::from(8), DataKind::Unknown(8));
}

#[test]
fn writer_padding_matches_tag_layout() {
    let mut writer = MatWriter::with_endianness(Vec::new(), Endianness::Little);
    writer
        .write_element(DataKind::UInt8, &[1, 2, 3])
        .expect("small element");
    writer
        .write_element(DataKind::UInt8, &[1, 2, 3, 4, 5])
        .expect("normal element");
    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), 8 + 16);
}

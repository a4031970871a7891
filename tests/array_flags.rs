mod common;

use common::raw_reader;
use mat_reader::{ArrayClass, ArrayFlags, Endianness, MatWriter};

fn combinations() -> Vec<(bool, bool, bool)> {
    (1u8..8)
        .map(|bits| (bits & 4 != 0, bits & 2 != 0, bits & 1 != 0))
        .collect()
}

#[test]
fn flag_combinations_round_trip_big_endian() {
    for (complex, global, logical) in combinations() {
        let flags = ArrayFlags {
            complex,
            global,
            logical,
            class: ArrayClass::Double,
        };

        let mut writer = MatWriter::with_endianness(Vec::new(), Endianness::Big);
        writer
            .write_u32_element(&[flags.to_word(), 0])
            .expect("flags element");
        let bytes = writer.into_inner();

        // Bits 9-11 land in byte 2 of the payload, the class in byte 3.
        let payload = &bytes[8..16];
        assert_eq!(payload[0], 0);
        assert_eq!(payload[1], 0);
        assert_eq!(payload[2], (flags.to_word() >> 8) as u8);
        assert_eq!(payload[3], ArrayClass::Double.code());

        let mut reader = raw_reader(bytes, Endianness::Big);
        reader.read_element_tag().expect("tag");
        let decoded = reader.read_array_flags().expect("array flags");
        assert_eq!(decoded, flags, "combination {:?}", (complex, global, logical));
    }
}

#[test]
fn flag_bits() {
    let word = ArrayFlags::COMPLEX | ArrayFlags::LOGICAL | u32::from(ArrayClass::Int16.code());
    let flags = ArrayFlags::from_word(word);
    assert!(flags.complex);
    assert!(!flags.global);
    assert!(flags.logical);
    assert_eq!(flags.class, ArrayClass::Int16);
    assert_eq!(flags.to_word(), word);
}

#[test]
fn class_codes() {
    for code in 1u8..=15 {
        let class = ArrayClass::from(code);
        assert!(!matches!(class, ArrayClass::Unknown(_)), "code {}", code);
        assert_eq!(class.code(), code);
        assert_eq!(class.is_numeric(), code >= 6, "code {}", code);
        assert_eq!(class.has_numeric_values(), code >= 4 && code != 5, "code {}", code);
    }
    assert_eq!(ArrayClass::from(0), ArrayClass::Unknown(0));
    assert!(!ArrayClass::Unknown(42).is_numeric());
}

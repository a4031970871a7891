#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::DeflateEncoder;
use mat_reader::{DataKind, Endianness, MatHeader, MatReader, MatWriter};

pub const HEADER_TEXT: &str = "MATLAB 5.0 MAT-file, Platform: test";

pub fn header(endianness: Endianness) -> MatHeader {
    let mut header = MatHeader::new(HEADER_TEXT).expect("valid header text");
    header.endianness = endianness;
    header
}

/// Builds a file by running `body` against a writer that already emitted the header.
pub fn mat_file<F>(endianness: Endianness, body: F) -> Vec<u8>
where
    F: FnOnce(&mut MatWriter<Vec<u8>>),
{
    let mut writer = MatWriter::with_endianness(Vec::new(), endianness);
    writer
        .write_header(&header(endianness))
        .expect("write header");
    body(&mut writer);
    writer.into_inner()
}

pub fn reader_over(bytes: Vec<u8>) -> MatReader<Cursor<Vec<u8>>> {
    MatReader::new(Cursor::new(bytes))
}

/// A reader over a header-less stream with the byte order set explicitly.
pub fn raw_reader(bytes: Vec<u8>, endianness: Endianness) -> MatReader<Cursor<Vec<u8>>> {
    let mut reader = MatReader::new(Cursor::new(bytes));
    reader.set_endianness(endianness);
    reader
}

/// Raw deflate without the zlib header, as consumed by `begin_decompress`.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("deflate write");
    encoder.finish().expect("deflate finish")
}

/// Encodes a `MiMatrix` element from hand-picked parts, so tests can produce
/// bodies the writer never would.
pub fn raw_matrix(
    endianness: Endianness,
    flags_word: u32,
    dimensions: &[i32],
    name: &str,
    values_kind: DataKind,
    values: &[u8],
) -> Vec<u8> {
    let mut body = MatWriter::with_endianness(Vec::new(), endianness);

    let mut flags = [0u8; 8];
    endianness.write_u32(&mut flags[..4], flags_word);
    body.write_element(DataKind::UInt32, &flags)
        .expect("flags element");

    let mut dims = vec![0u8; dimensions.len() * 4];
    for (dst, &d) in dims.chunks_exact_mut(4).zip(dimensions) {
        endianness.write_i32(dst, d);
    }
    body.write_element(DataKind::Int32, &dims)
        .expect("dims element");
    body.write_element(DataKind::Int8, name.as_bytes())
        .expect("name element");
    body.write_element(values_kind, values)
        .expect("values element");

    let mut element = MatWriter::with_endianness(Vec::new(), endianness);
    element
        .write_element(DataKind::Matrix, &body.into_inner())
        .expect("matrix element");
    element.into_inner()
}

pub fn f64_bytes(values: &[f64], endianness: Endianness) -> Vec<u8> {
    let mut buf = vec![0u8; values.len() * 8];
    for (dst, &v) in buf.chunks_exact_mut(8).zip(values) {
        endianness.write_f64(dst, v);
    }
    buf
}

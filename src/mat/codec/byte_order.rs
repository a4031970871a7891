//! Fixed-width numeric decoding and encoding in either byte order.
//!
//! Every multi-byte value after the file header goes through these helpers,
//! so a swapped file is corrected in exactly one place.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::mat::types::models::Endianness;

impl Endianness {
    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endianness::Little => LittleEndian::read_u16(buf),
            Endianness::Big => BigEndian::read_u16(buf),
        }
    }

    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endianness::Little => LittleEndian::read_u32(buf),
            Endianness::Big => BigEndian::read_u32(buf),
        }
    }

    pub fn read_u64(self, buf: &[u8]) -> u64 {
        match self {
            Endianness::Little => LittleEndian::read_u64(buf),
            Endianness::Big => BigEndian::read_u64(buf),
        }
    }

    pub fn read_i16(self, buf: &[u8]) -> i16 {
        match self {
            Endianness::Little => LittleEndian::read_i16(buf),
            Endianness::Big => BigEndian::read_i16(buf),
        }
    }

    pub fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Endianness::Little => LittleEndian::read_i32(buf),
            Endianness::Big => BigEndian::read_i32(buf),
        }
    }

    pub fn read_i64(self, buf: &[u8]) -> i64 {
        match self {
            Endianness::Little => LittleEndian::read_i64(buf),
            Endianness::Big => BigEndian::read_i64(buf),
        }
    }

    pub fn read_f32(self, buf: &[u8]) -> f32 {
        match self {
            Endianness::Little => LittleEndian::read_f32(buf),
            Endianness::Big => BigEndian::read_f32(buf),
        }
    }

    pub fn read_f64(self, buf: &[u8]) -> f64 {
        match self {
            Endianness::Little => LittleEndian::read_f64(buf),
            Endianness::Big => BigEndian::read_f64(buf),
        }
    }

    pub fn write_u16(self, buf: &mut [u8], value: u16) {
        match self {
            Endianness::Little => LittleEndian::write_u16(buf, value),
            Endianness::Big => BigEndian::write_u16(buf, value),
        }
    }

    pub fn write_u32(self, buf: &mut [u8], value: u32) {
        match self {
            Endianness::Little => LittleEndian::write_u32(buf, value),
            Endianness::Big => BigEndian::write_u32(buf, value),
        }
    }

    pub fn write_u64(self, buf: &mut [u8], value: u64) {
        match self {
            Endianness::Little => LittleEndian::write_u64(buf, value),
            Endianness::Big => BigEndian::write_u64(buf, value),
        }
    }

    pub fn write_i16(self, buf: &mut [u8], value: i16) {
        match self {
            Endianness::Little => LittleEndian::write_i16(buf, value),
            Endianness::Big => BigEndian::write_i16(buf, value),
        }
    }

    pub fn write_i32(self, buf: &mut [u8], value: i32) {
        match self {
            Endianness::Little => LittleEndian::write_i32(buf, value),
            Endianness::Big => BigEndian::write_i32(buf, value),
        }
    }

    pub fn write_i64(self, buf: &mut [u8], value: i64) {
        match self {
            Endianness::Little => LittleEndian::write_i64(buf, value),
            Endianness::Big => BigEndian::write_i64(buf, value),
        }
    }

    pub fn write_f32(self, buf: &mut [u8], value: f32) {
        match self {
            Endianness::Little => LittleEndian::write_f32(buf, value),
            Endianness::Big => BigEndian::write_f32(buf, value),
        }
    }

    pub fn write_f64(self, buf: &mut [u8], value: f64) {
        match self {
            Endianness::Little => LittleEndian::write_f64(buf, value),
            Endianness::Big => BigEndian::write_f64(buf, value),
        }
    }
}

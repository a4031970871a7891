//! The primitive-read contract shared by every decoder.
//!
//! Implementors only supply raw byte access plus their byte-order and text
//! configuration; the typed reads are provided on top of that. Header, tag
//! and matrix decoders are generic over this trait and never see whether the
//! bytes come from a file or from an inflate stream.

use encoding_rs::Encoding;

use super::text;
use crate::mat::types::error::Result;
use crate::mat::types::models::Endianness;

pub trait BinaryRead: Sized {
    /// Discards `count` bytes from the active source.
    fn skip(&mut self, count: usize) -> Result<()>;

    /// Fills `buf` completely from the active source.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Byte order applied to multi-byte numeric reads.
    fn endianness(&self) -> Endianness;

    /// Encoding applied to character reads.
    fn encoding(&self) -> &'static Encoding;

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_exact_bytes(&mut buf)?;
        Ok(buf)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let buf = self.read_array::<2>()?;
        Ok(self.endianness().read_u16(&buf))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let buf = self.read_array::<4>()?;
        Ok(self.endianness().read_u32(&buf))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let buf = self.read_array::<8>()?;
        Ok(self.endianness().read_u64(&buf))
    }

    fn read_i16(&mut self) -> Result<i16> {
        let buf = self.read_array::<2>()?;
        Ok(self.endianness().read_i16(&buf))
    }

    fn read_i32(&mut self) -> Result<i32> {
        let buf = self.read_array::<4>()?;
        Ok(self.endianness().read_i32(&buf))
    }

    fn read_i64(&mut self) -> Result<i64> {
        let buf = self.read_array::<8>()?;
        Ok(self.endianness().read_i64(&buf))
    }

    fn read_f32(&mut self) -> Result<f32> {
        let buf = self.read_array::<4>()?;
        Ok(self.endianness().read_f32(&buf))
    }

    fn read_f64(&mut self) -> Result<f64> {
        let buf = self.read_array::<8>()?;
        Ok(self.endianness().read_f64(&buf))
    }

    /// Reads `count` values with `read_one`.
    ///
    /// The initial allocation is capped; `count` may come from untrusted input.
    fn read_values<T, F>(&mut self, count: usize, mut read_one: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        const MAX_PREALLOC: usize = 4096;
        let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            values.push(read_one(self)?);
        }
        Ok(values)
    }

    /// Reads `len` raw bytes.
    ///
    /// The buffer grows in bounded chunks, so a corrupt length fails with
    /// [`MatError::UnexpectedEndOfData`](crate::mat::types::error::MatError::UnexpectedEndOfData)
    /// instead of allocating the whole claimed size up front.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        const CHUNK: usize = 64 * 1024;
        let mut buf = Vec::with_capacity(len.min(CHUNK));
        while buf.len() < len {
            let start = buf.len();
            buf.resize(start + (len - start).min(CHUNK), 0);
            self.read_exact_bytes(&mut buf[start..])?;
        }
        Ok(buf)
    }

    /// Decodes exactly `byte_len` bytes as text.
    fn read_text(&mut self, byte_len: usize) -> Result<String> {
        let buf = self.read_bytes(byte_len)?;
        Ok(text::decode(&buf, self.encoding()))
    }

    /// Reads `count` characters of one encoding unit each.
    fn read_chars(&mut self, count: usize) -> Result<Vec<char>> {
        let width = text::unit_width(self.encoding());
        Ok(self.read_text(count * width)?.chars().collect())
    }

    fn read_char(&mut self) -> Result<char> {
        Ok(self
            .read_chars(1)?
            .first()
            .copied()
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Reads `count` characters as a string.
    fn read_string(&mut self, count: usize) -> Result<String> {
        Ok(self.read_chars(count)?.into_iter().collect())
    }
}

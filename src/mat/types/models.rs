//! Core data structures for MAT-file format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - Byte order and the file header
//! - Element tags and data kinds
//! - Array flags and matrix headers

use super::error::{MatError, Result};
use super::matrix::MatrixElement;

/// Byte order of multi-byte numeric values in a MAT-file.
///
/// The header stores the characters `M` and `I` as a 16-bit word. Read back in
/// the writer's order it equals `19785`; read in the opposite order it equals
/// `18765`. Everything after the header follows the order derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the machine this crate was compiled for.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endianness = Endianness::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endianness = Endianness::Big;

    /// Returns the opposite byte order.
    pub fn swapped(self) -> Self {
        match self {
            Endianness::Little => Endianness::Big,
            Endianness::Big => Endianness::Little,
        }
    }

    /// True when values in this order must be byte-reversed on this machine.
    pub fn requires_swap(self) -> bool {
        self != Self::NATIVE
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Self::NATIVE
    }
}

/// Parsed 128-byte file preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatHeader {
    /// Descriptive text with trailing whitespace removed.
    pub text: String,
    /// Format version, kept opaque.
    pub version: u16,
    /// Byte order of everything following the header.
    pub endianness: Endianness,
}

impl MatHeader {
    /// Version written by MATLAB for Level-5 files.
    pub const DEFAULT_VERSION: u16 = 0x0100;
    pub const MIN_TEXT_LEN: usize = 4;
    pub const MAX_TEXT_LEN: usize = 115;

    /// Creates a header in native byte order with the default version.
    ///
    /// # Errors
    /// Returns [`MatError::InvalidHeaderText`] if `text` is not 4 to 115 characters long.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let len = text.chars().count();
        if !(Self::MIN_TEXT_LEN..=Self::MAX_TEXT_LEN).contains(&len) {
            return Err(MatError::InvalidHeaderText { len });
        }
        Ok(Self {
            text,
            version: Self::DEFAULT_VERSION,
            endianness: Endianness::NATIVE,
        })
    }

    /// True when the file was written on a machine of the opposite byte order.
    pub fn requires_swap(&self) -> bool {
        self.endianness.requires_swap()
    }
}

/// Data kind of a tagged element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Single,
    Double,
    Int64,
    UInt64,
    Matrix,
    Compressed,
    Utf8,
    Utf16,
    Utf32,
    /// A code outside the known table.
    Unknown(u32),
}

impl DataKind {
    /// Numeric code stored in the tag.
    pub fn code(self) -> u32 {
        match self {
            DataKind::Int8 => 1,
            DataKind::UInt8 => 2,
            DataKind::Int16 => 3,
            DataKind::UInt16 => 4,
            DataKind::Int32 => 5,
            DataKind::UInt32 => 6,
            DataKind::Single => 7,
            DataKind::Double => 9,
            DataKind::Int64 => 12,
            DataKind::UInt64 => 13,
            DataKind::Matrix => 14,
            DataKind::Compressed => 15,
            DataKind::Utf8 => 16,
            DataKind::Utf16 => 17,
            DataKind::Utf32 => 18,
            DataKind::Unknown(code) => code,
        }
    }

    /// Returns the size in bytes of one value of this kind.
    ///
    /// `None` for containers, text kinds and unknown codes.
    pub fn size(self) -> Option<usize> {
        match self {
            DataKind::Int8 | DataKind::UInt8 => Some(1),
            DataKind::Int16 | DataKind::UInt16 => Some(2),
            DataKind::Int32 | DataKind::UInt32 | DataKind::Single => Some(4),
            DataKind::Double | DataKind::Int64 | DataKind::UInt64 => Some(8),
            _ => None,
        }
    }
}

impl From<u32> for DataKind {
    fn from(code: u32) -> Self {
        match code {
            1 => DataKind::Int8,
            2 => DataKind::UInt8,
            3 => DataKind::Int16,
            4 => DataKind::UInt16,
            5 => DataKind::Int32,
            6 => DataKind::UInt32,
            7 => DataKind::Single,
            9 => DataKind::Double,
            12 => DataKind::Int64,
            13 => DataKind::UInt64,
            14 => DataKind::Matrix,
            15 => DataKind::Compressed,
            16 => DataKind::Utf8,
            17 => DataKind::Utf16,
            18 => DataKind::Utf32,
            other => DataKind::Unknown(other),
        }
    }
}

/// The `(kind, byte length)` pair prefixing every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementTag {
    pub kind: DataKind,
    /// Length of the payload in bytes, excluding the tag and padding.
    pub byte_len: u32,
}

impl ElementTag {
    pub fn new(kind: DataKind, byte_len: u32) -> Self {
        Self { kind, byte_len }
    }

    /// Number of values in the payload, if the kind has a fixed value size.
    pub fn value_count(&self) -> Option<usize> {
        self.kind.size().map(|size| self.byte_len as usize / size)
    }

    /// Padding following the payload.
    ///
    /// Payloads of at most 4 bytes are padded up to 4 bytes (the packed form),
    /// longer payloads up to the next multiple of 8.
    pub fn padding(&self) -> usize {
        let len = self.byte_len as usize;
        if len <= 4 { 4 - len } else { (8 - len % 8) % 8 }
    }
}

/// How a tag was laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {
    /// 4-byte packed tag: kind in the low half-word, length in the high half-word.
    Small,
    /// 8-byte tag: kind word followed by length word.
    Normal,
}

impl TagFormat {
    /// Largest payload that may use the packed form.
    pub const SMALL_MAX_LEN: u32 = 4;

    /// Size of the tag itself in bytes.
    pub fn tag_len(self) -> u64 {
        match self {
            TagFormat::Small => 4,
            TagFormat::Normal => 8,
        }
    }

    /// Padding following a payload introduced by a tag of this format.
    ///
    /// Agrees with [`ElementTag::padding`] for every packed tag and for
    /// normal tags whose payload exceeds 4 bytes; a normal tag with a short
    /// payload is still aligned to the next 8-byte boundary.
    pub fn padding(self, tag: &ElementTag) -> usize {
        match self {
            TagFormat::Small => tag.padding(),
            TagFormat::Normal => (8 - tag.byte_len as usize % 8) % 8,
        }
    }
}

/// Array class stored in the low byte of the array-flags word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayClass {
    Cell,
    Struct,
    Object,
    Char,
    Sparse,
    Double,
    Single,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Unknown(u8),
}

impl ArrayClass {
    pub fn code(self) -> u8 {
        match self {
            ArrayClass::Cell => 1,
            ArrayClass::Struct => 2,
            ArrayClass::Object => 3,
            ArrayClass::Char => 4,
            ArrayClass::Sparse => 5,
            ArrayClass::Double => 6,
            ArrayClass::Single => 7,
            ArrayClass::Int8 => 8,
            ArrayClass::UInt8 => 9,
            ArrayClass::Int16 => 10,
            ArrayClass::UInt16 => 11,
            ArrayClass::Int32 => 12,
            ArrayClass::UInt32 => 13,
            ArrayClass::Int64 => 14,
            ArrayClass::UInt64 => 15,
            ArrayClass::Unknown(code) => code,
        }
    }

    /// True for the real numeric classes this crate can materialize.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ArrayClass::Double
                | ArrayClass::Single
                | ArrayClass::Int8
                | ArrayClass::UInt8
                | ArrayClass::Int16
                | ArrayClass::UInt16
                | ArrayClass::Int32
                | ArrayClass::UInt32
                | ArrayClass::Int64
                | ArrayClass::UInt64
        )
    }

    /// True for classes stored as a plain numeric values sub-element.
    ///
    /// Character arrays qualify: their code units decode like any integer array.
    pub fn has_numeric_values(self) -> bool {
        self.is_numeric() || self == ArrayClass::Char
    }
}

impl From<u8> for ArrayClass {
    fn from(code: u8) -> Self {
        match code {
            1 => ArrayClass::Cell,
            2 => ArrayClass::Struct,
            3 => ArrayClass::Object,
            4 => ArrayClass::Char,
            5 => ArrayClass::Sparse,
            6 => ArrayClass::Double,
            7 => ArrayClass::Single,
            8 => ArrayClass::Int8,
            9 => ArrayClass::UInt8,
            10 => ArrayClass::Int16,
            11 => ArrayClass::UInt16,
            12 => ArrayClass::Int32,
            13 => ArrayClass::UInt32,
            14 => ArrayClass::Int64,
            15 => ArrayClass::UInt64,
            other => ArrayClass::Unknown(other),
        }
    }
}

/// Array flags parsed from the first sub-element of a matrix.
///
/// The flags word packs:
/// - Bit 11 (0x0800): complex
/// - Bit 10 (0x0400): global
/// - Bit 9 (0x0200): logical
/// - Low byte: array class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayFlags {
    pub complex: bool,
    pub global: bool,
    pub logical: bool,
    pub class: ArrayClass,
}

impl ArrayFlags {
    pub const COMPLEX: u32 = 0x0800;
    pub const GLOBAL: u32 = 0x0400;
    pub const LOGICAL: u32 = 0x0200;

    pub fn new(class: ArrayClass) -> Self {
        Self {
            complex: false,
            global: false,
            logical: false,
            class,
        }
    }

    pub fn from_word(word: u32) -> Self {
        Self {
            complex: word & Self::COMPLEX != 0,
            global: word & Self::GLOBAL != 0,
            logical: word & Self::LOGICAL != 0,
            class: ArrayClass::from((word & 0xFF) as u8),
        }
    }

    pub fn to_word(self) -> u32 {
        let mut word = self.class.code() as u32;
        if self.complex {
            word |= Self::COMPLEX;
        }
        if self.global {
            word |= Self::GLOBAL;
        }
        if self.logical {
            word |= Self::LOGICAL;
        }
        word
    }
}

/// Everything describing a matrix except its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixHeader {
    pub flags: ArrayFlags,
    /// One size per axis.
    pub dimensions: Vec<usize>,
    pub name: String,
}

/// Outcome of reading one top-level element.
#[derive(Debug, Clone, PartialEq)]
pub enum NextElement {
    /// A numeric matrix was decoded.
    Matrix(MatrixElement),
    /// The element at this position is of no interest; it has been skipped.
    Skipped(ElementTag),
    /// No further element exists.
    End,
}

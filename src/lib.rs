//! # mat-reader
//!
//! A streaming reader for MATLAB Level-5 MAT-files.
//! Decodes numeric matrices element by element, inflating compressed
//! elements transparently and honouring the byte order declared in the header.
//!
//! **Note:** Cell, struct, object, sparse and complex arrays are reported as
//! unsupported. Character arrays decode to their code units.
pub mod mat;

// Re-export the main types for convenience
pub use mat::{
    BinaryRead,
    MatError,
    MatReader,
    MatWriter,
    Matrices,
    MatrixElement,
    NumericData,
    Result,
    types::models::{
        ArrayClass,
        ArrayFlags,
        DataKind,
        ElementTag,
        Endianness,
        MatHeader,
        MatrixHeader,
        NextElement,
        TagFormat,
    },
};

//! Core MAT-file reader module

pub mod codec;
pub mod format;
pub mod iter;
pub mod reader;
pub mod types;
pub mod utils;
pub mod writer;

pub use codec::binary::BinaryRead;
pub use iter::Matrices;
pub use reader::MatReader;
pub use types::error::{MatError, Result};
pub use types::matrix::MatrixElement;
pub use writer::{MatWriter, NumericData};

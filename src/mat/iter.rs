//! Iterator over the numeric matrices of a MAT-file.
//!
//! # Example
//! ```no_run
//! # use mat_reader::MatReader;
//! let mut reader = MatReader::open("data.mat", None).unwrap();
//! for result in reader.matrices() {
//!     let matrix = result.unwrap();
//!     println!("{}: {:?}", matrix.name(), matrix.dimensions());
//! }
//! ```

use std::io::{Read, Seek};
use std::iter::FusedIterator;

use super::reader::MatReader;
use super::types::error::Result;
use super::types::matrix::MatrixElement;
use super::types::models::NextElement;

/// Iterator yielding each numeric matrix in turn.
///
/// Elements that are not matrices are skipped. Iteration stops at the end of
/// the stream or after yielding the first error.
///
/// Created by [`MatReader::matrices()`](crate::MatReader::matrices).
pub struct Matrices<'a, R> {
    reader: &'a mut MatReader<R>,
    finished: bool,
}

impl<'a, R: Read + Seek> Matrices<'a, R> {
    pub(super) fn new(reader: &'a mut MatReader<R>) -> Self {
        Self {
            reader,
            finished: false,
        }
    }
}

impl<R: Read + Seek> Iterator for Matrices<'_, R> {
    type Item = Result<MatrixElement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.reader.read_next_element() {
                Ok(NextElement::Matrix(element)) => return Some(Ok(element)),
                Ok(NextElement::Skipped(_)) => continue,
                Ok(NextElement::End) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: Read + Seek> FusedIterator for Matrices<'_, R> {}

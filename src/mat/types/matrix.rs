//! Decoded numeric matrices and their indexing.

use super::error::{MatError, Result};
use super::models::{ArrayClass, ArrayFlags, ElementTag, MatrixHeader};

/// A numeric matrix decoded from a `MiMatrix` element.
///
/// Values are always materialized as `f64`, whatever kind they were stored
/// as, and kept in the file's column-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixElement {
    tag: ElementTag,
    header: MatrixHeader,
    values: Vec<f64>,
}

impl MatrixElement {
    /// Builds a matrix, checking that the value count matches the dimensions.
    ///
    /// # Errors
    /// Returns [`MatError::DimensionMismatch`] if `values.len()` differs from
    /// the product of `header.dimensions`, or [`MatError::MalformedElement`]
    /// if that product overflows.
    pub fn new(tag: ElementTag, header: MatrixHeader, values: Vec<f64>) -> Result<Self> {
        let expected = header
            .dimensions
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| {
                MatError::MalformedElement(format!(
                    "Dimensions {:?} describe more values than can be addressed",
                    header.dimensions
                ))
            })?;
        if expected != values.len() {
            return Err(MatError::DimensionMismatch {
                expected,
                found: values.len(),
            });
        }
        Ok(Self { tag, header, values })
    }

    /// The `MiMatrix` tag this element was read from.
    pub fn tag(&self) -> &ElementTag {
        &self.tag
    }

    pub fn header(&self) -> &MatrixHeader {
        &self.header
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn flags(&self) -> ArrayFlags {
        self.header.flags
    }

    pub fn class(&self) -> ArrayClass {
        self.header.flags.class
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.header.dimensions
    }

    pub fn num_dimensions(&self) -> usize {
        self.header.dimensions.len()
    }

    /// All values in column-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a flat, column-major index.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(MatError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// Value at a per-axis coordinate.
    ///
    /// A `1×N` row vector is addressed as `(0, j)`, an `N×1` column vector as `(i, 0)`.
    pub fn get_at(&self, coords: &[usize]) -> Result<f64> {
        let index = self.linear_index(coords)?;
        self.get(index)
    }

    /// Converts a coordinate to a flat index using column-major strides.
    ///
    /// `index = c0 + c1·d0 + c2·d0·d1 + …`
    pub fn linear_index(&self, coords: &[usize]) -> Result<usize> {
        let dims = &self.header.dimensions;
        if coords.len() != dims.len() {
            return Err(MatError::CoordinateCount {
                expected: dims.len(),
                found: coords.len(),
            });
        }

        let mut index = 0;
        let mut stride = 1;
        for (axis, (&coordinate, &size)) in coords.iter().zip(dims).enumerate() {
            if coordinate >= size {
                return Err(MatError::CoordinateOutOfRange {
                    axis,
                    coordinate,
                    size,
                });
            }
            index += coordinate * stride;
            stride *= size;
        }
        Ok(index)
    }
}

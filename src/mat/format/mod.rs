//! File format parsing layer for MAT-files.
//!
//! This module provides the mid-level parsing layer that bridges between
//! the primitive reads of [`BinaryRead`](crate::mat::codec::binary::BinaryRead)
//! and the high-level [`MatReader`](crate::mat::reader::MatReader).
//!
//! # Module Organization
//!
//! - [`header`]: Parses the 128-byte preamble and derives the byte order
//! - [`tag`]: Decodes normal and packed element tags
//! - [`matrix`]: Assembles numeric matrices from their four sub-elements
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header         │ ← header::parse()
//! ├─────────────────┤
//! │  Element tag    │ ← tag::read()
//! │  Element body   │ ← matrix::read() (possibly inside MiCompressed)
//! ├─────────────────┤
//! │  Element tag    │
//! │  ...            │
//! └─────────────────┘
//! ```

pub mod header;
pub mod matrix;
pub mod tag;

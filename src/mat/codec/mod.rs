//! Codec layer for byte order, text and compression.
//!
//! This module provides the primitives every format parser is built on.
//!
//! # Submodules
//!
//! - [`binary`][]: The `BinaryRead` contract with typed reads on top of raw bytes
//! - [`byte_order`][]: Fixed-width numeric decoding in either byte order
//! - [`text`][]: Character decoding via `encoding_rs`
//! - [`compression`][]: The decompression gate for `MiCompressed` spans

pub mod binary;
pub mod byte_order;
pub mod compression;
pub mod text;

//! Byte-level encoding/decoding shared by every codec.
//!
//! This module holds the wire building blocks: byte order selection,
//! bounded readers and writers, and binary16 conversion.

pub mod endian;
pub mod half;
pub mod primitives;

pub use endian::{Endianness, FixedWidth};
pub use primitives::{Reader, Writer};

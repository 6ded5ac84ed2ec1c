//! headers/mod.rs
//! Compression tag: one byte that tells a receiver which algorithm and
//! level produced a compressed chunk.
//!
//! Layout:
//! - bits 0..4: normalized level (0..=15)
//! - bit 4 (`0x10`): lz4
//! - bit 6 (`0x40`): brotli
//! - no flag bit: zlib
//!
//! Decode priority is lz4, then brotli, then the zlib fallback. The order is
//! part of the wire format and must not change.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;

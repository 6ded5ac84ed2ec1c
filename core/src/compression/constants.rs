//! compression/constants.rs
//! Stable algorithm names, preference orders and size limits.

use crate::compression::types::Algorithm;

/// Inputs at or below this many bytes are never compressed.
pub const MIN_COMPRESS_SIZE: usize = 378;

/// Hard ceiling on compress input and decompress output (256 MiB).
pub const MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

/// Brotli inputs above this size are capped at a faster quality.
pub const BROTLI_LARGE_INPUT: usize = 1024 * 1024;

/// Default level used by `WrapOptions::default()`.
pub const DEFAULT_LEVEL: u8 = 5;

/// Canonical wire names.
pub mod names {
    pub const NONE: &str = "none";
    pub const LZ4: &str = "lz4";
    pub const ZLIB: &str = "zlib";
    pub const BROTLI: &str = "brotli";
}

/// Every algorithm we know about, in best compatibility order.
/// Capability export iterates in this order.
pub const ALL_COMPRESSORS: [Algorithm; 4] = [
    Algorithm::Lz4,
    Algorithm::Zlib,
    Algorithm::Brotli,
    Algorithm::None,
];

/// Order for performance, including the pass-through backend.
pub const PERFORMANCE_ORDER: [Algorithm; 4] = [
    Algorithm::None,
    Algorithm::Lz4,
    Algorithm::Zlib,
    Algorithm::Brotli,
];

/// Order for performance when compression is required (no `none`).
pub const PERFORMANCE_COMPRESSION: [Algorithm; 3] = [
    Algorithm::Lz4,
    Algorithm::Zlib,
    Algorithm::Brotli,
];

/// Environment variable prefix for registry configuration and backend toggles.
pub const ENV_PREFIX: &str = "WIREPACK";

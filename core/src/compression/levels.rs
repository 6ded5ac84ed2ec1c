//! compression/levels.rs
//! Per-algorithm level normalization.
//!
//! These rules are shared with every other implementation of the protocol
//! and must be reproduced exactly.

use crate::compression::constants::BROTLI_LARGE_INPUT;
use crate::compression::types::Algorithm;
use crate::headers::MAX_TAG_LEVEL;

/// Level stored in the tag for `algorithm` given the caller's raw level.
pub fn normalize_level(algorithm: Algorithm, level: u8, input_len: usize) -> u8 {
    match algorithm {
        Algorithm::None   => 0,
        Algorithm::Zlib   => level.clamp(1, 9),
        Algorithm::Lz4    => level.min(MAX_TAG_LEVEL),
        Algorithm::Brotli => {
            if input_len > BROTLI_LARGE_INPUT {
                level.min(9)
            } else {
                level.min(11)
            }
        }
    }
}

/// LZ4 acceleration for a raw level: `max(0, 5 - level / 3)`.
pub fn lz4_acceleration(level: u8) -> i32 {
    (5 - i32::from(level) / 3).max(0)
}

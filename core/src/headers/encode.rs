//! headers/encode.rs
//! Tag encoding.

use crate::compression::Algorithm;
use crate::headers::types::{flag_for, flags};

/// Build the wire tag for an already-normalized level.
///
/// The level is masked to the low nibble. `none` always encodes as 0.
#[inline]
pub fn encode_tag(algorithm: Algorithm, level: u8) -> u8 {
    match algorithm {
        Algorithm::None => 0,
        Algorithm::Zlib | Algorithm::Lz4 | Algorithm::Brotli => {
            (level & flags::LEVEL_MASK) | flag_for(algorithm)
        }
    }
}

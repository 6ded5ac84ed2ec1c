//! headers/types.rs
//! Flag bits and the decoded view of a tag.

use crate::compression::Algorithm;

/// Flag bit values. The level occupies the low nibble, flags never overlap it.
pub mod flags {
    pub const LEVEL_MASK: u8  = 0x0F;
    pub const ZLIB_FLAG: u8   = 0x00;
    pub const LZ4_FLAG: u8    = 0x10;
    pub const BROTLI_FLAG: u8 = 0x40;
}

/// Highest level a tag can carry.
pub const MAX_TAG_LEVEL: u8 = flags::LEVEL_MASK;

/// Algorithm and level recovered from a tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TagInfo {
    pub algorithm: Algorithm,
    pub level: u8,
}

/// Reserved flag bit for `algorithm`, zero when it has none.
pub const fn flag_for(algorithm: Algorithm) -> u8 {
    match algorithm {
        Algorithm::None   => 0,
        Algorithm::Zlib   => flags::ZLIB_FLAG,
        Algorithm::Lz4    => flags::LZ4_FLAG,
        Algorithm::Brotli => flags::BROTLI_FLAG,
    }
}

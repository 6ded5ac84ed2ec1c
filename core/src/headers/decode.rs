//! headers/decode.rs
//! Tag decoding.

use crate::compression::Algorithm;
use crate::headers::types::{flags, TagInfo};

/// Recover the algorithm from a tag.
///
/// lz4 is checked first, then brotli, and anything else is zlib, even when
/// zlib was never loaded locally. Dispatch then fails with
/// `CodecUnavailable`, not here.
#[inline]
pub fn decode_algorithm(tag: u8) -> Algorithm {
    if tag & flags::LZ4_FLAG != 0 {
        Algorithm::Lz4
    } else if tag & flags::BROTLI_FLAG != 0 {
        Algorithm::Brotli
    } else {
        Algorithm::Zlib
    }
}

#[inline]
pub fn decode_tag(tag: u8) -> TagInfo {
    TagInfo {
        algorithm: decode_algorithm(tag),
        level: tag & flags::LEVEL_MASK,
    }
}

/// Name of the algorithm a tag refers to.
pub fn get_compression_type(tag: u8) -> &'static str {
    decode_algorithm(tag).name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::encode_tag;

    #[test]
    fn lz4_wins_over_brotli() {
        let tag = flags::LZ4_FLAG | flags::BROTLI_FLAG | 3;
        assert_eq!(decode_algorithm(tag), Algorithm::Lz4);
    }

    #[test]
    fn bare_level_is_zlib() {
        for level in 0..=15u8 {
            assert_eq!(decode_algorithm(level), Algorithm::Zlib);
        }
        // Unknown high bits still fall back.
        assert_eq!(decode_algorithm(0x20 | 4), Algorithm::Zlib);
        assert_eq!(decode_algorithm(0x80), Algorithm::Zlib);
    }

    #[test]
    fn none_encodes_as_zero() {
        assert_eq!(encode_tag(Algorithm::None, 7), 0);
    }

    #[test]
    fn type_names() {
        assert_eq!(get_compression_type(0x16), "lz4");
        assert_eq!(get_compression_type(0x4B), "brotli");
        assert_eq!(get_compression_type(0x06), "zlib");
    }
}

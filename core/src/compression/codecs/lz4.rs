//! codecs/lz4.rs
//! LZ4 block codec with a 4-byte little-endian size prefix.
//!
//! Compression goes through liblz4 (`lz4` crate) because the protocol maps
//! levels onto LZ4 acceleration. Decompression uses the pure Rust decoder in
//! `lz4_flex`, which never writes past the size it was given.
use byteorder::{ByteOrder, LittleEndian};
use lz4::block::CompressionMode;

use crate::compression::codecs::WRAPPER_VERSION;
use crate::compression::levels::{lz4_acceleration, normalize_level};
use crate::compression::types::{Algorithm, Codec, CompressionError};
use crate::headers::encode_tag;

const SIZE_PREFIX_LEN: usize = 4;

pub struct Lz4Codec {
    library_version: String,
}

impl Lz4Codec {
    /// Probe liblz4 and build the codec.
    ///
    /// # Errors
    /// - `CompressionError::CodecInitFailed` if the library reports no usable version.
    pub fn new() -> Result<Self, CompressionError> {
        let raw = lz4::liblz4::version();
        if raw <= 0 {
            return Err(CompressionError::CodecInitFailed {
                codec: "lz4".into(),
                msg: format!("unexpected liblz4 version number {}", raw),
            });
        }
        Ok(Self { library_version: format_version(raw) })
    }
}

/// liblz4 encodes its version as `major * 10000 + minor * 100 + release`.
fn format_version(raw: i32) -> String {
    format!("{}.{}.{}", raw / 10_000, (raw / 100) % 100, raw % 100)
}

impl Codec for Lz4Codec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Lz4
    }

    fn library_version(&self) -> Option<String> {
        Some(self.library_version.clone())
    }

    fn wrapper_version(&self) -> Option<String> {
        Some(WRAPPER_VERSION.to_string())
    }

    fn compress(&self, data: &[u8], level: u8) -> Result<(u8, Vec<u8>), CompressionError> {
        let mode = CompressionMode::FAST(lz4_acceleration(level));
        let compressed = lz4::block::compress(data, Some(mode), true)
            .map_err(|e| CompressionError::process(Algorithm::Lz4, e))?;
        let tag = encode_tag(Algorithm::Lz4, normalize_level(Algorithm::Lz4, level, data.len()));
        Ok((tag, compressed))
    }

    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError> {
        if data.len() < SIZE_PREFIX_LEN {
            return Err(CompressionError::corrupt(Algorithm::Lz4, "missing size prefix"));
        }
        let declared = LittleEndian::read_u32(&data[..SIZE_PREFIX_LEN]) as usize;
        if declared > max_size {
            return Err(CompressionError::PayloadTooLarge { actual: declared, limit: max_size });
        }

        // Every lz4_flex decode error is malformed input, including blocks
        // that expand past the declared size.
        let decompressed = lz4_flex::block::decompress(&data[SIZE_PREFIX_LEN..], declared)
            .map_err(|e| CompressionError::corrupt(Algorithm::Lz4, e.to_string()))?;
        if decompressed.len() != declared {
            return Err(CompressionError::corrupt(
                Algorithm::Lz4,
                format!("decoded size {} != prefix {}", decompressed.len(), declared),
            ));
        }
        Ok(decompressed)
    }
}

//! compression/dispatch.rs
//! Routes compressed bytes to the backend named by their tag.
use tracing::debug;

use crate::compression::registry::{self, CodecRegistry};
use crate::compression::types::{Algorithm, CompressionError};
use crate::headers::decode_algorithm;

impl CodecRegistry {
    /// Decompress using the algorithm encoded in `tag`.
    pub fn decompress(&self, data: &[u8], tag: u8) -> Result<Vec<u8>, CompressionError> {
        self.decompress_with(data, decode_algorithm(tag))
    }

    /// Decompress with an explicitly named algorithm.
    ///
    /// # Errors
    /// - `CodecUnavailable` if `name` is unknown or was never loaded here.
    /// - `PayloadTooLarge` if the output would exceed the ceiling.
    /// - `CorruptStream` if the stream is truncated or has trailing bytes.
    pub fn decompress_by_name(&self, data: &[u8], name: &str) -> Result<Vec<u8>, CompressionError> {
        let algorithm = Algorithm::from_name(name).ok_or_else(|| CompressionError::unavailable(name))?;
        self.decompress_with(data, algorithm)
    }

    fn decompress_with(&self, data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, CompressionError> {
        let codec = self.get(algorithm).ok_or_else(|| CompressionError::unavailable(algorithm))?;
        codec
            .decompress(data, self.max_decompressed_size())
            .inspect_err(|e| debug!(codec = algorithm.name(), size = data.len(), error = %e, "decompression failed"))
    }
}

/// Decompress through the process-wide registry.
pub fn decompress(data: &[u8], tag: u8) -> Result<Vec<u8>, CompressionError> {
    registry::global().decompress(data, tag)
}

pub fn decompress_by_name(data: &[u8], name: &str) -> Result<Vec<u8>, CompressionError> {
    registry::global().decompress_by_name(data, name)
}

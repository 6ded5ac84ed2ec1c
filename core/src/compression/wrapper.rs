//! compression/wrapper.rs
//! Decides between sending data raw and sending it compressed.
//!
//! Decision order:
//! 1. at or below `min_compress_size`: raw, no backend touched
//! 2. above `max_decompressed_size`: `PayloadTooLarge`, no backend touched
//! 3. no requested algorithm available locally: raw
//! 4. compressed output not smaller than input length + `min_saving`: raw
//! 5. otherwise encoded
use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use crate::compression::constants::{DEFAULT_LEVEL, PERFORMANCE_COMPRESSION};
use crate::compression::payload::{CompressStrategy, EncodedPayload, Payload};
use crate::compression::registry::{self, CodecRegistry};
use crate::compression::types::{Algorithm, AlgorithmSet, CompressionError};

/// Per-call options for `compressed_wrapper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// Raw level, normalized by the chosen backend.
    pub level: u8,
    pub inlineable: bool,
    /// Algorithms the caller accepts, typically the peer's advertised set.
    pub requested: AlgorithmSet,
    /// Added to the input length before the size comparison: output is kept
    /// only while `compressed < len + min_saving`.
    pub min_saving: usize,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            inlineable: true,
            requested: AlgorithmSet::empty(),
            min_saving: 0,
        }
    }
}

impl WrapOptions {
    pub fn new(requested: impl Into<AlgorithmSet>) -> Self {
        Self { requested: requested.into(), ..Self::default() }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn inlineable(mut self, inlineable: bool) -> Self {
        self.inlineable = inlineable;
        self
    }

    pub fn min_saving(mut self, min_saving: usize) -> Self {
        self.min_saving = min_saving;
        self
    }
}

impl CodecRegistry {
    /// First algorithm in performance order that is both requested and loaded.
    pub fn select_algorithm(&self, requested: AlgorithmSet) -> Option<Algorithm> {
        PERFORMANCE_COMPRESSION
            .iter()
            .copied()
            .find(|a| requested.wants(*a) && self.contains(*a))
    }

    /// Wrap `data` as a raw or encoded payload.
    ///
    /// # Errors
    /// - `PayloadTooLarge` if `data` exceeds the decompression ceiling.
    /// - Any error the chosen backend reports while compressing.
    pub fn compressed_wrapper(
        &self,
        datatype: impl Into<String>,
        data: impl Into<Bytes>,
        opts: &WrapOptions,
    ) -> Result<Payload, CompressionError> {
        let datatype = datatype.into();
        let data = data.into();
        let size = data.len();

        if size <= self.min_compress_size() {
            trace!(datatype = %datatype, size, "below compression threshold");
            return Ok(Payload::raw(datatype, data, opts.inlineable));
        }
        if size > self.max_decompressed_size() {
            return Err(CompressionError::PayloadTooLarge {
                actual: size,
                limit: self.max_decompressed_size(),
            });
        }

        let Some((algorithm, codec)) = self
            .select_algorithm(opts.requested)
            .and_then(|a| self.get(a).map(|c| (a, Arc::clone(c))))
        else {
            trace!(datatype = %datatype, requested = ?opts.requested, "no compressor available");
            return Ok(Payload::raw(datatype, data, opts.inlineable));
        };

        let (tag, compressed) = codec.compress(&data, opts.level)?;
        if compressed.len() >= size.saturating_add(opts.min_saving) {
            trace!(
                datatype = %datatype,
                codec = algorithm.name(),
                size,
                compressed = compressed.len(),
                "compression not beneficial"
            );
            return Ok(Payload::raw(datatype, data, opts.inlineable));
        }

        trace!(datatype = %datatype, codec = algorithm.name(), size, compressed = compressed.len(), tag);
        Ok(Payload::Encoded(EncodedPayload {
            datatype,
            data: Bytes::from(compressed),
            level: tag,
            algorithm,
            inlineable: opts.inlineable,
        }))
    }
}

/// Wrap through the process-wide registry.
pub fn compressed_wrapper(
    datatype: impl Into<String>,
    data: impl Into<Bytes>,
    opts: &WrapOptions,
) -> Result<Payload, CompressionError> {
    registry::global().compressed_wrapper(datatype, data, opts)
}

/// `CompressStrategy` backed by a registry and fixed options.
#[derive(Debug, Clone)]
pub struct WrapStrategy {
    registry: Arc<CodecRegistry>,
    opts: WrapOptions,
}

impl WrapStrategy {
    pub fn new(registry: Arc<CodecRegistry>, opts: WrapOptions) -> Self {
        Self { registry, opts }
    }

    /// Strategy over whatever registry is published right now.
    pub fn global(opts: WrapOptions) -> Self {
        Self::new(registry::global(), opts)
    }
}

impl CompressStrategy for WrapStrategy {
    fn compress(&self, datatype: &str, data: Bytes) -> Result<Payload, CompressionError> {
        self.registry.compressed_wrapper(datatype, data, &self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none_only() -> CodecRegistry {
        CodecRegistry::builder().min_compress_size(8).build()
    }

    #[test]
    fn select_skips_unrequested_and_missing() {
        let reg = CodecRegistry::init(["none", "zlib"], |_| true);
        assert_eq!(reg.select_algorithm(AlgorithmSet::empty()), None);
        assert_eq!(reg.select_algorithm(AlgorithmSet::all()), reg.enabled(&PERFORMANCE_COMPRESSION).first().copied());
    }

    #[test]
    fn empty_registry_falls_back_to_raw() {
        let reg = none_only();
        let payload = reg.compressed_wrapper("text", vec![0u8; 100], &WrapOptions::new(AlgorithmSet::all())).unwrap();
        assert!(!payload.is_encoded());
        assert_eq!(payload.len(), 100);
    }

    #[test]
    fn too_large_fails_before_selection() {
        let reg = CodecRegistry::builder().min_compress_size(1).max_decompressed_size(16).build();
        let err = reg.compressed_wrapper("x", vec![0u8; 17], &WrapOptions::default()).unwrap_err();
        assert!(matches!(err, CompressionError::PayloadTooLarge { actual: 17, limit: 16 }));
    }

    #[test]
    fn options_builder() {
        let opts = WrapOptions::new(Algorithm::Zlib).level(9).inlineable(false).min_saving(32);
        assert_eq!(opts.requested, AlgorithmSet::ZLIB);
        assert_eq!(opts.level, 9);
        assert!(!opts.inlineable);
        assert_eq!(opts.min_saving, 32);
    }
}

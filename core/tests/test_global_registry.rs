// Process-wide registry lifecycle.
//
// Everything touching the global lives in one test so parallel test threads
// never observe each other's init/shutdown.

#![cfg(all(feature = "lz4", feature = "zlib", feature = "brotli"))]

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use wirepack_core::compression::{
        compressed_wrapper, decompress, decompress_by_name,
        payload::{Compressible, LargeStructure},
        registry, Algorithm, AlgorithmSet, CompressionError, RegistryConfig, WrapOptions, WrapStrategy,
        ALL_COMPRESSORS, MAX_DECOMPRESSED_SIZE, PERFORMANCE_COMPRESSION, PERFORMANCE_ORDER,
    };

    #[test]
    fn init_use_shutdown() {
        // Before init: nothing is available and dispatch reports it.
        registry::shutdown();
        assert!(!registry::use_algorithm("zlib"));
        assert!(registry::get_enabled_compressors(&PERFORMANCE_ORDER).is_empty());
        assert!(registry::get_compression_caps(false).is_empty());
        let err = decompress_by_name(b"abc", "zlib").unwrap_err();
        assert!(matches!(err, CompressionError::CodecUnavailable { .. }));

        // Partial init, with a toggle rejecting brotli.
        let config = RegistryConfig {
            min_compress_size: 64,
            algorithms: vec!["zlib".into(), "brotli".into(), "lz4".into()],
            ..RegistryConfig::default()
        };
        let reg = registry::init_with(&config, |name| name != "brotli");
        assert_eq!(reg.min_compress_size(), 64);
        assert!(registry::use_algorithm("lz4"));
        assert!(registry::use_algorithm("ZLIB"));
        assert!(!registry::use_algorithm("brotli"));
        assert!(!registry::use_algorithm("none"));
        assert_eq!(
            registry::get_enabled_compressors(&PERFORMANCE_COMPRESSION),
            vec![Algorithm::Lz4, Algorithm::Zlib]
        );
        assert_eq!(
            registry::get_compression_caps(false).algorithms(),
            vec![Algorithm::Lz4, Algorithm::Zlib]
        );

        // Direct compressor access.
        let zlib = registry::get_compressor("zlib").unwrap();
        let (tag, compressed) = zlib(&[7u8; 1000][..], 3).unwrap();
        assert_eq!(tag, 3);
        assert_eq!(decompress(&compressed, tag).unwrap(), vec![7u8; 1000]);
        assert!(matches!(
            registry::get_compressor("brotli"),
            Err(CompressionError::CodecUnavailable { .. })
        ));

        // Free-function wrapper against the published registry.
        let payload = compressed_wrapper("text", vec![b'a'; 4096], &WrapOptions::new(AlgorithmSet::all())).unwrap();
        let encoded = payload.as_encoded().unwrap();
        assert_eq!(encoded.algorithm, Algorithm::Lz4);
        assert_eq!(decompress_by_name(&encoded.data, "lz4").unwrap(), vec![b'a'; 4096]);

        // Deferred compression through the global strategy.
        let strategy = WrapStrategy::global(WrapOptions::new(Algorithm::Zlib).level(9));
        let deferred = Compressible::new(LargeStructure::new("icon", Bytes::from(vec![0u8; 2048])), strategy);
        assert_eq!(deferred.datatype(), "icon");
        let payload = deferred.compress().unwrap();
        assert_eq!(payload.as_encoded().map(|e| (e.algorithm, e.level)), Some((Algorithm::Zlib, 9)));

        // A held Arc survives shutdown; new lookups do not.
        registry::shutdown();
        assert!(reg.is_available("zlib"));
        assert!(!registry::use_algorithm("zlib"));
        assert!(matches!(decompress(&compressed, tag), Err(CompressionError::CodecUnavailable { .. })));

        // Re-init is allowed and replaces the registry wholesale.
        let full = registry::init(["lz4", "zlib", "brotli", "none"], |_| true);
        assert_eq!(full.len(), 4);
        assert_eq!(registry::get_compression_caps(false).algorithms().len(), 4);

        // init_all: limits from WIREPACK_* vars, every backend unless toggled off.
        std::env::set_var("WIREPACK_MIN_COMPRESS_SIZE", "32");
        std::env::set_var("WIREPACK_BROTLI", "off");
        let all = registry::init_all();
        std::env::remove_var("WIREPACK_MIN_COMPRESS_SIZE");
        std::env::remove_var("WIREPACK_BROTLI");
        assert_eq!(all.min_compress_size(), 32);
        assert_eq!(all.max_decompressed_size(), MAX_DECOMPRESSED_SIZE);
        assert_eq!(
            registry::get_enabled_compressors(&ALL_COMPRESSORS),
            vec![Algorithm::Lz4, Algorithm::Zlib, Algorithm::None]
        );
        let payload = compressed_wrapper("small", vec![0u8; 40], &WrapOptions::new(Algorithm::Zlib)).unwrap();
        assert!(payload.is_encoded());
        registry::shutdown();
    }
}

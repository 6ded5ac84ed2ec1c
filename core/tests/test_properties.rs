// Properties of the wrapper/dispatcher pair over arbitrary inputs.

#![cfg(all(feature = "lz4", feature = "zlib", feature = "brotli"))]

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use wirepack_core::compression::{Algorithm, AlgorithmSet, CodecRegistry, Payload, WrapOptions};

    const TEST_MIN: usize = 64;
    const FLAGGED: [Algorithm; 3] = [Algorithm::Lz4, Algorithm::Zlib, Algorithm::Brotli];

    fn registry() -> CodecRegistry {
        CodecRegistry::builder()
            .min_compress_size(TEST_MIN)
            .load(["lz4", "zlib", "brotli", "none"], |_| true)
            .build()
    }

    /// Random bytes, optionally repeated so that most inputs compress.
    fn input() -> impl Strategy<Value = Vec<u8>> {
        (prop::collection::vec(any::<u8>(), 0..512), 1usize..16)
            .prop_map(|(chunk, times)| chunk.repeat(times))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_wrap_then_decompress(data in input(), idx in 0usize..3, level in 0u8..=15) {
            let reg = registry();
            let opts = WrapOptions::new(FLAGGED[idx]).level(level);
            match reg.compressed_wrapper("prop", data.clone(), &opts).unwrap() {
                Payload::Encoded(encoded) => {
                    prop_assert_eq!(encoded.algorithm, FLAGGED[idx]);
                    prop_assert!(encoded.data.len() < data.len());
                    prop_assert_eq!(reg.decompress(&encoded.data, encoded.level).unwrap(), data);
                }
                Payload::Raw(raw) => prop_assert_eq!(raw.data.as_ref(), data.as_slice()),
            }
        }

        #[test]
        fn prop_small_inputs_bypass(data in prop::collection::vec(any::<u8>(), 0..=TEST_MIN)) {
            let reg = registry();
            let payload = reg
                .compressed_wrapper("small", data.clone(), &WrapOptions::new(AlgorithmSet::all()))
                .unwrap();
            prop_assert!(!payload.is_encoded());
            prop_assert_eq!(payload.data().as_ref(), data.as_slice());
        }

        #[test]
        fn prop_truncated_streams_never_panic(data in input(), idx in 0usize..3, cut in any::<prop::sample::Index>()) {
            let reg = registry();
            if let Payload::Encoded(encoded) = reg.compressed_wrapper("prop", data, &WrapOptions::new(FLAGGED[idx])).unwrap() {
                let cut = cut.index(encoded.data.len());
                // Errors are fine, panics are not.
                let _ = reg.decompress(&encoded.data[..cut], encoded.level);
            }
        }
    }
}

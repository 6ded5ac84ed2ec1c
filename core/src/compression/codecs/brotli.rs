//! codecs/brotli.rs
//! Brotli via the pure Rust `brotli` crate.
use brotli::enc::{BrotliEncoderParams, StandardAlloc};
use brotli::{BrotliDecompressStream, BrotliResult, BrotliState};

use crate::compression::codecs::WRAPPER_VERSION;
use crate::compression::levels::normalize_level;
use crate::compression::types::{Algorithm, Codec, CompressionError};
use crate::headers::encode_tag;

/// Window size (log2), 20-22 recommended.
const LGWIN: i32 = 22;
const OUTPUT_CHUNK: usize = 4096;

pub struct BrotliCodec;

impl Codec for BrotliCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Brotli
    }

    fn library_version(&self) -> Option<String> {
        None
    }

    fn wrapper_version(&self) -> Option<String> {
        Some(WRAPPER_VERSION.to_string())
    }

    fn compress(&self, data: &[u8], level: u8) -> Result<(u8, Vec<u8>), CompressionError> {
        let quality = normalize_level(Algorithm::Brotli, level, data.len());
        let mut params = BrotliEncoderParams::default();
        params.quality = i32::from(quality);
        params.lgwin = LGWIN;

        let mut out = Vec::new();
        brotli::BrotliCompress(&mut &data[..], &mut out, &params)
            .map_err(|e| CompressionError::process(Algorithm::Brotli, e))?;
        Ok((encode_tag(Algorithm::Brotli, quality), out))
    }

    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError> {
        // Driven by hand so the input offset is known when the stream ends.
        let mut state = BrotliState::new(
            StandardAlloc::default(),
            StandardAlloc::default(),
            StandardAlloc::default(),
        );
        let mut available_in = data.len();
        let mut input_offset = 0;
        let mut total_out = 0;
        let mut chunk = vec![0u8; OUTPUT_CHUNK];
        let mut out = Vec::new();

        loop {
            let mut available_out = chunk.len();
            let mut output_offset = 0;
            let result = BrotliDecompressStream(
                &mut available_in,
                &mut input_offset,
                data,
                &mut available_out,
                &mut output_offset,
                &mut chunk,
                &mut total_out,
                &mut state,
            );
            out.extend_from_slice(&chunk[..output_offset]);
            if out.len() > max_size {
                return Err(CompressionError::PayloadTooLarge { actual: out.len(), limit: max_size });
            }
            match result {
                BrotliResult::ResultSuccess => break,
                BrotliResult::NeedsMoreOutput => continue,
                BrotliResult::NeedsMoreInput => {
                    return Err(CompressionError::corrupt(Algorithm::Brotli, "truncated stream"))
                }
                BrotliResult::ResultFailure => {
                    return Err(CompressionError::process(Algorithm::Brotli, "invalid stream"))
                }
            }
        }

        if available_in != 0 {
            return Err(CompressionError::corrupt(
                Algorithm::Brotli,
                format!("{} trailing bytes after end of stream", available_in),
            ));
        }
        Ok(out)
    }
}

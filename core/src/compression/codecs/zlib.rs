//! codecs/zlib.rs
//! Zlib-framed deflate via flate2.
//!
//! Decoding drives `flate2::Decompress` by hand so that it can stop at the
//! output ceiling and check that the whole input was one complete stream.
use std::io::Write;

use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};

use crate::compression::codecs::WRAPPER_VERSION;
use crate::compression::levels::normalize_level;
use crate::compression::types::{Algorithm, Codec, CompressionError};
use crate::headers::encode_tag;

/// Output buffer growth per step while inflating.
const GROW_STEP: usize = 64 * 1024;

pub struct ZlibCodec;

impl Codec for ZlibCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Zlib
    }

    fn library_version(&self) -> Option<String> {
        None
    }

    fn wrapper_version(&self) -> Option<String> {
        Some(WRAPPER_VERSION.to_string())
    }

    fn compress(&self, data: &[u8], level: u8) -> Result<(u8, Vec<u8>), CompressionError> {
        let level = normalize_level(Algorithm::Zlib, level, data.len());
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::new(u32::from(level)));
        enc.write_all(data)
            .map_err(|e| CompressionError::process(Algorithm::Zlib, e))?;
        let compressed = enc.finish()
            .map_err(|e| CompressionError::process(Algorithm::Zlib, e))?;
        Ok((encode_tag(Algorithm::Zlib, level), compressed))
    }

    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError> {
        inflate_bounded(data, max_size)
    }
}

/// Inflate one zlib stream, failing as soon as the output exceeds `limit`.
fn inflate_bounded(data: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
    let ceiling = limit.saturating_add(1);
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).min(ceiling).max(1));

    loop {
        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let consumed = before_in as usize;

        let status = inflater
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| CompressionError::process(Algorithm::Zlib, e))?;

        if out.len() > limit {
            return Err(CompressionError::PayloadTooLarge { actual: out.len(), limit });
        }
        if status == Status::StreamEnd {
            break;
        }

        if out.len() == out.capacity() {
            out.reserve_exact((ceiling - out.len()).min(GROW_STEP));
            continue;
        }

        let progressed = inflater.total_in() != before_in || inflater.total_out() != before_out;
        if !progressed {
            return Err(CompressionError::corrupt(Algorithm::Zlib, "truncated stream"));
        }
    }

    let consumed = inflater.total_in() as usize;
    if consumed != data.len() {
        return Err(CompressionError::corrupt(
            Algorithm::Zlib,
            format!("{} trailing bytes after end of stream", data.len() - consumed),
        ));
    }
    Ok(out)
}

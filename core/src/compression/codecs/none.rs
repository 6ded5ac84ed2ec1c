//! codecs/none.rs
//! Pass-through codec.

use crate::compression::codecs::WRAPPER_VERSION;
use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct NoneCodec;

impl Codec for NoneCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::None
    }

    fn library_version(&self) -> Option<String> {
        None
    }

    fn wrapper_version(&self) -> Option<String> {
        Some(WRAPPER_VERSION.to_string())
    }

    fn compress(&self, data: &[u8], _level: u8) -> Result<(u8, Vec<u8>), CompressionError> {
        Ok((0, data.to_vec()))
    }

    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError> {
        if data.len() > max_size {
            return Err(CompressionError::PayloadTooLarge { actual: data.len(), limit: max_size });
        }
        Ok(data.to_vec())
    }
}

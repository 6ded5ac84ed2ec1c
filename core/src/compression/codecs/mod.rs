//! compression/codecs/mod.rs
//! Per-backend initializers.
//!
//! Every backend except `none` sits behind a cargo feature. Building without
//! the feature makes its initializer fail the same way a missing library
//! would, and the registry simply leaves it out.

use std::sync::Arc;

use crate::compression::types::{Algorithm, Codec, CompressionError};

pub mod none;
#[cfg(feature = "lz4")]
pub mod lz4;
#[cfg(feature = "zlib")]
pub mod zlib;
#[cfg(feature = "brotli")]
pub mod brotli;

/// Version reported for the wrappers in this crate.
pub const WRAPPER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Construct the built-in backend for `algorithm`.
pub fn init_codec(algorithm: Algorithm) -> Result<Arc<dyn Codec>, CompressionError> {
    match algorithm {
        Algorithm::None   => Ok(Arc::new(none::NoneCodec)),
        Algorithm::Lz4    => init_lz4(),
        Algorithm::Zlib   => init_zlib(),
        Algorithm::Brotli => init_brotli(),
    }
}

#[cfg(feature = "lz4")]
fn init_lz4() -> Result<Arc<dyn Codec>, CompressionError> {
    Ok(Arc::new(lz4::Lz4Codec::new()?))
}

#[cfg(not(feature = "lz4"))]
fn init_lz4() -> Result<Arc<dyn Codec>, CompressionError> {
    Err(not_built(Algorithm::Lz4))
}

#[cfg(feature = "zlib")]
fn init_zlib() -> Result<Arc<dyn Codec>, CompressionError> {
    Ok(Arc::new(zlib::ZlibCodec))
}

#[cfg(not(feature = "zlib"))]
fn init_zlib() -> Result<Arc<dyn Codec>, CompressionError> {
    Err(not_built(Algorithm::Zlib))
}

#[cfg(feature = "brotli")]
fn init_brotli() -> Result<Arc<dyn Codec>, CompressionError> {
    Ok(Arc::new(brotli::BrotliCodec))
}

#[cfg(not(feature = "brotli"))]
fn init_brotli() -> Result<Arc<dyn Codec>, CompressionError> {
    Err(not_built(Algorithm::Brotli))
}

#[allow(dead_code)]
fn not_built(algorithm: Algorithm) -> CompressionError {
    CompressionError::CodecInitFailed {
        codec: algorithm.name().into(),
        msg: format!("built without the `{}` feature", algorithm.name()),
    }
}

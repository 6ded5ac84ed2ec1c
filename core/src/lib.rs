//! wirepack-core
//!
//! Payload compression layer for a packet protocol: chooses a backend the
//! peer understands, skips compression when it does not pay off, and safely
//! undoes it on the receiving side.

#![forbid(unsafe_code)]

pub mod compression;
pub mod headers;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        compressed_wrapper, decompress, decompress_by_name, registry, Algorithm, AlgorithmSet,
        CodecRegistry, CompressionError, Payload, WrapOptions,
    };
    pub use crate::headers::{decode_tag, encode_tag, TagInfo};
}

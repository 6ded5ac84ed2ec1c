//! compression/mod.rs
//! Pluggable, self-describing payload compression.
//!
//! Notes:
//! - Backends are selected by availability and by what the caller (usually
//!   the remote peer) requested, in a fixed performance order.
//! - A compressed payload carries a one-byte tag (see `headers`) that lets a
//!   receiver find the right backend without any other context.
//! - Both directions are bounded by `max_decompressed_size`.

pub mod constants;
pub mod types;
pub mod levels;
pub mod config;
pub mod codecs;
pub mod registry;
pub mod capabilities;
pub mod payload;
pub mod wrapper;
pub mod dispatch;

pub use constants::*;
pub use types::*;
pub use config::{env_enabled, RegistryConfig};
pub use registry::{CodecRegistry, CodecRegistryBuilder};
pub use capabilities::{CapabilityMap, CodecCaps};
pub use payload::*;
pub use wrapper::{compressed_wrapper, WrapOptions, WrapStrategy};
pub use dispatch::{decompress, decompress_by_name};

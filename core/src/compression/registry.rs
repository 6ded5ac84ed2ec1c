//! compression/registry.rs
//! Codec registry and its process-wide publication.
//!
//! A registry is built once, then only read. The global instance is swapped
//! atomically by `init`/`shutdown`, so readers never take a lock and always
//! see a complete registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use tracing::debug;

use crate::compression::capabilities::{CapabilityMap, CodecCaps};
use crate::compression::codecs::init_codec;
use crate::compression::config::{env_enabled, RegistryConfig};
use crate::compression::constants::{ALL_COMPRESSORS, MAX_DECOMPRESSED_SIZE, MIN_COMPRESS_SIZE};
use crate::compression::types::{Algorithm, Codec, CompressionError};

/// Immutable table of available backends plus the size limits they run under.
pub struct CodecRegistry {
    codecs: HashMap<Algorithm, Arc<dyn Codec>>,
    min_compress_size: usize,
    max_decompressed_size: usize,
}

impl CodecRegistry {
    /// Registry with no backends and default limits.
    pub fn empty() -> Self {
        CodecRegistryBuilder::default().build()
    }

    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::default()
    }

    /// Initialize every requested backend whose name passes `enabled`.
    /// Backends that fail to initialize are logged and left out.
    pub fn init<I, S, F>(names: I, enabled: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> bool,
    {
        CodecRegistryBuilder::default().load(names, enabled).build()
    }

    /// Same as `init`, with names and limits taken from `config`.
    pub fn from_config<F>(config: &RegistryConfig, enabled: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        CodecRegistryBuilder::default()
            .min_compress_size(config.min_compress_size)
            .max_decompressed_size(config.max_decompressed_size)
            .load(&config.algorithms, enabled)
            .build()
    }

    pub fn is_available(&self, name: &str) -> bool {
        Algorithm::from_name(name).is_some_and(|a| self.contains(a))
    }

    pub fn contains(&self, algorithm: Algorithm) -> bool {
        self.codecs.contains_key(&algorithm)
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&Arc<dyn Codec>> {
        self.codecs.get(&algorithm)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Filter `order` down to registered algorithms, keeping its order.
    pub fn enabled(&self, order: &[Algorithm]) -> Vec<Algorithm> {
        order.iter().copied().filter(|a| self.contains(*a)).collect()
    }

    /// Compress function of a registered backend.
    ///
    /// # Errors
    /// - `CompressionError::CodecUnavailable` if `name` is unknown or not loaded.
    pub fn get_compressor(
        &self,
        name: &str,
    ) -> Result<impl Fn(&[u8], u8) -> Result<(u8, Vec<u8>), CompressionError> + Send + Sync, CompressionError>
    {
        let codec = Algorithm::from_name(name)
            .and_then(|a| self.get(a))
            .cloned()
            .ok_or_else(|| CompressionError::unavailable(name))?;
        Ok(move |data: &[u8], level: u8| codec.compress(data, level))
    }

    /// Capabilities in canonical compatibility order.
    /// `full` adds library and wrapper versions.
    pub fn capability_map(&self, full: bool) -> CapabilityMap {
        let entries = ALL_COMPRESSORS
            .iter()
            .filter_map(|a| self.get(*a).map(|codec| CodecCaps::describe(codec.as_ref(), full)))
            .collect();
        CapabilityMap::new(entries)
    }

    pub fn min_compress_size(&self) -> usize {
        self.min_compress_size
    }

    pub fn max_decompressed_size(&self) -> usize {
        self.max_decompressed_size
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.enabled(&ALL_COMPRESSORS))
            .field("min_compress_size", &self.min_compress_size)
            .field("max_decompressed_size", &self.max_decompressed_size)
            .finish()
    }
}

/// Collects backends before the registry is frozen.
pub struct CodecRegistryBuilder {
    codecs: HashMap<Algorithm, Arc<dyn Codec>>,
    min_compress_size: usize,
    max_decompressed_size: usize,
}

impl Default for CodecRegistryBuilder {
    fn default() -> Self {
        Self {
            codecs: HashMap::new(),
            min_compress_size: MIN_COMPRESS_SIZE,
            max_decompressed_size: MAX_DECOMPRESSED_SIZE,
        }
    }
}

impl CodecRegistryBuilder {
    pub fn min_compress_size(mut self, size: usize) -> Self {
        self.min_compress_size = size;
        self
    }

    pub fn max_decompressed_size(mut self, size: usize) -> Self {
        self.max_decompressed_size = size;
        self
    }

    /// Register a caller-supplied backend, replacing any with the same algorithm.
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codecs.insert(codec.algorithm(), codec);
        self
    }

    /// Run the built-in initializer for each enabled name.
    pub fn load<I, S, F>(mut self, names: I, enabled: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> bool,
    {
        for name in names {
            let name = name.as_ref();
            let Some(algorithm) = Algorithm::from_name(name) else {
                debug!(codec = name, "no {}: unknown compressor", name);
                continue;
            };
            if !enabled(algorithm.name()) {
                debug!(codec = name, "no {}: disabled", name);
                continue;
            }
            match init_codec(algorithm) {
                Ok(codec) => {
                    debug!(
                        codec = name,
                        version = codec.library_version().as_deref(),
                        "loaded compressor"
                    );
                    self.codecs.insert(algorithm, codec);
                }
                Err(e) => debug!(codec = name, error = %e, "no {}", name),
            }
        }
        self
    }

    pub fn build(self) -> CodecRegistry {
        CodecRegistry {
            codecs: self.codecs,
            min_compress_size: self.min_compress_size,
            max_decompressed_size: self.max_decompressed_size,
        }
    }
}

// -----------------------------------------------------------------------------
// Process-wide registry
// -----------------------------------------------------------------------------

static GLOBAL: LazyLock<ArcSwap<CodecRegistry>> =
    LazyLock::new(|| ArcSwap::from_pointee(CodecRegistry::empty()));

/// Build a registry from `names` and publish it process-wide.
pub fn init<I, S, F>(names: I, enabled: F) -> Arc<CodecRegistry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    install(CodecRegistry::init(names, enabled))
}

pub fn init_with<F>(config: &RegistryConfig, enabled: F) -> Arc<CodecRegistry>
where
    F: Fn(&str) -> bool,
{
    install(CodecRegistry::from_config(config, enabled))
}

/// Every known backend, limits and toggles from the environment.
pub fn init_all() -> Arc<CodecRegistry> {
    init_with(&RegistryConfig::from_env(), env_enabled)
}

/// Publish a prebuilt registry.
pub fn install(registry: CodecRegistry) -> Arc<CodecRegistry> {
    let registry = Arc::new(registry);
    GLOBAL.store(Arc::clone(&registry));
    registry
}

/// Replace the published registry with an empty one.
pub fn shutdown() {
    GLOBAL.store(Arc::new(CodecRegistry::empty()));
}

/// Currently published registry, empty before `init`.
pub fn global() -> Arc<CodecRegistry> {
    GLOBAL.load_full()
}

pub fn use_algorithm(name: &str) -> bool {
    global().is_available(name)
}

pub fn get_enabled_compressors(order: &[Algorithm]) -> Vec<Algorithm> {
    global().enabled(order)
}

pub fn get_compressor(
    name: &str,
) -> Result<impl Fn(&[u8], u8) -> Result<(u8, Vec<u8>), CompressionError> + Send + Sync, CompressionError> {
    global().get_compressor(name)
}

pub fn get_compression_caps(full: bool) -> CapabilityMap {
    global().capability_map(full)
}

//! compression/config.rs
//! Registry configuration and environment toggles.
use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::compression::constants::{ALL_COMPRESSORS, ENV_PREFIX, MAX_DECOMPRESSED_SIZE, MIN_COMPRESS_SIZE};

/// Which backends to load and the limits they run under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Inputs of this size or smaller are sent raw.
    pub min_compress_size: usize,

    /// Ceiling on compress input and decompress output.
    pub max_decompressed_size: usize,

    /// Backend names to initialize.
    pub algorithms: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_compress_size: MIN_COMPRESS_SIZE,
            max_decompressed_size: MAX_DECOMPRESSED_SIZE,
            algorithms: ALL_COMPRESSORS.iter().map(|a| a.name().to_string()).collect(),
        }
    }
}

impl RegistryConfig {
    /// Defaults overridden by `WIREPACK_MIN_COMPRESS_SIZE` and
    /// `WIREPACK_MAX_DECOMPRESSED_SIZE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            min_compress_size: lookup_usize(&lookup, "MIN_COMPRESS_SIZE", defaults.min_compress_size),
            max_decompressed_size: lookup_usize(&lookup, "MAX_DECOMPRESSED_SIZE", defaults.max_decompressed_size),
            ..defaults
        }
    }
}

fn env_var_name(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix.to_ascii_uppercase())
}

fn lookup_usize<F>(lookup: &F, suffix: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let key = env_var_name(suffix);
    match lookup(&key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = %key, value = %raw, "invalid size, using default {}", default);
            default
        }),
        None => default,
    }
}

/// Parse a boolean toggle. Unrecognized values keep the default.
pub fn parse_bool(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "0" | "false" | "no" | "off" => false,
        "1" | "true" | "yes" | "on" => true,
        _ => default,
    }
}

/// Default enabled predicate: `WIREPACK_<NAME>`, enabled unless set false.
pub fn env_enabled(name: &str) -> bool {
    env::var(env_var_name(name))
        .map(|raw| parse_bool(&raw, true))
        .unwrap_or(true)
}

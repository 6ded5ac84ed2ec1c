//! compression/capabilities.rs
//! Capability map exchanged during the handshake.
//!
//! Wire shape (JSON shown), keys in canonical compatibility order:
//!
//! ```text
//! {
//!   "lz4":  { "": true, "version": "1.9.4", "rust-lz4": { "": true, "version": "0.1.0" } },
//!   "zlib": { "": true, "rust-zlib": { "": true, "version": "0.1.0" } },
//!   "none": { "": true }
//! }
//! ```
//!
//! Without `full`, each entry only carries the `""` presence marker.
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::compression::types::{Algorithm, AlgorithmSet, Codec};

const PRESENT: &str = "";
const VERSION: &str = "version";
const WRAPPER_PREFIX: &str = "rust-";

/// Capabilities of one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecCaps {
    pub algorithm: Algorithm,
    pub version: Option<String>,
    pub wrapper_version: Option<String>,
}

impl CodecCaps {
    pub fn describe(codec: &dyn Codec, full: bool) -> Self {
        if full {
            Self {
                algorithm: codec.algorithm(),
                version: codec.library_version(),
                wrapper_version: codec.wrapper_version(),
            }
        } else {
            Self { algorithm: codec.algorithm(), version: None, wrapper_version: None }
        }
    }

    fn wrapper_key(&self) -> String {
        format!("{}{}", WRAPPER_PREFIX, self.algorithm.name())
    }
}

struct WrapperCaps<'a>(&'a str);

impl Serialize for WrapperCaps<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(PRESENT, &true)?;
        map.serialize_entry(VERSION, self.0)?;
        map.end()
    }
}

impl Serialize for CodecCaps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(version) = &self.version {
            map.serialize_entry(VERSION, version)?;
        }
        if let Some(wrapper) = &self.wrapper_version {
            map.serialize_entry(&self.wrapper_key(), &WrapperCaps(wrapper))?;
        }
        map.serialize_entry(PRESENT, &true)?;
        map.end()
    }
}

/// Ordered capability map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapabilityMap {
    entries: Vec<CodecCaps>,
}

impl CapabilityMap {
    pub(crate) fn new(entries: Vec<CodecCaps>) -> Self {
        Self { entries }
    }

    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.entries.iter().map(|c| c.algorithm).collect()
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&CodecCaps> {
        self.entries.iter().find(|c| c.algorithm == algorithm)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Value {
        // Serializing plain strings and bools into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Requested-algorithm hints from a peer's capability map.
    /// An entry counts when its presence marker is `true`.
    pub fn advertised(peer: &Value) -> AlgorithmSet {
        let Some(map) = peer.as_object() else {
            return AlgorithmSet::empty();
        };
        map.iter()
            .filter(|(_, caps)| caps.get(PRESENT).and_then(Value::as_bool).unwrap_or(false))
            .filter_map(|(name, _)| Algorithm::from_name(name))
            .fold(AlgorithmSet::empty(), |acc, a| acc | a.hint())
    }
}

impl Serialize for CapabilityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for caps in &self.entries {
            map.serialize_entry(caps.algorithm.name(), caps)?;
        }
        map.end()
    }
}

/// Indented listing for operators.
impl fmt::Display for CapabilityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for caps in &self.entries {
            writeln!(f, "{}", caps.algorithm)?;
            if let Some(version) = &caps.version {
                writeln!(f, "  {:<12} : {}", VERSION, version)?;
            }
            if let Some(wrapper) = &caps.wrapper_version {
                writeln!(f, "  {}", caps.wrapper_key())?;
                writeln!(f, "    {:<10} : {}", VERSION, wrapper)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn caps(algorithm: Algorithm, version: Option<&str>, wrapper: Option<&str>) -> CodecCaps {
        CodecCaps {
            algorithm,
            version: version.map(String::from),
            wrapper_version: wrapper.map(String::from),
        }
    }

    #[test]
    fn serializes_in_given_order() {
        let map = CapabilityMap::new(vec![
            caps(Algorithm::Zlib, None, Some("0.1.0")),
            caps(Algorithm::None, None, None),
        ]);
        assert_eq!(map.algorithms(), vec![Algorithm::Zlib, Algorithm::None]);
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(
            text,
            r#"{"zlib":{"rust-zlib":{"":true,"version":"0.1.0"},"":true},"none":{"":true}}"#
        );
    }

    #[test]
    fn version_field_when_present() {
        let map = CapabilityMap { entries: vec![caps(Algorithm::Lz4, Some("1.9.4"), None)] };
        assert_eq!(map.to_json(), json!({"lz4": {"": true, "version": "1.9.4"}}));
    }

    #[test]
    fn advertised_reads_presence_markers() {
        let peer = json!({
            "lz4": {"": true},
            "brotli": {"": false},
            "zlib": {"": true, "version": "1.2"},
            "lzo": {"": true},
        });
        assert_eq!(CapabilityMap::advertised(&peer), AlgorithmSet::LZ4 | AlgorithmSet::ZLIB);
        assert!(CapabilityMap::advertised(&json!([1, 2])).is_empty());
    }

    #[test]
    fn display_lists_entries() {
        let map = CapabilityMap { entries: vec![caps(Algorithm::Lz4, Some("1.9.4"), Some("0.1.0"))] };
        let text = map.to_string();
        assert!(text.starts_with("lz4\n"));
        assert!(text.contains("1.9.4"));
        assert!(text.contains("rust-lz4"));
    }
}

//! compression/payload.rs
//! Values produced by the compression wrapper.
//!
//! All payloads are immutable once built. Data is held in `Bytes` so a
//! bypassed payload shares the caller's buffer instead of copying it.
use std::fmt;

use bytes::Bytes;

use crate::compression::registry::CodecRegistry;
use crate::compression::types::{Algorithm, CompressionError};

/// Data sent as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    pub datatype: String,
    pub data: Bytes,
    pub inlineable: bool,
}

/// Compressed data plus everything needed to decompress it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub datatype: String,
    pub data: Bytes,
    /// Wire tag: normalized level with the algorithm flag OR'd in.
    pub level: u8,
    pub algorithm: Algorithm,
    pub inlineable: bool,
}

impl EncodedPayload {
    /// Decompress through `registry`, dispatching on the algorithm name.
    pub fn decompress(&self, registry: &CodecRegistry) -> Result<Vec<u8>, CompressionError> {
        registry.decompress_by_name(&self.data, self.algorithm.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Raw(RawPayload),
    Encoded(EncodedPayload),
}

impl Payload {
    pub fn raw(datatype: impl Into<String>, data: impl Into<Bytes>, inlineable: bool) -> Self {
        Payload::Raw(RawPayload { datatype: datatype.into(), data: data.into(), inlineable })
    }

    pub fn datatype(&self) -> &str {
        match self {
            Payload::Raw(p) => &p.datatype,
            Payload::Encoded(p) => &p.datatype,
        }
    }

    pub fn data(&self) -> &Bytes {
        match self {
            Payload::Raw(p) => &p.data,
            Payload::Encoded(p) => &p.data,
        }
    }

    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    pub fn inlineable(&self) -> bool {
        match self {
            Payload::Raw(p) => p.inlineable,
            Payload::Encoded(p) => p.inlineable,
        }
    }

    pub fn is_encoded(&self) -> bool {
        matches!(self, Payload::Encoded(_))
    }

    pub fn as_encoded(&self) -> Option<&EncodedPayload> {
        match self {
            Payload::Encoded(p) => Some(p),
            Payload::Raw(_) => None,
        }
    }

    pub fn into_data(self) -> Bytes {
        match self {
            Payload::Raw(p) => p.data,
            Payload::Encoded(p) => p.data,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Raw(p) => write!(f, "raw {}: {} bytes", p.datatype, p.data.len()),
            Payload::Encoded(p) => write!(
                f,
                "{}: {} bytes as {}/{}",
                p.datatype,
                p.data.len(),
                p.algorithm,
                p.level
            ),
        }
    }
}

/// Large data that travels uncompressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeStructure {
    pub datatype: String,
    pub data: Bytes,
}

impl LargeStructure {
    pub fn new(datatype: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self { datatype: datatype.into(), data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Turns deferred data into a payload when it is finally sent.
pub trait CompressStrategy {
    fn compress(&self, datatype: &str, data: Bytes) -> Result<Payload, CompressionError>;
}

impl<F> CompressStrategy for F
where
    F: Fn(&str, Bytes) -> Result<Payload, CompressionError>,
{
    fn compress(&self, datatype: &str, data: Bytes) -> Result<Payload, CompressionError> {
        self(datatype, data)
    }
}

/// Large data marked for compression later, by a caller-supplied strategy.
pub struct Compressible<S: CompressStrategy> {
    inner: LargeStructure,
    strategy: S,
}

impl<S: CompressStrategy> Compressible<S> {
    pub fn new(inner: LargeStructure, strategy: S) -> Self {
        Self { inner, strategy }
    }

    pub fn datatype(&self) -> &str {
        &self.inner.datatype
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Produce the payload. Consumes the wrapper.
    pub fn compress(self) -> Result<Payload, CompressionError> {
        let LargeStructure { datatype, data } = self.inner;
        self.strategy.compress(&datatype, data)
    }
}

impl<S: CompressStrategy> fmt::Debug for Compressible<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compressible({}: {} bytes)", self.inner.datatype, self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_accessors() {
        let p = Payload::raw("text", &b"hello"[..], true);
        assert_eq!(p.datatype(), "text");
        assert_eq!(p.len(), 5);
        assert!(p.inlineable());
        assert!(!p.is_encoded());
        assert_eq!(p.to_string(), "raw text: 5 bytes");
    }

    #[test]
    fn encoded_display() {
        let p = Payload::Encoded(EncodedPayload {
            datatype: "pixels".into(),
            data: Bytes::from_static(&[1, 2, 3]),
            level: 0x16,
            algorithm: Algorithm::Lz4,
            inlineable: false,
        });
        assert_eq!(p.to_string(), "pixels: 3 bytes as lz4/22");
        assert_eq!(p.as_encoded().map(|e| e.algorithm), Some(Algorithm::Lz4));
    }

    #[test]
    fn compressible_uses_closure_strategy() {
        let large = LargeStructure::new("icon", vec![9u8; 10]);
        let c = Compressible::new(large, |datatype: &str, data: Bytes| -> Result<Payload, CompressionError> {
            Ok(Payload::raw(format!("{}-deferred", datatype), data, false))
        });
        assert_eq!(c.len(), 10);
        let payload = c.compress().unwrap();
        assert_eq!(payload.datatype(), "icon-deferred");
        assert_eq!(payload.data().as_ref(), &[9u8; 10]);
    }
}

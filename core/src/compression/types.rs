//! compression/types.rs
//! Algorithm identifiers, backend trait and error taxonomy.
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

use crate::compression::constants::names;

/// Closed set of algorithms that can appear on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    /// Pass-through pseudo backend.
    None,
    /// LZ4 block format with a size prefix.
    Lz4,
    /// Zlib-framed deflate.
    Zlib,
    /// Brotli, favours ratio over speed.
    Brotli,
}

impl Algorithm {
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::None   => names::NONE,
            Algorithm::Lz4    => names::LZ4,
            Algorithm::Zlib   => names::ZLIB,
            Algorithm::Brotli => names::BROTLI,
        }
    }

    /// Parse a canonical wire name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            names::NONE   => Some(Algorithm::None),
            names::LZ4    => Some(Algorithm::Lz4),
            names::ZLIB   => Some(Algorithm::Zlib),
            names::BROTLI => Some(Algorithm::Brotli),
            _ => None,
        }
    }

    /// Hint bit for this algorithm, `None` has no hint.
    pub const fn hint(self) -> AlgorithmSet {
        match self {
            Algorithm::None   => AlgorithmSet::empty(),
            Algorithm::Lz4    => AlgorithmSet::LZ4,
            Algorithm::Zlib   => AlgorithmSet::ZLIB,
            Algorithm::Brotli => AlgorithmSet::BROTLI,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::from_name(s).ok_or_else(|| CompressionError::CodecUnavailable {
            algorithm: s.to_string(),
        })
    }
}

bitflags! {
    /// Algorithms the caller is willing to use, usually the ones the remote
    /// peer advertised in its handshake.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AlgorithmSet: u8 {
        const LZ4    = 0b0001;
        const ZLIB   = 0b0010;
        const BROTLI = 0b0100;
    }
}

impl AlgorithmSet {
    /// Build from advertised names. Unknown names are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|n| Algorithm::from_name(n.as_ref()))
            .fold(AlgorithmSet::empty(), |acc, a| acc | a.hint())
    }

    pub fn wants(&self, algorithm: Algorithm) -> bool {
        let hint = algorithm.hint();
        !hint.is_empty() && self.contains(hint)
    }
}

impl From<Algorithm> for AlgorithmSet {
    fn from(a: Algorithm) -> Self {
        a.hint()
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    /// Input or declared output exceeds the decompression safety ceiling.
    #[error("payload too large: {actual} bytes, limit is {limit} bytes")]
    PayloadTooLarge { actual: usize, limit: usize },

    /// Algorithm not present in the local registry.
    #[error("{algorithm} is not available")]
    CodecUnavailable { algorithm: String },

    /// Stream truncated or followed by unconsumed bytes.
    #[error("corrupt {algorithm} stream: {msg}")]
    CorruptStream { algorithm: Algorithm, msg: String },

    #[error("codec {codec} init failed: {msg}")]
    CodecInitFailed { codec: String, msg: String },

    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: String, msg: String },
}

impl CompressionError {
    pub fn unavailable(algorithm: impl fmt::Display) -> Self {
        CompressionError::CodecUnavailable { algorithm: algorithm.to_string() }
    }

    pub(crate) fn process(algorithm: Algorithm, e: impl fmt::Display) -> Self {
        CompressionError::CodecProcessFailed { codec: algorithm.name().into(), msg: e.to_string() }
    }

    pub(crate) fn corrupt(algorithm: Algorithm, msg: impl Into<String>) -> Self {
        CompressionError::CorruptStream { algorithm, msg: msg.into() }
    }
}

impl From<std::io::Error> for CompressionError {
    fn from(e: std::io::Error) -> Self {
        CompressionError::CodecProcessFailed { codec: "io".into(), msg: e.to_string() }
    }
}

/// One pluggable backend.
///
/// Implementations are immutable once constructed and shared between threads,
/// so both operations take `&self`.
pub trait Codec: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Version of the underlying compression library, if it reports one.
    fn library_version(&self) -> Option<String>;

    /// Version of the binding that wraps the library.
    fn wrapper_version(&self) -> Option<String>;

    /// Compress `data`, returning the wire tag and the compressed bytes.
    /// `level` is the caller's raw level; backends normalize it.
    fn compress(&self, data: &[u8], level: u8) -> Result<(u8, Vec<u8>), CompressionError>;

    /// Decompress `data`, never materializing more than `max_size` bytes.
    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError>;

    fn name(&self) -> &'static str {
        self.algorithm().name()
    }
}

impl fmt::Debug for dyn Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("name", &self.name())
            .field("library_version", &self.library_version())
            .field("wrapper_version", &self.wrapper_version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for a in [Algorithm::None, Algorithm::Lz4, Algorithm::Zlib, Algorithm::Brotli] {
            assert_eq!(Algorithm::from_name(a.name()), Some(a));
        }
        assert_eq!(Algorithm::from_name("LZ4"), Some(Algorithm::Lz4));
        assert_eq!(Algorithm::from_name("lzo"), None);
    }

    #[test]
    fn from_str_unknown_is_unavailable() {
        let err = "lzo".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, CompressionError::CodecUnavailable { ref algorithm } if algorithm == "lzo"));
    }

    #[test]
    fn set_from_names_ignores_unknown_and_none() {
        let set = AlgorithmSet::from_names(["zlib", "lzo", "none", "brotli"]);
        assert_eq!(set, AlgorithmSet::ZLIB | AlgorithmSet::BROTLI);
        assert!(set.wants(Algorithm::Zlib));
        assert!(!set.wants(Algorithm::Lz4));
        assert!(!AlgorithmSet::all().wants(Algorithm::None));
    }
}

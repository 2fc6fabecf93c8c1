use thiserror::Error;

/// Error taxonomy for construction, intake, and code emission.
///
/// Duplicate keys and duplicate desired hashes are non-fatal and so have no
/// variant here — they are surfaced as `log::warn!` calls from
/// [`crate::intake`] instead, and construction proceeds.
#[derive(Debug, Error)]
pub enum Error {
    /// The generator exceeded its trial cap without finding an acyclic graph.
    #[error("generator exceeded {trials} trial(s) without finding an acyclic graph (last N = {n})")]
    TooManyIterations { trials: u64, n: u64 },

    /// A row in a keys file did not have enough columns to extract a key.
    #[error("{path}:{line}: cannot read key, not enough columns")]
    MalformedInput { path: String, line: usize },

    /// Template substitution hit an unknown placeholder or a malformed `$` escape.
    #[error("template error: {0}")]
    Template(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] Box<bincode::ErrorKind>),
}

pub type Result<T> = std::result::Result<T, Error>;

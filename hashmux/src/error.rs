//! # Errors
//! Every failure of the management layer. None of them is transient: they
//! flag misuse or malformed input and are surfaced without any retry.

use hashmux_primitives::AlgorithmId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// A one-shot `digest` was requested on an instance that already
    /// absorbed data since its last reset.
    #[error("instance is streaming, reset it before a one-shot digest")]
    InvalidState,

    /// Staged bytes cannot fit in the arena without overlapping the state
    /// region.
    #[error("arena capacity exceeded: {requested} bytes requested, {available} available")]
    Capacity { requested: usize, available: usize },

    /// The deserialize primitive rejected a checkpoint.
    #[error("checkpoint rejected by {0} deserializer")]
    Deserialization(AlgorithmId),

    /// A primitive reported a size that does not fit the arena layout, or a
    /// requested capability is missing.
    #[error("construction failed: {0}")]
    Construction(String),

    /// A checkout was requested while another one is still open on the same
    /// arena.
    #[error("arena is already checked out")]
    ArenaBusy,

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::Capacity {
                requested: 300,
                available: 128
            }
            .to_string(),
            "arena capacity exceeded: 300 bytes requested, 128 available"
        );
        assert_eq!(
            Error::Deserialization(AlgorithmId::Sha512_256).to_string(),
            "checkpoint rejected by sha512_256 deserializer"
        );
    }
}

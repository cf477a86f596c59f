//! Registry configuration

use hashmux_primitives::AlgorithmId;
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "json")]
use crate::error::Result;

/// Arena length used when nothing else is configured.
pub const DEFAULT_ARENA_LEN: usize = 64 * 1024;

/// Layout of the shared arena and the set of algorithms a
/// [`FactoryRegistry`](crate::FactoryRegistry) exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase", default))]
pub struct RegistryConfig {
    /// Total arena length in bytes.
    pub arena_len: usize,
    /// Bytes at the start of the arena that are never touched. The state
    /// region starts at the next 16-byte boundary past them.
    pub reserved_prefix: usize,
    /// Algorithms to expose. Each one must be compiled in.
    pub algorithms: Vec<AlgorithmId>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            arena_len: DEFAULT_ARENA_LEN,
            reserved_prefix: 0,
            algorithms: AlgorithmId::compiled().collect(),
        }
    }
}

impl RegistryConfig {
    pub fn with_arena_len(mut self, arena_len: usize) -> Self {
        self.arena_len = arena_len;
        self
    }

    pub fn with_reserved_prefix(mut self, reserved_prefix: usize) -> Self {
        self.reserved_prefix = reserved_prefix;
        self
    }

    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = AlgorithmId>) -> Self {
        self.algorithms = algorithms.into_iter().collect();
        self
    }

    /// Drop one algorithm from the exposed set.
    pub fn without(mut self, id: AlgorithmId) -> Self {
        self.algorithms.retain(|x| *x != id);
        self
    }

    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> Result<Self> {
        let parsed: RegistryConfig = serde_json::from_str(text)?;

        Ok(parsed)
    }

    #[cfg(feature = "json")]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| crate::Error::Config(format!("{}: {err}", path.display())))?;
        let reader = std::io::BufReader::new(file);
        let parsed: RegistryConfig = serde_json::from_reader(reader)?;

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_compiled_algorithms() {
        let config = RegistryConfig::default();
        assert_eq!(config.arena_len, 65536);
        assert_eq!(config.reserved_prefix, 0);
        assert_eq!(config.algorithms, AlgorithmId::compiled().collect::<Vec<_>>());
    }

    #[test]
    fn builders() {
        let config = RegistryConfig::default()
            .with_arena_len(1024)
            .with_reserved_prefix(20)
            .with_algorithms([AlgorithmId::Sha256, AlgorithmId::Sha384])
            .without(AlgorithmId::Sha384);

        assert_eq!(config.arena_len, 1024);
        assert_eq!(config.reserved_prefix, 20);
        assert_eq!(config.algorithms, vec![AlgorithmId::Sha256]);
    }

    #[cfg(feature = "json")]
    #[test]
    fn parse_json() {
        let config = RegistryConfig::from_json(
            r#"{ "arenaLen": 2048, "algorithms": ["sha256", "sha512_256"] }"#,
        )
        .unwrap();

        assert_eq!(config.arena_len, 2048);
        assert_eq!(config.reserved_prefix, 0);
        assert_eq!(
            config.algorithms,
            vec![AlgorithmId::Sha256, AlgorithmId::Sha512_256]
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_round_trip() {
        let config = RegistryConfig::default().with_reserved_prefix(7);
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"reservedPrefix\":7"));
        assert_eq!(RegistryConfig::from_json(&text).unwrap(), config);
    }

    #[cfg(feature = "json")]
    #[test]
    fn bad_json_is_a_config_error() {
        let err = RegistryConfig::from_json(r#"{ "algorithms": ["md5"] }"#).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        let err = RegistryConfig::from_file(std::path::Path::new("/nonexistent/hashmux.json"))
            .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}

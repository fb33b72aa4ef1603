//! Toolkit configuration shared by the registry and the combine executor.
//!
//! Configuration is plain data: it is parsed once (usually from TOML) and
//! copied into every function a registry constructs.

use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse toolkit config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_depth must be at least 1")]
    ZeroDepth,
}

///
/// ToolkitConfig
///
/// debug      → combine executors print `[debug]` lines to stdout.
/// max_depth  → recursion helpers reject trees nested deeper than this.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolkitConfig {
    pub debug: bool,
    pub max_depth: Option<usize>,
}

impl ToolkitConfig {
    /// Parse and validate a config document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.max_depth, Some(0)) {
            return Err(ConfigError::ZeroDepth);
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ToolkitConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, ToolkitConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = ToolkitConfig::from_toml_str("debug = true\nmax_depth = 64\n")
            .expect("config should parse");

        assert!(config.debug);
        assert_eq!(config.max_depth, Some(64));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = ToolkitConfig::from_toml_str("verbose = true\n")
            .expect_err("unknown field should be rejected");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_depth() {
        let err = ToolkitConfig::from_toml_str("max_depth = 0\n")
            .expect_err("zero depth should be rejected");

        assert!(matches!(err, ConfigError::ZeroDepth));
    }
}

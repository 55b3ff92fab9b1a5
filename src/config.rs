//! Engine configuration
//!
//! Controls the artifact extension that marks bridge-servable paths and the
//! character rewriting applied to placeholder values before they are encoded
//! into artifact paths. Defaults match the `.svgt` convention; hosts can
//! override them programmatically or from a TOML file:
//!
//! ```toml
//! extension = "svgt"
//! reserved-char = "#"
//! replacement-char = "-"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Engine-wide settings shared by the catalog and the virtual file bridge
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Artifact extension, without the leading dot. Paths ending in
    /// `.<extension>` are the only ones the virtual file bridge serves.
    pub extension: String,
    /// Character that collides with artifact path syntax and must never
    /// appear in an encoded value.
    pub reserved_char: char,
    /// Character substituted for every occurrence of `reserved_char`.
    pub replacement_char: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extension: "svgt".to_string(),
            reserved_char: '#',
            replacement_char: '-',
        }
    }
}

impl EngineConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artifact extension (a leading dot is stripped)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the reserved character replaced during value sanitization
    pub fn with_reserved_char(mut self, reserved: char) -> Self {
        self.reserved_char = reserved;
        self
    }

    /// Set the character substituted for the reserved character
    pub fn with_replacement_char(mut self, replacement: char) -> Self {
        self.replacement_char = replacement;
        self
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The extension including its leading dot, e.g. `".svgt"`
    pub fn suffix(&self) -> String {
        format!(".{}", self.extension)
    }

    /// Rewrite a placeholder value so it is safe to embed in an artifact
    /// path: every reserved character becomes the replacement character.
    pub fn sanitize(&self, value: &str) -> String {
        value.replace(self.reserved_char, &self.replacement_char.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.extension, "svgt");
        assert_eq!(config.suffix(), ".svgt");
        assert_eq!(config.reserved_char, '#');
    }

    #[test]
    fn test_sanitize_replaces_reserved_char() {
        let config = EngineConfig::default();
        assert_eq!(config.sanitize("a#b"), "a-b");
        assert_eq!(config.sanitize("#ff0000"), "-ff0000");
        assert_eq!(config.sanitize("plain"), "plain");
    }

    #[test]
    fn test_builder_strips_leading_dot() {
        let config = EngineConfig::new().with_extension(".tpl");
        assert_eq!(config.extension, "tpl");
        assert_eq!(config.suffix(), ".tpl");
    }

    #[test]
    fn test_from_toml_str() {
        let config = EngineConfig::from_toml_str(
            r#"
            extension = "tpl"
            reserved-char = "%"
            "#,
        )
        .expect("should parse");
        assert_eq!(config.extension, "tpl");
        assert_eq!(config.reserved_char, '%');
        // Unspecified fields keep their defaults
        assert_eq!(config.replacement_char, '-');
    }

    #[test]
    fn test_from_toml_str_empty_uses_defaults() {
        let config = EngineConfig::from_toml_str("").expect("should parse");
        assert_eq!(config.extension, "svgt");
    }
}

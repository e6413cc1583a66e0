//! Configuration module.
//!
//! Handles loading and validating `mintdata.toml`. Stock defaults are
//! overridden by whatever keys the user file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [anchor]
//! identity = "alice"          # Submitter identity recorded with each payload
//! ledger = "ledger.jsonl"     # Append-only ledger file for the local backend
//!
//! [output]
//! artifact = "metadata.json"  # Fixed name of the metadata artifact
//! pretty = false              # Pretty-print the artifact
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [anchor]
//! identity = "bob"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "mintdata.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `mintdata.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Anchoring backend settings (identity, ledger location).
    pub anchor: AnchorConfig,
    /// Metadata artifact settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorConfig {
    /// Submitter identity recorded with each anchored payload.
    pub identity: String,
    /// Path of the JSON Lines ledger, relative to the working directory.
    pub ledger: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            identity: "alice".to_string(),
            ledger: "ledger.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// File name of the metadata artifact written after extraction.
    pub artifact: String,
    /// Pretty-print the artifact instead of writing compact JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            artifact: crate::metadata::DEFAULT_ARTIFACT.to_string(),
            pretty: false,
        }
    }
}

impl Config {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.anchor.identity.trim().is_empty() {
            return Err(ConfigError::Validation(
                "anchor.identity must not be empty".into(),
            ));
        }
        if self.anchor.ledger.trim().is_empty() {
            return Err(ConfigError::Validation(
                "anchor.ledger must not be empty".into(),
            ));
        }
        let artifact = &self.output.artifact;
        if artifact.is_empty()
            || artifact.contains(['/', '\\'])
            || artifact == "."
            || artifact == ".."
        {
            return Err(ConfigError::Validation(format!(
                "output.artifact must be a plain file name, got {artifact:?}"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse `mintdata.toml` content and validate it.
///
/// Every table and key is `#[serde(default)]`, so missing keys take their
/// stock values.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`, falling back to defaults when it
/// does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

/// Returns a fully-commented stock `mintdata.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mintdata configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

[anchor]
# Submitter identity recorded with each anchored payload.
identity = "alice"
# Append-only JSON Lines ledger used by the local anchoring backend.
ledger = "ledger.jsonl"

[output]
# Fixed file name of the metadata artifact (no directories).
artifact = "metadata.json"
# Pretty-print the artifact. The anchored payload is always compact.
pretty = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILENAME)).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.anchor.identity, "alice");
        assert_eq!(config.output.artifact, "metadata.json");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
[anchor]
identity = "bob"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.anchor.identity, "bob");
        // Unspecified values should be defaults
        assert_eq!(config.anchor.ledger, "ledger.jsonl");
        assert!(!config.output.pretty);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[output]\nprety = true\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        assert_eq!(parse_config(stock_config_toml()).unwrap(), Config::default());
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn sparse_keys_in_both_tables_keep_remaining_defaults() {
        let config = parse_config(
            r#"
[anchor]
ledger = "other.jsonl"

[output]
pretty = true
"#,
        )
        .unwrap();
        assert_eq!(config.anchor.identity, "alice");
        assert_eq!(config.anchor.ledger, "other.jsonl");
        assert_eq!(config.output.artifact, "metadata.json");
        assert!(config.output.pretty);
    }

    #[test]
    fn unreadable_path_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Io(_))));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_rejects_empty_identity() {
        let mut config = Config::default();
        config.anchor.identity = "   ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_ledger() {
        let mut config = Config::default();
        config.anchor.ledger.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_artifact_with_directory() {
        for bad in ["out/metadata.json", "..\\x.json", "", ".."] {
            let mut config = Config::default();
            config.output.artifact = bad.into();
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[output]\nartifact = \"a/b.json\"\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Validation(_))));
    }
}

//! Reading `.qp.toml` files.
//!
//! Each file becomes a [`RawConfig`] in which every setting is optional, so that a file can
//! set only what it overrides. Unknown keys are rejected to catch typos early.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// One configuration file, before merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Ends discovery at this file, ignoring parent directories and `~/.qp.toml`.
    pub root: Option<bool>,
    /// Translator settings section.
    pub translator: Option<RawTranslatorSettings>,
    /// Boosted field definitions, in file order.
    pub boost: Option<Vec<RawBoost>>,
}

/// Raw `[translator]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTranslatorSettings {
    /// Field searched by the primary clause.
    pub field: Option<String>,
    /// Suffix appended to every term, e.g. `~0.6`.
    pub similarity: Option<String>,
}

/// Raw `[[boost]]` entry.
///
/// One entry may boost several fields with the same suffix.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBoost {
    /// Field name(s). Accepts either a single string or an array of strings.
    #[serde_as(as = "OneOrMany<_>")]
    pub field: Vec<String>,
    /// Boost suffix, e.g. `^10`.
    pub suffix: String,
}

/// Reads and parses one configuration file.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration text, naming `path` in any error.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration text without a file to blame.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Whether the file at `path` sets `root = true`.
///
/// Unreadable or invalid files count as non-root; loading reports their errors later.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

//! Configuration system for qp.
//!
//! qp uses TOML configuration files named `.qp.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.qp.toml` files found,
//! then loading `~/.qp.toml` as the global config with lowest precedence.
//!
//! ```toml
//! [translator]
//! field = "content"
//! similarity = "~0.6"
//!
//! [[boost]]
//! field = ["title", "heading"]
//! suffix = "^10"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config,
    require_global_config_path,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBoost, RawConfig, RawTranslatorSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Field searched when no configuration names one.
pub const DEFAULT_FIELD: &str = "content";

/// Top-level merged configuration for qp.
///
/// This represents the fully resolved configuration after merging all discovered `.qp.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Primary field and similarity.
    pub translator: TranslatorSettings,
    /// Boosted fields, in precedence order.
    pub boosts: Vec<BoostField>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.qp.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.qp.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.qp.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - An empty primary field
    /// - A similarity suffix that is not `~<number>`
    /// - Boost suffixes that are not `^<number>`
    /// - Boosts with an empty field name or on the primary field
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// This outputs the merged configuration in the same format as a `.qp.toml` file, making it
    /// easy to see the effective configuration.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            translator: self.translator.clone(),
            boost: self.boosts.clone(),
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Settings for the translator itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslatorSettings {
    /// Field searched by the primary clause.
    pub field: String,
    /// Suffix appended to every term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<String>,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            field: String::from(DEFAULT_FIELD),
            similarity: None,
        }
    }
}

/// A field whose clause repeats the boostable terms with a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoostField {
    /// Field name.
    pub field: String,
    /// Boost suffix, e.g. `^10`.
    pub suffix: String,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Translator settings.
    translator: TranslatorSettings,
    /// Boosted fields, rendered as `[[boost]]` tables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    boost: Vec<BoostField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translator_defaults() {
        let translator = TranslatorSettings::default();
        assert_eq!(translator.field, "content");
        assert!(translator.similarity.is_none());
    }

    #[test]
    fn config_default() {
        let config = Config::default();
        assert!(config.boosts.is_empty());
        assert!(config.config_root.is_none());
    }

    #[test]
    fn load_from_no_files() {
        assert_eq!(Config::load_from_files(&[]).unwrap(), Config::default());
    }

    #[test]
    fn settings_to_toml_defaults() {
        let toml = Config::default().settings_to_toml().unwrap();
        assert!(toml.contains("[translator]"));
        assert!(toml.contains("field = \"content\""));
        assert!(!toml.contains("similarity"));
        assert!(!toml.contains("[[boost]]"));
    }

    #[test]
    fn settings_to_toml_round_trips() {
        let config = Config {
            translator: TranslatorSettings {
                field: "body".into(),
                similarity: Some("~0.6".into()),
            },
            boosts: vec![
                BoostField {
                    field: "title".into(),
                    suffix: "^10".into(),
                },
                BoostField {
                    field: "tags".into(),
                    suffix: "^2".into(),
                },
            ],
            config_root: None,
        };
        let toml = config.settings_to_toml().unwrap();
        assert!(toml.contains("[[boost]]"));
        assert!(toml.contains("similarity = \"~0.6\""));

        // Output is itself a valid config file
        let raw = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        let merged = merge_configs(&[ParsedConfig {
            path: PathBuf::from("/x/.qp.toml"),
            config: raw,
        }]);
        assert_eq!(merged.translator, config.translator);
        assert_eq!(merged.boosts, config.boosts);
    }
}

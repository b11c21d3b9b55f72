//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    BoostField, Config, TranslatorSettings,
    parse::{RawConfig, RawTranslatorSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Boosts: merged by field name, first definition wins; the result keeps precedence order,
///   then file order
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    Config {
        translator: merge_translator_settings(configs),
        boosts: merge_boosts(configs),
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(Path::to_path_buf),
    }
}

/// Merges translator settings, taking the first defined value for each field.
fn merge_translator_settings(configs: &[ParsedConfig]) -> TranslatorSettings {
    let mut result = TranslatorSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref translator) = parsed.config.translator {
            apply_raw_translator(&mut result, translator);
        }
    }

    result
}

/// Applies raw translator settings to result, overwriting any present values.
fn apply_raw_translator(result: &mut TranslatorSettings, raw: &RawTranslatorSettings) {
    if let Some(ref v) = raw.field {
        result.field.clone_from(v);
    }
    if let Some(ref v) = raw.similarity {
        result.similarity = Some(v.clone());
    }
}

/// Merges boosted fields from all configs.
fn merge_boosts(configs: &[ParsedConfig]) -> Vec<BoostField> {
    let mut seen = HashSet::new();
    let mut boosts = Vec::new();

    // Iterate in precedence order (highest first) - first definition wins
    for parsed in configs {
        let Some(ref raw_boosts) = parsed.config.boost else {
            continue;
        };

        for raw in raw_boosts {
            for field in &raw.field {
                if seen.insert(field.clone()) {
                    boosts.push(BoostField {
                        field: field.clone(),
                        suffix: raw.suffix.clone(),
                    });
                }
            }
        }
    }

    boosts
}

//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that would produce a
//! surprising Lucene query.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The primary field is empty.
    EmptyField,
    /// The similarity suffix is not `~` optionally followed by a number.
    MalformedSimilarity {
        /// The configured suffix.
        similarity: String,
    },
    /// A boost suffix is not `^` followed by a number.
    MalformedBoostSuffix {
        /// The boosted field.
        field: String,
        /// The configured suffix.
        suffix: String,
    },
    /// A boost entry names an empty field.
    EmptyBoostField {
        /// The suffix of the offending entry.
        suffix: String,
    },
    /// A boost targets the primary field, repeating its terms against itself.
    BoostOnPrimaryField {
        /// The primary field name.
        field: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField => write!(f, "translator field is empty"),
            Self::MalformedSimilarity { similarity } => {
                write!(f, "similarity '{similarity}' is not of the form ~<number>")
            }
            Self::MalformedBoostSuffix { field, suffix } => {
                write!(
                    f,
                    "boost suffix '{suffix}' for field '{field}' is not of the form ^<number>"
                )
            }
            Self::EmptyBoostField { suffix } => {
                write!(f, "boost with suffix '{suffix}' has an empty field name")
            }
            Self::BoostOnPrimaryField { field } => {
                write!(f, "boost targets the primary field '{field}'")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let translator = &config.translator;

    if translator.field.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyField);
    }

    if let Some(ref similarity) = translator.similarity
        && !is_similarity(similarity)
    {
        warnings.push(ConfigWarning::MalformedSimilarity {
            similarity: similarity.clone(),
        });
    }

    for boost in &config.boosts {
        if boost.field.trim().is_empty() {
            warnings.push(ConfigWarning::EmptyBoostField {
                suffix: boost.suffix.clone(),
            });
            continue;
        }
        if boost.field == translator.field {
            warnings.push(ConfigWarning::BoostOnPrimaryField {
                field: boost.field.clone(),
            });
        }
        if !is_boost_suffix(&boost.suffix) {
            warnings.push(ConfigWarning::MalformedBoostSuffix {
                field: boost.field.clone(),
                suffix: boost.suffix.clone(),
            });
        }
    }

    warnings
}

/// Checks for `~` optionally followed by a non-negative number.
fn is_similarity(suffix: &str) -> bool {
    suffix
        .strip_prefix('~')
        .is_some_and(|rest| rest.is_empty() || is_number(rest))
}

/// Checks for `^` followed by a non-negative number.
fn is_boost_suffix(suffix: &str) -> bool {
    suffix.strip_prefix('^').is_some_and(is_number)
}

/// Checks for a plain non-negative decimal number such as `10` or `0.6`.
fn is_number(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.parse::<f64>().is_ok()
}

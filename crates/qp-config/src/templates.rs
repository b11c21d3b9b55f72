//! Starter files written by `qp init`.
//!
//! Each template ships as real TOML so it can be checked to parse and validate. `qp init`
//! writes it with every setting disabled, so a fresh file changes nothing until edited.

/// Starter project configuration.
const LOCAL: &str = include_str!("../templates/config.toml");

/// Starter `~/.qp.toml`.
const GLOBAL: &str = include_str!("../templates/config-global.toml");

/// The project starter file, settings disabled.
pub fn local_template() -> String {
    disable_settings(LOCAL)
}

/// The global starter file, settings disabled.
pub fn global_template() -> String {
    disable_settings(GLOBAL)
}

/// Prefixes every setting and table header with `# `, leaving comments and blank lines alone.
fn disable_settings(template: &str) -> String {
    template
        .lines()
        .map(|line| match line.trim_start().chars().next() {
            None | Some('#') => format!("{line}\n"),
            Some(_) => format!("# {line}\n"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{ParsedConfig, merge_configs, parse::parse_config};

    fn load(template: &str, path: &str) -> crate::Config {
        merge_configs(&[ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config(template).unwrap(),
        }])
    }

    #[test]
    fn local_starter_validates_cleanly() {
        let config = load(LOCAL, "/project/.qp.toml");
        assert_eq!(config.translator.similarity.as_deref(), Some("~0.6"));
        assert_eq!(config.boosts.len(), 3);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn global_starter_validates_cleanly() {
        let config = load(GLOBAL, "/home/user/.qp.toml");
        assert_eq!(config.translator.similarity.as_deref(), Some("~0.8"));
        assert_eq!(config.boosts.len(), 1);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn written_templates_are_inert() {
        for template in [local_template(), global_template()] {
            let config = parse_config(&template).unwrap();
            assert!(config.root.is_none());
            assert!(config.translator.is_none());
            assert!(config.boost.is_none());
        }
    }

    #[test]
    fn disable_settings_keeps_notes() {
        let input = "# boosts\n[[boost]]\nfield = \"title\"\n\n  suffix = \"^2\"\n";
        assert_eq!(
            disable_settings(input),
            "# boosts\n# [[boost]]\n# field = \"title\"\n\n#   suffix = \"^2\"\n"
        );
    }
}

//! Integration tests for qp-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge -> validate.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use qp_config::{BoostField, CONFIG_FILENAME, Config, ConfigError, ConfigWarning, DEFAULT_FIELD};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    /// Owned temporary directory.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

fn boost(field: &str, suffix: &str) -> BoostField {
    BoostField {
        field: field.into(),
        suffix: suffix.into(),
    }
}

#[test]
fn load_no_config_returns_default() {
    if qp_config::global_config_path().is_some_and(|p| p.is_file()) {
        // A real ~/.qp.toml would be merged in
        return;
    }
    let env = TestEnv::new();
    let config = Config::load(env.path()).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.translator.field, DEFAULT_FIELD);
}

#[test]
fn load_single_config() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[translator]
field = "body"
similarity = "~0.6"

[[boost]]
field = "title"
suffix = "^10"
"#,
    );

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.translator.field, "body");
    assert_eq!(config.translator.similarity.as_deref(), Some("~0.6"));
    assert_eq!(config.boosts, vec![boost("title", "^10")]);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn load_nested_configs_merging() {
    let env = TestEnv::new();
    let subdir = env.create_dir("project/subdir");

    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[translator]
field = "body"
similarity = "~0.5"

[[boost]]
field = ["title", "tags"]
suffix = "^2"
"#,
    );

    // Project config overrides similarity and one boost
    env.create_file(
        "project/.qp.toml",
        r#"
[translator]
similarity = "~0.9"

[[boost]]
field = "tags"
suffix = "^8"
"#,
    );

    let config = Config::load(&subdir).unwrap();

    // field from the outer config, similarity from the closest
    assert_eq!(config.translator.field, "body");
    assert_eq!(config.translator.similarity.as_deref(), Some("~0.9"));
    assert_eq!(config.boosts, vec![boost("tags", "^8"), boost("title", "^2")]);
    assert_eq!(
        config.config_root.as_deref(),
        Some(env.path().join("project").as_path())
    );
}

#[test]
fn load_stops_at_root_config() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
[translator]
field = "ignored"
"#,
    );
    env.create_file(
        "project/.qp.toml",
        r#"
root = true

[translator]
similarity = "~0.7"
"#,
    );
    let subdir = env.create_dir("project/src");

    let config = Config::load(&subdir).unwrap();

    assert_eq!(config.translator.field, DEFAULT_FIELD);
    assert_eq!(config.translator.similarity.as_deref(), Some("~0.7"));
}

#[test]
fn load_error_invalid_toml() {
    let env = TestEnv::new();
    let path = env.create_file(CONFIG_FILENAME, "root = true\n[translator\n");

    let err = Config::load(env.path()).unwrap_err();
    let ConfigError::ParseToml { path: err_path, .. } = err else {
        panic!("expected ParseToml, got {err:?}");
    };
    assert_eq!(err_path, path);
}

#[test]
fn load_error_wrong_type() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[[boost]]
field = 10
suffix = "^2"
"#,
    );

    assert!(matches!(
        Config::load(env.path()),
        Err(ConfigError::ParseToml { .. })
    ));
}

#[test]
fn load_from_files_empty_list() {
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_from_files_precedence() {
    let env = TestEnv::new();
    let high = env.create_file(
        "high.toml",
        r#"
[[boost]]
field = "title"
suffix = "^20"
"#,
    );
    let low = env.create_file(
        "low.toml",
        r#"
[translator]
field = "text"

[[boost]]
field = ["title", "summary"]
suffix = "^3"
"#,
    );

    let config = Config::load_from_files(&[high, low]).unwrap();

    assert_eq!(config.translator.field, "text");
    assert_eq!(
        config.boosts,
        vec![boost("title", "^20"), boost("summary", "^3")]
    );
}

#[test]
fn load_from_files_missing_file() {
    let env = TestEnv::new();
    let missing = env.path().join("missing.toml");

    assert!(matches!(
        Config::load_from_files(&[missing]),
        Err(ConfigError::ReadFile { .. })
    ));
}

#[test]
fn validate_loaded_config() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[translator]
field = "content"
similarity = "0.6"

[[boost]]
field = ["content", "title"]
suffix = "10"
"#,
    );

    let warnings = Config::load(env.path()).unwrap().validate();

    assert!(warnings.contains(&ConfigWarning::MalformedSimilarity {
        similarity: "0.6".into()
    }));
    assert!(warnings.contains(&ConfigWarning::BoostOnPrimaryField {
        field: "content".into()
    }));
    assert!(warnings.contains(&ConfigWarning::MalformedBoostSuffix {
        field: "title".into(),
        suffix: "10".into()
    }));
}

#[test]
fn effective_settings_reload_identically() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[translator]
similarity = "~0.6"

[[boost]]
field = ["title", "heading"]
suffix = "^4"
"#,
    );
    let config = Config::load(env.path()).unwrap();

    let effective = env.create_file("effective/.qp.toml", &config.settings_to_toml().unwrap());
    let reloaded = Config::load_from_files(&[effective]).unwrap();

    assert_eq!(reloaded.translator, config.translator);
    assert_eq!(reloaded.boosts, config.boosts);
}

//! Temporary directory trees holding `.qp.toml` files, for unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory that config files are placed into by relative directory.
pub struct ConfigTree {
    /// Removed on drop.
    root: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// The top of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Ensures `rel` exists as a directory and returns its path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.qp.toml` into directory `rel`; an empty `rel` is the top of the tree.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a config that only names the primary field.
    pub fn field_config(&self, rel: &str, field: &str) -> PathBuf {
        self.config(rel, &format!("[translator]\nfield = \"{field}\"\n"))
    }

    /// Writes a config that ends discovery.
    pub fn root_config(&self, rel: &str) -> PathBuf {
        self.config(rel, "root = true\n")
    }
}

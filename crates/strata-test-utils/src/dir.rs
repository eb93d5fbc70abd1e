//! [`TestDir`] for tests that read and write configuration documents.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory that is removed when dropped.
///
/// # Example
///
/// ```rust
/// use strata_test_utils::{TestDir, fixtures};
///
/// let dir = TestDir::new();
/// let path = dir.write("config_valid.json", fixtures::VALID_JSON);
/// assert!(path.exists());
/// ```
pub struct TestDir {
    temp_dir: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestDir::new: failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `name` inside the directory; the file need not exist.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name`, creating parent directories, and return
    /// the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("TestDir::write: failed to create parent dir");
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestDir::write: failed to write {}: {e}", path.display()));
        path
    }

    /// Read `name` back as text.
    pub fn read(&self, name: &str) -> String {
        let path = self.path(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("TestDir::read: failed to read {}: {e}", path.display()))
    }
}

//! Normalized path handling for configuration documents

use std::path::{Path, PathBuf};

/// A document path normalized to forward slashes.
///
/// Paths are kept in one canonical textual form so they log and compare
/// the same on every platform; conversion back to a native path happens
/// only at the I/O boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let inner = path.as_ref().to_string_lossy().replace('\\', "/");
        Self { inner }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Final path component, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Lower-cased extension of the file name. Dotfiles such as `.env`
    /// have no extension.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(name[idx + 1..].to_lowercase()),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("config.json", Some("json"))]
    #[case("dir/Config.YAML", Some("yaml"))]
    #[case("dir\\settings.toml", Some("toml"))]
    #[case(".env", None)]
    #[case("Makefile", None)]
    #[case("archive.tar.gz", Some("gz"))]
    fn test_extension(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(NormalizedPath::new(input).extension().as_deref(), expected);
    }

    #[test]
    fn test_backslashes_are_normalized() {
        let path = NormalizedPath::new("a\\b\\c.json");
        assert_eq!(path.as_str(), "a/b/c.json");
        assert_eq!(path.file_name(), Some("c.json"));
    }
}

//! Configuration backed by a JSON, TOML or YAML document

use crate::{Error, Format, Loadable, Result};
use strata_core::{CompositeConfig, ConfigMap, Configurable, FlatStore, Value, path};
use strata_fs::{NormalizedPath, io};
use tracing::{debug, warn};

/// A configuration loaded from, and saved to, a document on disk.
///
/// Top-level keys of the document become top-level keys of the wrapped
/// configuration; nested mappings and sequences are kept as values and
/// reached with dotted keys such as `test_array[0].id`.
///
/// Construction never touches the filesystem. A failed [`load`] reports the
/// error and leaves the configuration as it was, still fully usable.
///
/// [`load`]: Loadable::load
///
/// # Example
///
/// ```no_run
/// use strata_core::{Configurable, Value};
/// use strata_sources::{FileConfig, Loadable};
///
/// let mut conf = FileConfig::new("./config.json");
/// conf.set("some", Value::from("variable"));
/// conf.save()?;
///
/// let mut reloaded = FileConfig::new("./config.json");
/// reloaded.load()?;
/// assert_eq!(reloaded.get_string("some"), "variable");
/// # Ok::<(), strata_sources::Error>(())
/// ```
#[derive(Debug)]
pub struct FileConfig {
    path: NormalizedPath,
    format: Format,
    inner: Box<dyn Configurable>,
}

impl FileConfig {
    /// Create a source for `path`, detecting the format from its extension.
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        Self::with_format(path, format)
    }

    /// Create a JSON source regardless of the file extension.
    pub fn json(path: impl Into<NormalizedPath>) -> Self {
        Self::with_format(path, Format::Json)
    }

    pub fn with_format(path: impl Into<NormalizedPath>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
            inner: Box::new(CompositeConfig::new(Some(Box::new(FlatStore::new())))),
        }
    }

    /// Attach a file to an existing configuration, e.g. a whole hierarchy
    /// that should be saved as one document.
    pub fn wrap(path: impl Into<NormalizedPath>, inner: Box<dyn Configurable>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        Self {
            path,
            format,
            inner,
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn inner(&self) -> &dyn Configurable {
        self.inner.as_ref()
    }

    pub fn inner_mut(&mut self) -> &mut dyn Configurable {
        self.inner.as_mut()
    }

    /// Unwrap the configuration this source populates.
    pub fn into_inner(self) -> Box<dyn Configurable> {
        self.inner
    }

    fn read_document(&self) -> Result<ConfigMap> {
        let content = io::read_text(&self.path)?;
        match self.format.parse(&content, &self.path)? {
            Value::Mapping(entries) => Ok(entries),
            other => Err(Error::NotAMapping {
                path: self.path.to_native(),
                found: other.type_name().to_string(),
            }),
        }
    }
}

impl Configurable for FileConfig {
    /// Nested document values stay reachable whatever the wrapped store is.
    fn get(&self, key: &str) -> Option<Value> {
        path::lookup(self.inner.as_ref(), key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.inner.set(key, value);
    }

    fn all(&self) -> ConfigMap {
        self.inner.all()
    }

    fn reset(&mut self, initial: Option<ConfigMap>) {
        self.inner.reset(initial);
    }
}

impl Loadable for FileConfig {
    fn source_name(&self) -> &str {
        self.format.name()
    }

    fn load(&mut self) -> Result<()> {
        match self.read_document() {
            Ok(entries) => {
                debug!(
                    path = %self.path,
                    format = %self.format,
                    keys = entries.len(),
                    "loaded config document"
                );
                self.inner.reset(Some(entries));
                Ok(())
            }
            Err(e) => {
                warn!(path = %self.path, error = %e, "failed to load config document");
                Err(e)
            }
        }
    }

    fn save(&self) -> Result<()> {
        let entries = self.inner.all();
        let content = self.format.serialize(&entries, &self.path)?;
        io::write_text(&self.path, &content)?;
        debug!(
            path = %self.path,
            format = %self.format,
            keys = entries.len(),
            "saved config document"
        );
        Ok(())
    }
}

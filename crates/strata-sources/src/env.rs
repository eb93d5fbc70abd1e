//! Configuration read from process environment variables

use crate::{Loadable, Result};
use strata_core::{ConfigMap, Configurable, FlatStore, Value};
use tracing::debug;

/// Characters that separate a namespace from the rest of a variable name.
const NAMESPACE_SEPARATORS: [char; 3] = ['_', '-', ':'];

/// Environment variables as a flat, lower-cased key space.
///
/// Variables whose name starts with one of the configured namespaces
/// followed by `_`, `-` or `:` are stored as `<namespace>.<rest>`, so
/// `POSTGRES_HOST` becomes `postgres.host` when `postgres` is a namespace.
/// Every other variable keeps its full lower-cased name.
///
/// # Example
///
/// ```
/// use strata_core::{Configurable, Value};
/// use strata_sources::EnvConfig;
///
/// let mut env = EnvConfig::new("", ["POSTGRES"]);
/// env.load_from([("POSTGRES_HOST", "localhost"), ("HOME", "/root")]);
///
/// assert_eq!(env.get("postgres.host"), Some(Value::from("localhost")));
/// assert_eq!(env.get("home"), Some(Value::from("/root")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    prefix: String,
    namespaces: Vec<String>,
    store: FlatStore,
}

impl EnvConfig {
    /// Create an unloaded environment source.
    ///
    /// A non-empty `prefix` restricts loading to variables named
    /// `<prefix><separator><rest>` (case-insensitively); only `<rest>` is
    /// used for the stored key.
    pub fn new<I, S>(prefix: impl Into<String>, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefix: prefix.into().to_lowercase(),
            namespaces: namespaces
                .into_iter()
                .map(|ns| ns.as_ref().to_lowercase())
                .collect(),
            store: FlatStore::new(),
        }
    }

    /// Replace the contents with the given variables.
    pub fn load_from<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.store.reset(None);
        let mut skipped = 0usize;
        for (name, value) in vars {
            match self.key_for(name.as_ref()) {
                Some(key) => self.store.set(&key, Value::String(value.into())),
                None => skipped += 1,
            }
        }
        debug!(
            loaded = self.store.len(),
            skipped,
            prefix = %self.prefix,
            "loaded environment configuration"
        );
    }

    /// Map a variable name to its configuration key, or `None` when the
    /// variable is filtered out by the prefix.
    fn key_for(&self, name: &str) -> Option<String> {
        let lowered = name.to_lowercase();
        let rest = if self.prefix.is_empty() {
            lowered.as_str()
        } else {
            lowered
                .strip_prefix(self.prefix.as_str())?
                .strip_prefix(NAMESPACE_SEPARATORS)?
        };
        if rest.is_empty() {
            return None;
        }

        if let Some((namespace, tail)) = rest.split_once(NAMESPACE_SEPARATORS) {
            if !tail.is_empty() && self.namespaces.iter().any(|ns| ns == namespace) {
                return Some(format!("{namespace}.{tail}"));
            }
        }
        Some(rest.to_string())
    }
}

impl Configurable for EnvConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.store.set(key, value);
    }

    fn all(&self) -> ConfigMap {
        self.store.all()
    }

    fn reset(&mut self, initial: Option<ConfigMap>) {
        self.store.reset(initial);
    }
}

impl Loadable for EnvConfig {
    fn source_name(&self) -> &str {
        "environment"
    }

    /// Read the process environment. Variables whose name or value is not
    /// valid UTF-8 are skipped.
    fn load(&mut self) -> Result<()> {
        let vars = std::env::vars_os().filter_map(|(name, value)| {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (name, _) => {
                    debug!(variable = ?name, "skipping non UTF-8 environment variable");
                    None
                }
            }
        });
        self.load_from(vars);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("POSTGRES_HOST", "postgres.host")]
    #[case("POSTGRES-HOST", "postgres.host")]
    #[case("POSTGRES:HOST", "postgres.host")]
    #[case("postgres_host_name", "postgres.host_name")]
    #[case("POSTGRESQL_HOST", "postgresql_host")]
    #[case("POSTGRES_", "postgres_")]
    #[case("HOME", "home")]
    fn test_namespace_keys(#[case] name: &str, #[case] expected: &str) {
        let env = EnvConfig::new("", ["postgres"]);
        assert_eq!(env.key_for(name).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("APP_POSTGRES_HOST", Some("postgres.host"))]
    #[case("app-debug", Some("debug"))]
    #[case("APP", None)]
    #[case("OTHER_DEBUG", None)]
    #[case("APPLE_PIE", None)]
    fn test_prefix_filter(#[case] name: &str, #[case] expected: Option<&str>) {
        let env = EnvConfig::new("APP", ["postgres"]);
        assert_eq!(env.key_for(name).as_deref(), expected);
    }

    #[test]
    fn test_load_from_replaces_previous_contents() {
        let mut env = EnvConfig::new("", Vec::<String>::new());
        env.load_from([("FIRST", "1")]);
        env.load_from([("SECOND", "2")]);

        assert_eq!(env.get("first"), None);
        assert_eq!(env.get_int("second"), 2);
    }

    #[test]
    fn test_save_is_unsupported() {
        let env = EnvConfig::new("", Vec::<String>::new());
        assert!(matches!(
            env.save(),
            Err(crate::Error::SaveUnsupported { .. })
        ));
    }
}

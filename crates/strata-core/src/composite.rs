//! Layered configuration built from a local store, named children and defaults
//!
//! Lookups walk the layers in a fixed order:
//!
//! 1. The composite's own store
//! 2. Each child, in registration order (children may be composites too)
//! 3. The defaults layer
//!
//! The first layer that has the key wins. Writes always land in the own
//! store, so an explicit local value shadows anything composed below it.

use crate::path;
use crate::store::FlatStore;
use crate::traits::Configurable;
use crate::value::{ConfigMap, Value};
use std::collections::HashMap;
use tracing::{debug, trace};

/// A configuration that aggregates other configurations.
///
/// # Example
///
/// ```
/// use strata_core::{CompositeConfig, ConfigMap, Configurable, FlatStore, Value};
///
/// let mut conf = CompositeConfig::new(None);
/// conf.reset_defaults(ConfigMap::from([
///     ("test_default".to_string(), Value::from("123")),
///     ("test_default_b".to_string(), Value::from("321")),
/// ]));
/// conf.use_child("second", Box::new(FlatStore::new()));
/// conf.child_mut("second").unwrap().set("test_default", Value::from("333"));
///
/// assert_eq!(conf.get_string("test_default"), "333");
/// assert_eq!(conf.get_string("test_default_b"), "321");
/// ```
#[derive(Debug, Default)]
pub struct CompositeConfig {
    store: Option<Box<dyn Configurable>>,
    children: Vec<(String, Box<dyn Configurable>)>,
    defaults: FlatStore,
}

impl CompositeConfig {
    /// Wrap `store` as the local layer. With `None`, an empty [`FlatStore`]
    /// is created on the first write.
    pub fn new(store: Option<Box<dyn Configurable>>) -> Self {
        Self {
            store,
            children: Vec::new(),
            defaults: FlatStore::new(),
        }
    }

    /// Register `child` under `name` and return it.
    ///
    /// Registering a name twice does not drop the earlier child: both keep
    /// taking part in fallback lookups, while [`child`](Self::child) returns
    /// the newest one.
    pub fn use_child(
        &mut self,
        name: impl Into<String>,
        child: Box<dyn Configurable>,
    ) -> &mut dyn Configurable {
        let name = name.into();
        debug!(child = %name, position = self.children.len(), "registered child configuration");
        let index = self.children.len();
        self.children.push((name, child));
        self.children[index].1.as_mut()
    }

    /// The most recently registered child called `name`.
    pub fn child(&self, name: &str) -> Option<&dyn Configurable> {
        self.children
            .iter()
            .rev()
            .find(|(child_name, _)| child_name == name)
            .map(|(_, child)| child.as_ref())
    }

    /// Mutable access to the most recently registered child called `name`.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut dyn Configurable> {
        self.children
            .iter_mut()
            .rev()
            .find(|(child_name, _)| child_name == name)
            .map(|(_, child)| child.as_mut() as &mut dyn Configurable)
    }

    /// All children in registration order, shadowed names included.
    pub fn children(&self) -> impl Iterator<Item = (&str, &dyn Configurable)> {
        self.children
            .iter()
            .map(|(name, child)| (name.as_str(), child.as_ref()))
    }

    /// Replace the defaults layer wholesale.
    pub fn reset_defaults(&mut self, defaults: ConfigMap) {
        debug!(entries = defaults.len(), "reset configuration defaults");
        self.defaults.reset(Some(defaults));
    }

    /// Snapshot of the defaults layer.
    pub fn defaults(&self) -> ConfigMap {
        self.defaults.all()
    }

    /// The local layer, if one has been created.
    pub fn store(&self) -> Option<&dyn Configurable> {
        self.store.as_deref()
    }

    /// The local layer, created empty if it does not exist yet.
    pub fn store_mut(&mut self) -> &mut dyn Configurable {
        self.store
            .get_or_insert_with(|| Box::new(FlatStore::new()))
            .as_mut()
    }
}

impl Configurable for CompositeConfig {
    fn get(&self, key: &str) -> Option<Value> {
        if let Some(store) = self.store.as_deref() {
            if let Some(value) = path::lookup(store, key) {
                return Some(value);
            }
        }

        for (_, child) in &self.children {
            if let Some(value) = path::lookup(child.as_ref(), key) {
                return Some(value);
            }
        }

        let value = self.defaults.get(key);
        if value.is_some() {
            trace!(key, "resolved from defaults");
        }
        value
    }

    fn set(&mut self, key: &str, value: Value) {
        self.store_mut().set(key, value);
    }

    /// Flatten every layer into one snapshot with the precedence of
    /// [`get`](Configurable::get). Keys that differ only in case collapse to
    /// the casing of the winning layer.
    fn all(&self) -> ConfigMap {
        let mut merged: HashMap<String, (String, Value)> = HashMap::new();
        let mut overlay = |entries: ConfigMap| {
            for (key, value) in entries {
                merged.insert(key.to_lowercase(), (key, value));
            }
        };

        overlay(self.defaults.all());
        // Earlier children win, so they are applied last.
        for (_, child) in self.children.iter().rev() {
            overlay(child.all());
        }
        if let Some(store) = self.store.as_deref() {
            overlay(store.all());
        }

        merged.into_values().collect()
    }

    /// Reset the local layer only; children and defaults are untouched.
    fn reset(&mut self, initial: Option<ConfigMap>) {
        self.store_mut().reset(initial);
    }
}

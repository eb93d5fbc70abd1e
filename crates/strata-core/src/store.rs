//! In-memory, case-insensitive key-value store

use crate::traits::Configurable;
use crate::value::{ConfigMap, Value};
use std::collections::HashMap;

/// The most basic [`Configurable`]: a flat map from key to value.
///
/// Keys are stored lower-cased; the casing supplied by the most recent
/// [`set`](Configurable::set) of each key is remembered and used by
/// [`all`](Configurable::all). Lookups are single-level: a dotted key only
/// matches an entry stored under that exact (folded) key.
#[derive(Debug, Clone, Default)]
pub struct FlatStore {
    data: HashMap<String, Value>,
    casing: HashMap<String, String>,
}

impl FlatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from `items`.
    pub fn from_map(items: ConfigMap) -> Self {
        let mut store = Self::new();
        store.bulk_set(items);
        store
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Configurable for FlatStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.data.get(&key.to_lowercase()).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        let folded = key.to_lowercase();
        self.casing.insert(folded.clone(), key.to_string());
        self.data.insert(folded, value);
    }

    fn all(&self) -> ConfigMap {
        self.data
            .iter()
            .map(|(folded, value)| {
                let key = self.casing.get(folded).unwrap_or(folded);
                (key.clone(), value.clone())
            })
            .collect()
    }

    fn reset(&mut self, initial: Option<ConfigMap>) {
        self.data.clear();
        self.casing.clear();
        if let Some(items) = initial {
            self.bulk_set(items);
        }
    }
}

//! The interface shared by every configuration source

use crate::coerce;
use crate::value::{ConfigMap, Value};
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::time::Duration;

/// A readable and writable configuration source.
///
/// Keys are case-insensitive. Lookups never fail: an absent key is `None`
/// and the typed getters fall back to the zero value of their type.
///
/// The trait is object safe so that composite configurations can hold any
/// implementation as a child.
pub trait Configurable: Debug {
    /// Get the raw value for `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: Value);

    /// Snapshot of every entry, keyed by its originally supplied casing.
    fn all(&self) -> ConfigMap;

    /// Discard all entries, then repopulate from `initial` if given.
    fn reset(&mut self, initial: Option<ConfigMap>);

    /// Apply [`Configurable::set`] for every entry of `items`.
    fn bulk_set(&mut self, items: ConfigMap) {
        for (key, value) in items {
            self.set(&key, value);
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// String form of the value, `""` if absent.
    fn get_string(&self, key: &str) -> String {
        coerce::to_string(self.get(key).as_ref())
    }

    /// Boolean form of the value, `false` if absent.
    fn get_bool(&self, key: &str) -> bool {
        coerce::to_bool(self.get(key).as_ref())
    }

    /// 32-bit integer form of the value, `0` if absent or out of range.
    fn get_int(&self, key: &str) -> i32 {
        coerce::to_i32(self.get(key).as_ref())
    }

    /// 64-bit integer form of the value, `0` if absent.
    fn get_int64(&self, key: &str) -> i64 {
        coerce::to_i64(self.get(key).as_ref())
    }

    /// Float form of the value, `0.0` if absent.
    fn get_float64(&self, key: &str) -> f64 {
        coerce::to_f64(self.get(key).as_ref())
    }

    /// Timestamp form of the value, the Unix epoch if absent.
    fn get_time(&self, key: &str) -> DateTime<Utc> {
        coerce::to_time(self.get(key).as_ref())
    }

    /// Duration form of the value, zero if absent.
    fn get_duration(&self, key: &str) -> Duration {
        coerce::to_duration(self.get(key).as_ref())
    }
}

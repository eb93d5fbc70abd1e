//! Path parsing and traversal utilities
//!
//! This module resolves dot-separated keys with array indexing inside
//! nested configuration values. Field names are matched case-insensitively
//! at every level.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `config.database.host`
//! - Array indexing: `items[0].name`
//! - Sequence length: `items.length` (final segment only)
//!
//! # Examples
//!
//! ```
//! use strata_core::path::{parse_path, resolve, PathSegment};
//! use strata_core::Value;
//! use serde_json::json;
//!
//! let path = parse_path("config.database[0].host").unwrap();
//! assert_eq!(path, vec![
//!     PathSegment::Key("config".to_string()),
//!     PathSegment::Key("database".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("host".to_string()),
//! ]);
//!
//! let value = Value::from(json!({"Config": {"database": [{"host": "localhost"}]}}));
//! assert_eq!(
//!     resolve(&value, "config.DATABASE[0].host"),
//!     Some(Value::from("localhost"))
//! );
//! ```

use crate::traits::Configurable;
use crate::value::Value;
use std::collections::BTreeMap;

/// Field name that yields the element count of a sequence.
pub const LENGTH_KEY: &str = "length";

/// A segment of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A field in a mapping, matched case-insensitively
    Key(String),
    /// An index in a sequence (e.g., 0 in `items[0]`)
    Index(usize),
    /// Trailing `length` pseudo-field
    Length,
}

/// Parse a path string into segments.
///
/// Returns `None` when a bracket is unterminated or does not hold a
/// non-negative integer; such a path can never resolve. A final segment
/// spelled `length` becomes [`PathSegment::Length`].
///
/// # Examples
///
/// ```
/// use strata_core::path::{parse_path, PathSegment};
///
/// let path = parse_path("items[0].name").unwrap();
/// assert_eq!(path, vec![
///     PathSegment::Key("items".to_string()),
///     PathSegment::Index(0),
///     PathSegment::Key("name".to_string()),
/// ]);
///
/// assert_eq!(
///     parse_path("items.length").unwrap(),
///     vec![PathSegment::Key("items".to_string()), PathSegment::Length]
/// );
/// assert_eq!(parse_path("items[-1]"), None);
/// ```
pub fn parse_path(path: &str) -> Option<Vec<PathSegment>> {
    let mut segments = split_segments(path)?;
    if segments.len() > 1 {
        mark_length(&mut segments);
    }
    Some(segments)
}

fn split_segments(path: &str) -> Option<Vec<PathSegment>> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
                let mut index_str = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == ']' {
                        closed = true;
                        break;
                    }
                    index_str.push(ch);
                }
                if !closed {
                    return None;
                }
                let index = index_str.trim().parse::<usize>().ok()?;
                segments.push(PathSegment::Index(index));
            }
            ']' => return None,
            _ => current_key.push(ch),
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    Some(segments)
}

/// Turn a trailing `length` key into the pseudo-field.
fn mark_length(segments: &mut [PathSegment]) {
    if let Some(last) = segments.last_mut() {
        if matches!(last, PathSegment::Key(key) if key.eq_ignore_ascii_case(LENGTH_KEY)) {
            *last = PathSegment::Length;
        }
    }
}

/// Resolve `key` against `root`.
///
/// Returns `None` as soon as any segment fails to match; there is no
/// partial resolution.
pub fn resolve(root: &Value, key: &str) -> Option<Value> {
    let segments = parse_path(key)?;
    get_at_path(root, &segments)
}

/// Get a value at the given path.
///
/// Returns `None` if the path doesn't exist.
pub fn get_at_path(value: &Value, segments: &[PathSegment]) -> Option<Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value.clone());
    };

    let next_value = match (first, value) {
        (PathSegment::Length, Value::Sequence(items)) if rest.is_empty() => {
            return Some(Value::Int(items.len() as i64));
        }
        // A mapping may carry a real field called `length`
        (PathSegment::Length, Value::Mapping(map)) => find_field(map, LENGTH_KEY)?,
        (PathSegment::Key(key), Value::Mapping(map)) => find_field(map, key)?,
        (PathSegment::Index(idx), Value::Sequence(items)) => items.get(*idx)?,
        _ => return None,
    };

    get_at_path(next_value, rest)
}

/// Case-insensitive field lookup. An exact match wins over a folded one.
fn find_field<'a>(map: &'a BTreeMap<String, Value>, field: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(field) {
        return Some(value);
    }
    let wanted = field.to_lowercase();
    map.iter()
        .find(|(key, _)| key.to_lowercase() == wanted)
        .map(|(_, value)| value)
}

/// Look `key` up in a store, descending into nested values when needed.
///
/// The literal key is tried first, so flat dotted keys such as
/// `postgres.host` win. Otherwise every prefix ending at a segment boundary
/// is fetched from the store, longest first, and the remainder resolved
/// inside the fetched value.
pub fn lookup(store: &dyn Configurable, key: &str) -> Option<Value> {
    if let Some(value) = store.get(key) {
        return Some(value);
    }

    for (idx, ch) in key.char_indices().rev() {
        if idx == 0 || (ch != '.' && ch != '[') {
            continue;
        }
        let Some(root) = store.get(&key[..idx]) else {
            continue;
        };
        let rest = &key[idx..];
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        // The remainder always follows a prefix, so its final `length` is terminal.
        let Some(mut segments) = split_segments(rest) else {
            continue;
        };
        mark_length(&mut segments);
        if let Some(value) = get_at_path(&root, &segments) {
            return Some(value);
        }
    }

    None
}

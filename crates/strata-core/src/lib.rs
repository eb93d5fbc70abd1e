//! Hierarchical configuration stores for Strata
//!
//! Provides a case-insensitive, dot-addressed key space over layered
//! configuration sources. A [`CompositeConfig`] aggregates its own store,
//! an ordered list of named children and a defaults layer; the [`path`]
//! module resolves keys such as `servers[0].host` inside nested values.
//!
//! # Example
//!
//! ```
//! use strata_core::{CompositeConfig, Configurable, FlatStore, Value};
//!
//! let mut root = CompositeConfig::new(None);
//! root.use_child("second", Box::new(FlatStore::new()))
//!     .set("asd", Value::from("abc"));
//!
//! assert_eq!(root.get("ASD"), Some(Value::from("abc")));
//! ```

pub mod coerce;
pub mod composite;
pub mod path;
pub mod store;
pub mod traits;
pub mod value;

pub use composite::CompositeConfig;
pub use path::{PathSegment, parse_path, resolve};
pub use store::FlatStore;
pub use traits::Configurable;
pub use value::{ConfigMap, Value};

//! Filesystem boundary for Strata
//!
//! Provides normalized document paths and safe read/write operations for
//! file-backed configuration sources.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;

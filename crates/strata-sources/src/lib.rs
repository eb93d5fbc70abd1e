//! Configuration sources for Strata
//!
//! Adapters that populate the stores of `strata-core` from the process
//! environment and from JSON, TOML or YAML documents, and write them back
//! where the medium allows it.

pub mod env;
pub mod error;
pub mod file;
pub mod format;
pub mod logging;
pub mod traits;

pub use env::EnvConfig;
pub use error::{Error, Result};
pub use file::FileConfig;
pub use format::Format;
pub use traits::Loadable;

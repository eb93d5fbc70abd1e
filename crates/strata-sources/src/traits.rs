//! Trait for sources backed by an external medium

use crate::{Error, Result};
use strata_core::Configurable;

/// A configuration whose contents come from, and may go back to, some
/// external medium.
///
/// Construction of a source never touches the medium; callers invoke
/// [`load`](Loadable::load) before reading and [`save`](Loadable::save)
/// after writing.
pub trait Loadable: Configurable {
    /// Short name of the source, used in logs and errors.
    fn source_name(&self) -> &str;

    /// Populate the configuration from the medium.
    fn load(&mut self) -> Result<()>;

    /// Write the current configuration back to the medium.
    fn save(&self) -> Result<()> {
        Err(Error::SaveUnsupported {
            source_name: self.source_name().to_string(),
        })
    }
}

//! Filesystem checks.

use std::fs::File;
use std::path::Path;

use crate::error::NansatResult;

/// Check that `path` can be opened for reading.
///
/// The file is closed again immediately. Open errors propagate unchanged as
/// [`crate::NansatError::Io`].
pub fn ensure_openable(path: impl AsRef<Path>) -> NansatResult<()> {
    let path = path.as_ref();
    File::open(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "File is not openable");
        e
    })?;
    Ok(())
}

// Manifest output
//
// Writes the generated verification script (or the correlated records) to
// disk in one atomic replace.

use crate::correlator::DeploymentRecords;
use common::{JournalError, JournalResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// Shell script of verification commands
    Script,
    /// Correlated deployment records as JSON
    Json,
}

/// Writer for manifests
pub struct ManifestWriter;

impl ManifestWriter {
    /// Format correlated records as pretty JSON
    pub fn records_to_json(records: &DeploymentRecords) -> serde_json::Result<String> {
        serde_json::to_string_pretty(records)
    }

    /// Replace `path` with `contents`.
    ///
    /// The content goes to a temporary file next to the target first and is
    /// then renamed over it, so the target is never left half written.
    pub fn write<P: AsRef<Path>>(path: P, contents: &str) -> JournalResult<()> {
        let path = path.as_ref();
        let output_err = |source| JournalError::Output {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(output_err)?;
        // Temp files start out owner-only; keep the mode of the script being replaced
        let permissions = match fs::metadata(path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(_) => default_permissions(),
        };
        if let Some(permissions) = permissions {
            file.as_file().set_permissions(permissions).map_err(output_err)?;
        }
        file.write_all(contents.as_bytes()).map_err(output_err)?;
        file.flush().map_err(output_err)?;
        file.persist(path).map_err(|err| output_err(err.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

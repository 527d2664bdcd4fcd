use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use tempfile::TempPath;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct InstallError {
    context: &'static str,
    #[source]
    source: std::io::Error,
}

impl InstallError {
    fn new(context: &'static str, source: std::io::Error) -> Self {
        Self { context, source }
    }
}

/// Atomically replace the running executable with a verified artifact.
///
/// The current binary is renamed to `<path>.old` before the artifact is
/// renamed into place; both moves stay on the same filesystem, so a
/// concurrently started glm sees either the fully-old or fully-new binary.
/// If the second rename fails, the backup is restored before the error is
/// surfaced.
///
/// # Errors
/// Returns [`InstallError`] when the running executable cannot be resolved
/// or either rename fails. After an error the canonical path still holds the
/// previous working binary.
pub fn install_update(artifact: TempPath) -> Result<(), InstallError> {
    let exe = std::env::current_exe()
        .map_err(|source| InstallError::new("failed to get current binary path", source))?;
    let target = exe
        .canonicalize()
        .map_err(|source| InstallError::new("failed to resolve binary path", source))?;

    swap_binary(&target, artifact)
}

fn swap_binary(target: &Path, artifact: TempPath) -> Result<(), InstallError> {
    let mut backup = target.as_os_str().to_owned();
    backup.push(".old");
    let backup = PathBuf::from(backup);

    // Commit point: past this rename, failure must roll back.
    fs::rename(target, &backup)
        .map_err(|source| InstallError::new("failed to back up current binary", source))?;

    if let Err(persist_error) = artifact.persist(target) {
        if let Err(restore_error) = fs::rename(&backup, target) {
            warn!(
                "rollback failed, {} may be missing: {restore_error}",
                target.display()
            );
        }
        return Err(InstallError::new(
            "failed to install new binary",
            persist_error.error,
        ));
    }

    if let Err(error) = fs::remove_file(&backup) {
        // The canonical path is already correct; a stale backup is harmless.
        warn!("failed to remove backup {}: {error}", backup.display());
    }

    info!("installed new binary at {}", target.display());
    Ok(())
}

use std::cmp::Ordering;

use thiserror::Error;

use crate::checksum::{self, ChecksumError};
use crate::config::UpdateConfig;
use crate::download::{self, DownloadError, ProgressFn};
use crate::install::{self, InstallError};
use crate::platform::{Platform, PlatformError};
use crate::release::{self, ReleaseError, ReleaseInfo};
use crate::version::compare_versions;

/// Outcome of an update check. Derived fresh per invocation, never
/// persisted.
#[derive(Debug, Clone)]
pub struct UpdateCheck {
    pub current_version: String,
    pub latest_version: String,
    pub has_update: bool,
    pub release_notes: String,
    pub release_url: String,
}

/// Umbrella error for the composed update flow; each stage's error is
/// surfaced verbatim.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Release(#[from] ReleaseError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Checksum(#[from] ChecksumError),
    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Ask the release index for the latest version and compare it against
/// `current_version`.
///
/// # Errors
/// Propagates release index failures verbatim.
pub fn check_for_update(
    client: &reqwest::blocking::Client,
    config: &UpdateConfig,
    current_version: &str,
) -> Result<UpdateCheck, ReleaseError> {
    let release = release::fetch_latest_release(client, config)?;
    Ok(build_check(current_version, &release))
}

fn build_check(current_version: &str, release: &ReleaseInfo) -> UpdateCheck {
    UpdateCheck {
        current_version: current_version.to_string(),
        latest_version: release.tag_name.clone(),
        has_update: compare_versions(current_version, &release.tag_name) == Ordering::Greater,
        release_notes: release.body.clone(),
        release_url: release.html_url.clone(),
    }
}

/// Apply an available update end to end: detect the platform, download the
/// artifact, sanity-check and checksum-verify it, then atomically install
/// it over the running binary.
///
/// Each stage's failure aborts the remaining stages; nothing on disk has
/// been mutated until the install stage runs.
///
/// # Errors
/// Returns the failing stage's error wrapped in [`UpdateError`].
pub fn apply_update(
    client: &reqwest::blocking::Client,
    config: &UpdateConfig,
    version: &str,
    progress: Option<ProgressFn<'_>>,
) -> Result<(), UpdateError> {
    let platform = Platform::detect()?;
    let artifact = download::download_binary(client, config, version, platform, progress)?;
    checksum::verify_binary(&artifact)?;
    checksum::verify_release_checksum(client, config, &artifact, version, platform)?;
    install::install_update(artifact)?;
    Ok(())
}

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::{ALLOW_UNVERIFIED_ENV, UpdateConfig};
use crate::platform::Platform;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("checksums.txt is unavailable for {version}: {reason}")]
    ManifestUnavailable { version: String, reason: String },
    #[error("no checksum found for {artifact}")]
    NotFound { artifact: String },
    #[error("checksum verification failed for {artifact}")]
    Mismatch { artifact: String },
    #[error("downloaded binary is empty")]
    EmptyArtifact,
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ChecksumError {
    fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

/// Verify a downloaded artifact against the release's checksum manifest.
///
/// When the manifest itself cannot be fetched and `config.allow_unverified`
/// is set, verification is skipped with a warning. Every other failure,
/// including a manifest with no entry for the artifact, must abort the
/// install.
///
/// # Errors
/// Returns [`ChecksumError`] when the manifest is unreachable (and the
/// override is off), has no entry for the artifact, or the artifact's
/// SHA-256 digest does not match the manifest entry.
pub fn verify_release_checksum(
    client: &reqwest::blocking::Client,
    config: &UpdateConfig,
    path: &Path,
    version: &str,
    platform: Platform,
) -> Result<(), ChecksumError> {
    let artifact = config.artifact_name(platform);

    let expected = match fetch_expected_checksum(client, config, version, &artifact) {
        Ok(digest) => digest,
        Err(error @ ChecksumError::ManifestUnavailable { .. }) => {
            if config.allow_unverified {
                warn!("{error}; installing unverified binary ({ALLOW_UNVERIFIED_ENV} is set)");
                return Ok(());
            }
            return Err(error);
        }
        Err(error) => return Err(error),
    };

    let actual = sha256_file(path)?;
    if actual.eq_ignore_ascii_case(&expected) {
        info!("checksum verified for {artifact}");
        Ok(())
    } else {
        Err(ChecksumError::Mismatch { artifact })
    }
}

fn fetch_expected_checksum(
    client: &reqwest::blocking::Client,
    config: &UpdateConfig,
    version: &str,
    artifact: &str,
) -> Result<String, ChecksumError> {
    let url = config.manifest_url(version);
    let unavailable = |reason: String| ChecksumError::ManifestUnavailable {
        version: version.to_string(),
        reason,
    };

    let response = client
        .get(&url)
        .send()
        .map_err(|error| unavailable(error.to_string()))?;

    if !response.status().is_success() {
        return Err(unavailable(format!("HTTP {}", response.status())));
    }

    let manifest = response
        .text()
        .map_err(|error| unavailable(error.to_string()))?;

    expected_digest(&manifest, artifact)
        .map(str::to_string)
        .ok_or_else(|| ChecksumError::NotFound {
            artifact: artifact.to_string(),
        })
}

/// Find the digest for `artifact` in manifest text: one
/// `<hex-digest> <filename>` pair per line, `#` comments and blank lines
/// ignored.
fn expected_digest<'a>(manifest: &'a str, artifact: &str) -> Option<&'a str> {
    manifest.lines().find_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let mut fields = line.split_whitespace();
        let digest = fields.next()?;
        let name = fields.next()?;
        (name == artifact).then_some(digest)
    })
}

fn sha256_file(path: &Path) -> Result<String, ChecksumError> {
    let mut file = File::open(path)
        .map_err(|source| ChecksumError::io("failed to open downloaded binary", source))?;
    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let read = file
            .read(&mut buf)
            .map_err(|source| ChecksumError::io("failed to hash downloaded binary", source))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Basic artifact sanity check before installing: the file must be non-empty,
/// and is marked executable on unix.
///
/// # Errors
/// Returns [`ChecksumError::EmptyArtifact`] for a zero-length download, or an
/// I/O error when the file cannot be inspected or chmodded.
pub fn verify_binary(path: &Path) -> Result<(), ChecksumError> {
    let metadata = std::fs::metadata(path)
        .map_err(|source| ChecksumError::io("failed to stat downloaded binary", source))?;

    if metadata.len() == 0 {
        return Err(ChecksumError::EmptyArtifact);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(|source| ChecksumError::io("failed to make binary executable", source))?;
    }

    Ok(())
}

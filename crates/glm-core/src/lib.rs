//! Self-update core for glm.
//!
//! Everything needed to move a running glm binary to the latest published
//! release, as independently callable stages:
//! - Release index lookup and version comparison.
//! - Platform (OS/architecture) detection.
//! - Artifact download with synchronous progress reporting.
//! - Checksum verification against the release's `checksums.txt` manifest.
//! - Atomic in-place binary replacement with rollback.
//!
//! All I/O is synchronous and blocking; the whole update flow runs on the
//! calling thread.

pub mod checksum;
pub mod config;
pub mod download;
pub mod install;
pub mod platform;
pub mod release;
pub mod update;
pub mod version;

pub use checksum::{ChecksumError, verify_binary, verify_release_checksum};
pub use config::UpdateConfig;
pub use download::{DownloadError, ProgressFn, download_binary};
pub use install::{InstallError, install_update};
pub use platform::{Arch, Os, Platform, PlatformError};
pub use release::{ReleaseError, ReleaseInfo, fetch_latest_release};
pub use update::{UpdateCheck, UpdateError, apply_update, check_for_update};
pub use version::{compare_versions, format_release_notes};

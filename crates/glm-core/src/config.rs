use crate::platform::Platform;

/// GitHub repository that publishes glm releases.
pub const GITHUB_REPO: &str = "okkyok/glm";

/// Artifact name prefix; release assets are named `{tool}-{os}-{arch}`.
const TOOL_NAME: &str = "glm";

/// Environment toggle that allows installing when `checksums.txt` cannot be
/// fetched. Deliberately opt-in and default-closed.
pub const ALLOW_UNVERIFIED_ENV: &str = "GLM_ALLOW_UNVERIFIED";

const MANIFEST_FILENAME: &str = "checksums.txt";

/// Updater configuration, sourced once at the process boundary and passed
/// into each stage. None of the update stages read ambient environment
/// variables themselves.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// `owner/name` of the release repository.
    pub repo: String,
    /// Artifact name prefix.
    pub tool: String,
    /// Base URL of the release index API.
    pub api_base: String,
    /// Base URL release artifacts are downloaded from.
    pub download_base: String,
    /// Skip checksum verification when the manifest is unreachable.
    pub allow_unverified: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            repo: GITHUB_REPO.to_string(),
            tool: TOOL_NAME.to_string(),
            api_base: "https://api.github.com".to_string(),
            download_base: "https://github.com".to_string(),
            allow_unverified: false,
        }
    }
}

impl UpdateConfig {
    #[must_use]
    pub fn release_index_url(&self) -> String {
        format!("{}/repos/{}/releases/latest", self.api_base, self.repo)
    }

    #[must_use]
    pub fn artifact_name(&self, platform: Platform) -> String {
        format!("{}-{}", self.tool, platform)
    }

    #[must_use]
    pub fn download_url(&self, version: &str, artifact: &str) -> String {
        format!(
            "{}/{}/releases/download/{}/{}",
            self.download_base, self.repo, version, artifact
        )
    }

    #[must_use]
    pub fn manifest_url(&self, version: &str) -> String {
        self.download_url(version, MANIFEST_FILENAME)
    }
}

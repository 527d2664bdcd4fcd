use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glm_platform::AppPaths;
use serde::{Deserialize, Serialize};

/// Persisted glm configuration: the stored auth token and preferred model.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub anthropic_auth_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl Config {
    /// Load the config file, or defaults when none exists yet.
    pub fn load() -> Result<Self> {
        let paths = AppPaths::new()?;
        Self::load_from(&paths.config_file())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Write the config file, creating the config directory if needed. The
    /// file holds the auth token, so it is written user-only on unix.
    pub fn save(&self) -> Result<()> {
        let paths = AppPaths::new()?;
        paths
            .ensure_dirs()
            .context("failed to create config directory")?;
        self.save_to(&paths.config_file())
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write config file {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .with_context(|| format!("failed to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    /// Delete the config file. Returns whether anything was removed; an empty
    /// config directory is pruned as well.
    pub fn remove() -> Result<bool> {
        let paths = AppPaths::new()?;
        let path = paths.config_file();
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)
            .with_context(|| format!("failed to remove config file {}", path.display()))?;

        if let Ok(mut entries) = fs::read_dir(&paths.config_dir)
            && entries.next().is_none()
        {
            let _ = fs::remove_dir(&paths.config_dir);
        }

        Ok(true)
    }
}

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("unsupported operating system: {0}")]
    UnsupportedOs(String),
    #[error("unsupported architecture: {0}")]
    UnsupportedArch(String),
}

/// Operating systems glm publishes release binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Darwin,
    Linux,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
        })
    }
}

/// CPU architectures glm publishes release binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        })
    }
}

/// A supported OS/architecture pair. `Display` renders the identifiers used
/// in release asset names (`darwin-arm64`, `linux-amd64`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Detect the running operating system and CPU architecture.
    ///
    /// # Errors
    /// Fails with [`PlatformError`] naming the unsupported value when the
    /// host is not one of {darwin, linux} x {amd64, arm64}. This check runs
    /// before any network access.
    pub fn detect() -> Result<Self, PlatformError> {
        Self::from_target(std::env::consts::OS, std::env::consts::ARCH)
    }

    fn from_target(os: &str, arch: &str) -> Result<Self, PlatformError> {
        let os = match os {
            "macos" => Os::Darwin,
            "linux" => Os::Linux,
            other => return Err(PlatformError::UnsupportedOs(other.to_string())),
        };
        let arch = match arch {
            "x86_64" => Arch::Amd64,
            "aarch64" => Arch::Arm64,
            other => return Err(PlatformError::UnsupportedArch(other.to_string())),
        };

        Ok(Self { os, arch })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::{Arch, Os, Platform, PlatformError};

    #[test]
    fn supported_pairs_are_accepted() {
        let platform =
            Platform::from_target("macos", "aarch64").expect("darwin/arm64 should be supported");
        assert_eq!(platform, Platform { os: Os::Darwin, arch: Arch::Arm64 });

        let platform =
            Platform::from_target("linux", "x86_64").expect("linux/amd64 should be supported");
        assert_eq!(platform, Platform { os: Os::Linux, arch: Arch::Amd64 });
    }

    #[test]
    fn unsupported_os_is_rejected_by_name() {
        let error = Platform::from_target("windows", "x86_64")
            .expect_err("windows should be rejected");
        assert_eq!(error, PlatformError::UnsupportedOs("windows".to_string()));
    }

    #[test]
    fn unsupported_arch_is_rejected_by_name() {
        let error = Platform::from_target("linux", "riscv64")
            .expect_err("riscv64 should be rejected");
        assert_eq!(error, PlatformError::UnsupportedArch("riscv64".to_string()));
    }

    #[test]
    fn display_matches_release_asset_identifiers() {
        let platform = Platform { os: Os::Linux, arch: Arch::Arm64 };
        assert_eq!(platform.to_string(), "linux-arm64");
    }
}

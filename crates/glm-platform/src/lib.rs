//! Platform integration for glm.
//!
//! This crate provides the small pieces that depend on the host environment:
//! - Per-user application paths (config and data directories).
//! - Boolean environment toggle parsing shared by the CLI and the updater.

mod env;
mod paths;

pub use env::{flag, is_truthy};
pub use paths::{AppPaths, AppPathsError};

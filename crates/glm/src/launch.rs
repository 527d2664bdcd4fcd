use std::process::Command;

use anyhow::{Context, Result, anyhow};
use log::debug;

use crate::token;

/// Backend the session is pointed at instead of the default Anthropic API.
const ANTHROPIC_BASE_URL: &str = "https://open.bigmodel.cn/api/anthropic";

/// Toggle honored by glm-aware tooling in the child process.
pub const NON_INTERACTIVE_ENV: &str = "GLM_NON_INTERACTIVE";

/// Spawn claude with session-scoped GLM configuration and wait for it to
/// exit. Returns claude's exit code so glm can propagate it.
pub fn run(model: &str, yolo: bool, non_interactive: bool, forwarded: &[String]) -> Result<i32> {
    println!("Launching Claude with GLM...");

    let auth_token = token::resolve().context("failed to get authentication token")?;

    let claude = which::which("claude").map_err(|_| {
        anyhow!("claude command not found; install Claude Code and ensure it is on PATH")
    })?;

    println!("Using model: {model}");

    let mut command = Command::new(claude);
    command.arg("--model").arg(model);
    if yolo {
        command.arg("--dangerously-skip-permissions");
    }
    command.args(forwarded);

    command
        .env("ANTHROPIC_BASE_URL", ANTHROPIC_BASE_URL)
        .env("ANTHROPIC_AUTH_TOKEN", auth_token)
        .env("ANTHROPIC_MODEL", model);
    if non_interactive {
        command.env(NON_INTERACTIVE_ENV, "1");
    }

    debug!("spawning claude with {} forwarded arguments", forwarded.len());
    let status = command.status().context("failed to run claude")?;

    Ok(status.code().unwrap_or(1))
}

use clap::{Parser, Subcommand};

/// Model used when neither `--model` nor the config file picks one.
pub const DEFAULT_MODEL: &str = "glm-4.7";

/// A CLI tool to launch Claude with GLM settings using temporary
/// session-based configuration.
#[derive(Debug, Parser)]
#[command(name = "glm", version, about = "GLM Claude settings management CLI")]
pub struct Cli {
    /// GLM model to use for this session.
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Skip permission prompts (--dangerously-skip-permissions).
    #[arg(long)]
    pub yolo: bool,

    /// Disable all interactive prompts (same as GLM_NON_INTERACTIVE=1).
    #[arg(long)]
    pub non_interactive: bool,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check for a new glm release and install it.
    Update {
        /// Only report whether an update is available.
        #[arg(long)]
        check: bool,
    },
    /// Manage the stored authentication token.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Deprecated: glm now uses temporary session-based configuration.
    Enable {
        /// Deprecated flag (no effect).
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Deprecated: to use Claude without GLM, run claude directly.
    Disable,
}

#[derive(Debug, Subcommand)]
pub enum TokenAction {
    /// Store an authentication token in the config file.
    Set {
        /// Token value; glm never prompts, so it must be given here.
        token: String,
    },
    /// Print the stored token, masked.
    Show,
    /// Remove the stored token.
    Clear,
}

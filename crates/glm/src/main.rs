//! glm: launch Claude Code with temporary session-based GLM configuration,
//! with a self-updating binary.

mod cli;
mod config;
mod launch;
mod logging;
mod passthrough;
mod token;
mod update;

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Command, TokenAction};

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().collect();
    let mut command = Cli::command();
    let known = passthrough::known_flags(&mut command);

    // Subcommand invocations parse strictly; the default invocation forwards
    // flags glm does not know to claude instead of rejecting them.
    let (args, forwarded) = if invokes_subcommand(&command, &raw) {
        (raw, Vec::new())
    } else {
        passthrough::split_args(&raw, &known)
    };

    let cli = Cli::parse_from(args);
    logging::init(cli.verbose);

    match run(cli, &forwarded) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("glm: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, forwarded: &[String]) -> Result<ExitCode> {
    match cli.command {
        None => {
            let code = launch::run(&cli.model, cli.yolo, cli.non_interactive, forwarded)?;
            Ok(u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from))
        }
        Some(Command::Update { check }) => {
            update::run(check)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Token { action }) => {
            match action {
                TokenAction::Set { token } => token::set(&token)?,
                TokenAction::Show => token::show()?,
                TokenAction::Clear => token::clear()?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Enable { .. }) => {
            println!("Warning: 'glm enable' is deprecated and is now a no-op.");
            println!("Just run 'glm' to launch Claude with session-based GLM configuration.");
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Disable) => {
            println!("Warning: 'glm disable' is deprecated and is now a no-op.");
            println!("To use Claude without GLM, run 'claude' directly.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Whether the invocation names a subcommand (or asks for help), in which
/// case nothing is forwarded to claude.
///
/// Only the first token clap would dispatch on counts: a subcommand name
/// appearing as the value of some flag (`glm --model update`,
/// `glm --someflag update`) stays a launch invocation. `command` must
/// already be built so the auto-generated help/version flags are visible.
fn invokes_subcommand(command: &clap::Command, args: &[String]) -> bool {
    let mut valueless_flags = std::collections::HashSet::new();
    for arg in command.get_arguments() {
        if arg.get_action().takes_values() {
            continue;
        }
        if let Some(long) = arg.get_long() {
            valueless_flags.insert(format!("--{long}"));
        }
        if let Some(short) = arg.get_short() {
            valueless_flags.insert(format!("-{short}"));
        }
    }

    let mut args = args.iter().skip(1).peekable();
    while let Some(arg) = args.next() {
        if !arg.starts_with('-') {
            return arg == "help"
                || command.get_subcommands().any(|sub| sub.get_name() == arg);
        }

        // A known boolean flag or a `--name=value` token consumes nothing;
        // any other flag takes the following token as its value, matching
        // the passthrough split.
        if valueless_flags.contains(arg) || arg.contains('=') {
            continue;
        }
        if args.peek().is_some_and(|next| !next.starts_with('-')) {
            args.next();
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::invokes_subcommand;
    use crate::cli::Cli;

    fn args(raw: &[&str]) -> Vec<String> {
        std::iter::once("glm")
            .chain(raw.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn built_command() -> clap::Command {
        let mut command = Cli::command();
        command.build();
        command
    }

    #[test]
    fn subcommands_are_recognized_past_boolean_flags() {
        let command = built_command();
        assert!(invokes_subcommand(&command, &args(&["update"])));
        assert!(invokes_subcommand(&command, &args(&["--verbose", "update", "--check"])));
        assert!(invokes_subcommand(&command, &args(&["token", "show"])));
        assert!(invokes_subcommand(&command, &args(&["help"])));
    }

    #[test]
    fn launch_invocations_are_not_mistaken_for_subcommands() {
        let command = built_command();
        assert!(!invokes_subcommand(&command, &args(&[])));
        assert!(!invokes_subcommand(&command, &args(&["--model", "glm-4.7"])));
        assert!(!invokes_subcommand(&command, &args(&["--allowedTools", "Bash,Read"])));
        assert!(!invokes_subcommand(&command, &args(&["--help"])));
    }

    #[test]
    fn subcommand_names_used_as_flag_values_do_not_dispatch() {
        let command = built_command();
        assert!(!invokes_subcommand(&command, &args(&["--someflag", "update"])));
        assert!(!invokes_subcommand(&command, &args(&["-m", "update"])));
        assert!(!invokes_subcommand(&command, &args(&["--model=update"])));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}

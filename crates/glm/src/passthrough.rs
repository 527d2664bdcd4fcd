//! Forwarding of unknown flags to claude.
//!
//! The default `glm` invocation accepts arbitrary claude flags
//! (`glm --allowedTools Bash,Read`) without declaring them itself. Raw
//! process arguments are split before clap sees them: flags glm knows stay,
//! everything flag-shaped that it does not know is forwarded untouched.

use std::collections::HashSet;

/// Flags the root command itself understands, in `--long` and `-s` form.
/// Builds the command first so clap's auto-generated `--help`/`--version`
/// args are included; glm must answer those itself, never claude.
pub fn known_flags(command: &mut clap::Command) -> HashSet<String> {
    command.build();

    let mut known = HashSet::new();
    for arg in command.get_arguments() {
        if let Some(long) = arg.get_long() {
            known.insert(format!("--{long}"));
        }
        if let Some(short) = arg.get_short() {
            known.insert(format!("-{short}"));
        }
    }
    known
}

/// Split raw process arguments into the ones glm parses itself and the
/// unknown flags (with their values) forwarded to claude.
///
/// A known flag keeps the following token as its value when that token does
/// not look like another flag; an unknown flag does the same. `--flag=value`
/// tokens are classified by the name before the `=`. Bare positionals stay
/// on glm's side so subcommand names still reach clap.
pub fn split_args(args: &[String], known: &HashSet<String>) -> (Vec<String>, Vec<String>) {
    let mut ours = Vec::new();
    let mut forwarded = Vec::new();
    let mut skip_to_ours = false;
    let mut skip_to_forwarded = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_to_ours {
            skip_to_ours = false;
            ours.push(arg.clone());
            continue;
        }
        if skip_to_forwarded {
            skip_to_forwarded = false;
            forwarded.push(arg.clone());
            continue;
        }

        let value_follows = args
            .get(i + 1)
            .is_some_and(|next| !next.starts_with('-'));

        if known.contains(arg) {
            ours.push(arg.clone());
            skip_to_ours = value_follows;
            continue;
        }

        if let Some(stripped) = arg.strip_prefix("--")
            && let Some((name, _)) = stripped.split_once('=')
        {
            if known.contains(&format!("--{name}")) {
                ours.push(arg.clone());
            } else {
                forwarded.push(arg.clone());
            }
            continue;
        }

        if arg.starts_with('-') {
            forwarded.push(arg.clone());
            skip_to_forwarded = value_follows;
            continue;
        }

        ours.push(arg.clone());
    }

    (ours, forwarded)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::split_args;

    fn known() -> HashSet<String> {
        ["--model", "-m", "--yolo", "--non-interactive", "--verbose"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn args(raw: &[&str]) -> Vec<String> {
        std::iter::once("glm")
            .chain(raw.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn forwarded(raw: &[&str]) -> Vec<String> {
        split_args(&args(raw), &known()).1
    }

    #[test]
    fn no_args_forwards_nothing() {
        assert!(forwarded(&[]).is_empty());
    }

    #[test]
    fn only_known_flags_forward_nothing() {
        assert!(forwarded(&["--model", "glm-4.7"]).is_empty());
    }

    #[test]
    fn unknown_flag_with_value_is_forwarded() {
        assert_eq!(
            forwarded(&["--allowedTools", "Bash,Read"]),
            vec!["--allowedTools", "Bash,Read"]
        );
    }

    #[test]
    fn known_and_unknown_flags_are_separated() {
        assert_eq!(
            forwarded(&["--model", "glm-4.7", "--allowedTools", "Bash,Read"]),
            vec!["--allowedTools", "Bash,Read"]
        );
    }

    #[test]
    fn unknown_equals_form_is_forwarded() {
        assert_eq!(
            forwarded(&["--allowedTools=Bash,Read"]),
            vec!["--allowedTools=Bash,Read"]
        );
    }

    #[test]
    fn known_equals_form_is_kept() {
        assert!(forwarded(&["--model=glm-4.7"]).is_empty());
    }

    #[test]
    fn unknown_shorthand_with_value_is_forwarded() {
        assert_eq!(forwarded(&["-x", "value"]), vec!["-x", "value"]);
    }

    #[test]
    fn multiple_unknown_flags_keep_their_order() {
        assert_eq!(
            forwarded(&["--foo", "bar", "--baz", "qux"]),
            vec!["--foo", "bar", "--baz", "qux"]
        );
    }

    #[test]
    fn mixed_flags_only_forward_the_unknown_ones() {
        assert_eq!(
            forwarded(&["--model", "glm-4.7", "--foo", "bar", "--yolo", "--baz", "qux"]),
            vec!["--foo", "bar", "--baz", "qux"]
        );
    }

    #[test]
    fn glm_side_keeps_known_flags_and_positionals() {
        let (ours, _) = split_args(&args(&["--model", "glm-4.7", "--foo", "bar"]), &known());
        assert_eq!(ours, vec!["glm", "--model", "glm-4.7"]);
    }

    #[test]
    fn help_and_version_flags_stay_with_glm() {
        use clap::CommandFactory as _;

        let known = super::known_flags(&mut crate::cli::Cli::command());
        for flag in ["--help", "-h", "--version", "-V"] {
            assert!(known.contains(flag), "{flag} should be answered by glm");

            let (ours, forwarded) = split_args(&args(&[flag]), &known);
            assert!(forwarded.is_empty(), "{flag} must not be forwarded to claude");
            assert_eq!(ours, vec!["glm", flag]);
        }
    }
}

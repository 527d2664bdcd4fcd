use anyhow::{Context, Result};
use glm_core::config::ALLOW_UNVERIFIED_ENV;
use glm_core::{UpdateConfig, apply_update, check_for_update, format_release_notes};
use indicatif::{ProgressBar, ProgressStyle};

const RELEASE_NOTES_LINES: usize = 10;

/// `glm update`: check the release index and, unless `--check` was given,
/// download, verify, and install the newer binary.
pub fn run(check_only: bool) -> Result<()> {
    // Ambient environment is read here, once, at the process boundary.
    let config = UpdateConfig {
        allow_unverified: glm_platform::flag(ALLOW_UNVERIFIED_ENV),
        ..UpdateConfig::default()
    };
    let client = reqwest::blocking::Client::new();
    let current = env!("CARGO_PKG_VERSION");

    println!("Checking for updates...");
    let check = check_for_update(&client, &config, current).context("update check failed")?;

    if !check.has_update {
        println!(
            "glm {current} is up to date (latest release: {}).",
            check.latest_version
        );
        return Ok(());
    }

    println!(
        "New version available: {} (current: {current})",
        check.latest_version
    );
    if !check.release_notes.is_empty() {
        println!();
        println!(
            "{}",
            format_release_notes(&check.release_notes, RELEASE_NOTES_LINES)
        );
        println!();
    }
    if !check.release_url.is_empty() {
        println!("Release page: {}", check.release_url);
    }

    if check_only {
        return Ok(());
    }

    let bar = download_bar();
    let mut on_progress = |downloaded: u64, total: Option<u64>| {
        if let Some(total) = total {
            bar.set_length(total);
        }
        bar.set_position(downloaded);
    };

    apply_update(&client, &config, &check.latest_version, Some(&mut on_progress))
        .context("update failed")?;
    bar.finish_and_clear();

    println!(
        "Updated to {}. Restart glm to use the new version.",
        check.latest_version
    );
    Ok(())
}

fn download_bar() -> ProgressBar {
    let bar = ProgressBar::no_length();
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes}",
        )
        .expect("progress bar template is valid")
        .progress_chars("#>-"),
    );
    bar
}

use anyhow::{Result, bail};

use crate::cli::DEFAULT_MODEL;
use crate::config::Config;

pub const TOKEN_ENV: &str = "ANTHROPIC_AUTH_TOKEN";
pub const FALLBACK_TOKEN_ENV: &str = "GLM_TOKEN";

/// Resolve the auth token: environment first, then the config file. glm
/// never prompts; a missing token is an actionable error.
pub fn resolve() -> Result<String> {
    for name in [TOKEN_ENV, FALLBACK_TOKEN_ENV] {
        if let Ok(token) = std::env::var(name)
            && !token.is_empty()
        {
            return Ok(token);
        }
    }

    let config = Config::load()?;
    if !config.anthropic_auth_token.is_empty() {
        return Ok(config.anthropic_auth_token);
    }

    bail!(
        "no authentication token found; set {TOKEN_ENV} (or {FALLBACK_TOKEN_ENV}), \
         or run 'glm token set <TOKEN>'"
    )
}

/// Store a token in the config file, picking the default model on first use.
pub fn set(token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        bail!("token cannot be empty");
    }

    let mut config = Config::load()?;
    config.anthropic_auth_token = token.to_string();
    if config.default_model.is_none() {
        config.default_model = Some(DEFAULT_MODEL.to_string());
    }
    config.save()?;

    println!("Authentication token saved.");
    Ok(())
}

pub fn show() -> Result<()> {
    let token = resolve()?;
    println!("Current token: {}", masked(&token));
    Ok(())
}

pub fn clear() -> Result<()> {
    if Config::remove()? {
        println!("Authentication token cleared.");
    } else {
        println!("No token found to clear.");
    }
    Ok(())
}

/// Mask a token down to its first and last four characters.
fn masked(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

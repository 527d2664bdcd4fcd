use serde::Deserialize;
use thiserror::Error;

use crate::config::UpdateConfig;

/// Metadata of the latest published release. Fetched fresh per check, never
/// persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("failed to fetch release info: {0}")]
    Request(#[source] reqwest::Error),
    #[error("release index returned HTTP {status}{body_snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body_snippet: String,
    },
    #[error("failed to parse release info: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Query the release index for the latest published release.
///
/// One-shot: a transport failure or non-2xx status is returned to the caller
/// without retrying.
///
/// # Errors
/// Returns [`ReleaseError`] when the request fails, the index answers with a
/// non-2xx status, or the response body is not the expected JSON.
pub fn fetch_latest_release(
    client: &reqwest::blocking::Client,
    config: &UpdateConfig,
) -> Result<ReleaseInfo, ReleaseError> {
    let response = client
        .get(config.release_index_url())
        .header("User-Agent", "glm")
        .send()
        .map_err(ReleaseError::Request)?;

    if !response.status().is_success() {
        let status = response.status();
        let body_snippet = response
            .text()
            .ok()
            .map(|body| response_snippet(&body, 160))
            .unwrap_or_default();
        return Err(ReleaseError::HttpStatus {
            status,
            body_snippet,
        });
    }

    response.json().map_err(ReleaseError::Parse)
}

/// First non-empty line of an error body, bounded, for a one-line error
/// message.
fn response_snippet(body: &str, max_chars: usize) -> String {
    let line = body
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    let snippet: String = line.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}

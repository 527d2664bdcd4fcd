use std::io::{Read, Write};

use log::{debug, info};
use tempfile::{NamedTempFile, TempPath};
use thiserror::Error;

use crate::config::UpdateConfig;
use crate::platform::Platform;

const CHUNK_SIZE: usize = 32 * 1024;

/// Synchronous download progress hook, invoked after every chunk with
/// (bytes downloaded so far, total expected bytes). The total is `None` when
/// the server did not send a `Content-Length` header.
pub type ProgressFn<'a> = &'a mut dyn FnMut(u64, Option<u64>);

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to download {artifact}: {source}")]
    Request {
        artifact: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download of {artifact} failed with HTTP {status}")]
    HttpStatus {
        artifact: String,
        status: reqwest::StatusCode,
    },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

/// Download the release artifact for `platform` into a fresh uniquely-named
/// temp file.
///
/// The returned [`TempPath`] deletes the file when dropped; the installer
/// consumes it by renaming it into place. No partial file survives a failed
/// download.
///
/// # Errors
/// Returns [`DownloadError`] when the request fails, the server answers with
/// a non-2xx status, or a mid-stream read/write fails (in which case the
/// partial temp file has already been removed).
pub fn download_binary(
    client: &reqwest::blocking::Client,
    config: &UpdateConfig,
    version: &str,
    platform: Platform,
    progress: Option<ProgressFn<'_>>,
) -> Result<TempPath, DownloadError> {
    let artifact = config.artifact_name(platform);
    let url = config.download_url(version, &artifact);

    info!("downloading {artifact} from {url}");
    let response = client.get(&url).send().map_err(|source| {
        DownloadError::Request {
            artifact: artifact.clone(),
            source,
        }
    })?;

    if !response.status().is_success() {
        return Err(DownloadError::HttpStatus {
            artifact,
            status: response.status(),
        });
    }

    let total = response.content_length();
    let temp = tempfile::Builder::new()
        .prefix("glm-update-")
        .tempfile()
        .map_err(|source| DownloadError::io("failed to create temp file", source))?;

    stream_to_temp(response, temp, total, progress)
}

/// Drain `reader` into `temp` in fixed-size chunks, reporting progress after
/// every written chunk. On failure `temp` is dropped, which removes the
/// partial file from disk before the error surfaces.
fn stream_to_temp(
    mut reader: impl Read,
    mut temp: NamedTempFile,
    total: Option<u64>,
    mut progress: Option<ProgressFn<'_>>,
) -> Result<TempPath, DownloadError> {
    let mut buf = [0_u8; CHUNK_SIZE];
    let mut downloaded: u64 = 0;

    loop {
        let read = reader
            .read(&mut buf)
            .map_err(|source| DownloadError::io("failed to read download stream", source))?;
        if read == 0 {
            break;
        }

        temp.write_all(&buf[..read])
            .map_err(|source| DownloadError::io("failed to write to temp file", source))?;
        downloaded += read as u64;

        if let Some(callback) = progress.as_mut() {
            callback(downloaded, total);
        }
    }

    temp.flush()
        .map_err(|source| DownloadError::io("failed to flush temp file", source))?;

    debug!("download complete: {downloaded} bytes");
    Ok(temp.into_temp_path())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use tempfile::NamedTempFile;

    use super::{DownloadError, stream_to_temp};

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                Err(std::io::Error::other("connection reset"))
            } else {
                self.served = true;
                buf[..4].copy_from_slice(b"glm-");
                Ok(4)
            }
        }
    }

    #[test]
    fn successful_stream_reports_progress_and_keeps_bytes() {
        let temp = NamedTempFile::new().expect("temp file should be created");
        let payload: &[u8] = b"glm-linux-amd64 release payload";
        let mut seen = Vec::new();
        let mut on_progress = |downloaded: u64, total: Option<u64>| {
            seen.push((downloaded, total));
        };

        let path = stream_to_temp(
            payload,
            temp,
            Some(payload.len() as u64),
            Some(&mut on_progress),
        )
        .expect("streaming should succeed");

        let written = std::fs::read(&path).expect("streamed file should be readable");
        assert_eq!(written, payload);

        let (downloaded, total) = *seen.last().expect("progress should have been reported");
        assert_eq!(downloaded, payload.len() as u64);
        assert_eq!(total, Some(payload.len() as u64));
    }

    #[test]
    fn unknown_total_is_reported_as_none() {
        let temp = NamedTempFile::new().expect("temp file should be created");
        let mut seen_total = Some(0);
        let mut on_progress = |_downloaded: u64, total: Option<u64>| {
            seen_total = total;
        };

        stream_to_temp(&b"payload"[..], temp, None, Some(&mut on_progress))
            .expect("streaming should succeed");

        assert_eq!(seen_total, None);
    }

    #[test]
    fn failed_stream_leaves_no_temp_file_behind() {
        let temp = NamedTempFile::new().expect("temp file should be created");
        let path = temp.path().to_path_buf();

        let result = stream_to_temp(FailingReader { served: false }, temp, None, None);

        assert!(matches!(
            result,
            Err(DownloadError::Io {
                context: "failed to read download stream",
                ..
            })
        ));
        assert!(!path.exists(), "partial download should have been removed");
    }
}

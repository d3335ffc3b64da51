//! Streaming download of one resource to disk
//!
//! Bytes go to `<target>.part` while being hashed, and only a complete,
//! verified file is renamed over the target. A failed transfer removes the
//! partial file, so the target is either absent or the previous good copy.

use super::error::FetchError;
use crate::progress::Progress;
use futures::StreamExt;
use modelsync_common::checksum::{verify_checksum, StreamingChecksum};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Size and SHA-256 of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub bytes: u64,
    pub sha256: String,
}

/// Path of the in-progress file for `target`
pub fn part_path(target: &Path) -> PathBuf {
    let mut part = target.as_os_str().to_owned();
    part.push(".part");
    PathBuf::from(part)
}

/// GET `url` and persist the body at `target`
pub async fn download_to(
    client: &Client,
    url: &str,
    target: &Path,
    expected_sha256: Option<&str>,
    progress: &Progress,
    label: &str,
) -> Result<Downloaded, FetchError> {
    let response = client.get(url).send().await.map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let pb = progress.download(response.content_length(), label);
    let part = part_path(target);

    let result = stream_body(response, &part, &pb).await.and_then(|checksum| {
        let bytes = checksum.bytes();
        let sha256 = checksum.finalize();
        if let Some(expected) = expected_sha256 {
            verify_checksum(&sha256, expected).map_err(|_| FetchError::ChecksumMismatch {
                expected: expected.trim().to_lowercase(),
                actual: sha256.clone(),
            })?;
        }
        Ok(Downloaded { bytes, sha256 })
    });

    let result = match result {
        Ok(downloaded) => tokio::fs::rename(&part, target)
            .await
            .map(|()| downloaded)
            .map_err(|source| FetchError::Write {
                path: target.to_path_buf(),
                source,
            }),
        Err(e) => Err(e),
    };

    if result.is_err() {
        pb.abandon();
        // Nothing to clean up when the part file was never created.
        let _ = tokio::fs::remove_file(&part).await;
    } else {
        pb.finish_and_clear();
    }

    if let Ok(downloaded) = &result {
        debug!(path = %target.display(), bytes = downloaded.bytes, "Download complete");
    }
    result
}

async fn stream_body(
    response: reqwest::Response,
    part: &Path,
    pb: &indicatif::ProgressBar,
) -> Result<StreamingChecksum, FetchError> {
    let write_err = |source| FetchError::Write {
        path: part.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::create(part).await.map_err(write_err)?;
    let mut checksum = StreamingChecksum::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Body)?;
        file.write_all(&chunk).await.map_err(write_err)?;
        checksum.update(&chunk);
        pb.set_position(checksum.bytes());
    }

    file.flush().await.map_err(write_err)?;
    file.sync_all().await.map_err(write_err)?;
    Ok(checksum)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("models/alpha/scene.glb")),
            PathBuf::from("models/alpha/scene.glb.part")
        );
    }

    #[tokio::test]
    async fn test_download_writes_body_and_digest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("scene.bin");
        let url = format!("{}/a.bin", server.uri());

        let downloaded = download_to(&Client::new(), &url, &target, None, &Progress::hidden(), "a")
            .await
            .unwrap();

        assert_eq!(downloaded.bytes, 3);
        assert_eq!(
            downloaded.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(std::fs::read(&target).unwrap(), b"abc");
        assert!(!part_path(&target).exists());
    }

    #[tokio::test]
    async fn test_checksum_mismatch_keeps_previous_copy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("scene.glb");
        std::fs::write(&target, b"old").unwrap();

        let err = download_to(
            &Client::new(),
            &server.uri(),
            &target,
            Some("0000"),
            &Progress::hidden(),
            "x",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FetchError::ChecksumMismatch { .. }));
        assert_eq!(std::fs::read(&target).unwrap(), b"old");
        assert!(!part_path(&target).exists());
    }

    #[tokio::test]
    async fn test_error_status_creates_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("scene.glb");

        let err = download_to(&Client::new(), &server.uri(), &target, None, &Progress::hidden(), "x")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 404));
        assert!(!target.exists());
        assert!(!part_path(&target).exists());
    }
}

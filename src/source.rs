//! Scan source resolution
//!
//! Decides where a scan's sources come from: a directory packaged on the
//! fly, a pre-built archive, or nothing at all (an incremental scan may
//! legitimately reuse prior sources). Packaged archives live in a temp-file
//! guard and are removed once the upload attempt finishes, successful or
//! not.

use std::path::Path;

use log::{debug, info};

use crate::client::UploadChannel;
use crate::error::Result;
use crate::filter::FilterSet;
use crate::packager::{self, PackWarning};

/// Outcome of source resolution
#[derive(Debug, Default)]
pub struct ResolvedSource {
    /// Location reference for the scan request; `None` when no source was given
    pub upload_url: Option<String>,
    /// Per-file packaging failures, empty unless a directory was packaged
    pub warnings: Vec<PackWarning>,
}

/// Resolve the scan's source and hand it to the upload channel.
///
/// A source directory takes precedence over an explicit archive. The filter
/// flags only apply to directory packaging; an explicit archive is uploaded
/// as-is and never deleted.
pub async fn resolve(
    channel: &dyn UploadChannel,
    sources_file: Option<&Path>,
    source_dir: Option<&Path>,
    filter: Option<&str>,
    exclusions: Option<&str>,
) -> Result<ResolvedSource> {
    if let Some(dir) = source_dir {
        let filters = FilterSet::from_flags(filter, exclusions);
        if filters.is_empty() {
            debug!("no source filters supplied; packaging everything");
        }
        let outcome = packager::pack(dir, &filters)?;
        info!(
            "packaged {} files from {} into {}",
            outcome.file_count,
            dir.display(),
            outcome.archive.path().display()
        );

        // The archive guard lives until this block returns, so the temp file
        // is removed on the success and error paths alike.
        let upload_url = channel.upload(outcome.archive.path()).await?;
        debug!("uploaded sources to {upload_url}");

        return Ok(ResolvedSource {
            upload_url: Some(upload_url),
            warnings: outcome.warnings,
        });
    }

    if let Some(archive) = sources_file {
        let upload_url = channel.upload(archive).await?;
        debug!("uploaded sources to {upload_url}");
        return Ok(ResolvedSource {
            upload_url: Some(upload_url),
            warnings: Vec::new(),
        });
    }

    Ok(ResolvedSource::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, UploadError};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Records upload attempts; optionally fails them
    struct StubChannel {
        uploads: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl StubChannel {
        fn new(fail: bool) -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
                fail,
            }
        }

        fn uploaded(&self) -> Vec<PathBuf> {
            self.uploads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UploadChannel for StubChannel {
        async fn upload(&self, archive: &Path) -> Result<String> {
            assert!(archive.exists(), "archive must exist during upload");
            self.uploads.lock().unwrap().push(archive.to_path_buf());
            if self.fail {
                return Err(UploadError::Transfer("stub failure".to_string()).into());
            }
            Ok(format!("https://uploads.test/{}", archive.display()))
        }
    }

    #[tokio::test]
    async fn test_no_source_yields_empty_location_without_error() {
        let channel = StubChannel::new(false);
        let resolved = resolve(&channel, None, None, None, None).await.unwrap();

        assert!(resolved.upload_url.is_none());
        assert!(resolved.warnings.is_empty());
        assert!(channel.uploaded().is_empty());
    }

    #[tokio::test]
    async fn test_directory_is_packaged_and_archive_cleaned_up() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"alpha").unwrap();

        let channel = StubChannel::new(false);
        let resolved = resolve(&channel, None, Some(dir.path()), Some("*.txt"), None)
            .await
            .unwrap();

        assert!(resolved.upload_url.is_some());
        let uploads = channel.uploaded();
        assert_eq!(uploads.len(), 1);
        assert!(!uploads[0].exists(), "temp archive must be removed");
    }

    #[tokio::test]
    async fn test_directory_takes_precedence_over_archive() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
        let explicit = dir.path().join("prebuilt.zip");
        std::fs::write(&explicit, b"not really a zip").unwrap();

        let channel = StubChannel::new(false);
        resolve(&channel, Some(&explicit), Some(dir.path()), None, None)
            .await
            .unwrap();

        let uploads = channel.uploaded();
        assert_eq!(uploads.len(), 1);
        assert_ne!(uploads[0], explicit);
    }

    #[tokio::test]
    async fn test_explicit_archive_is_uploaded_and_kept() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("prebuilt.zip");
        std::fs::write(&explicit, b"zip bytes").unwrap();

        let channel = StubChannel::new(false);
        let resolved = resolve(&channel, Some(&explicit), None, None, None)
            .await
            .unwrap();

        assert!(resolved.upload_url.is_some());
        assert_eq!(channel.uploaded(), vec![explicit.clone()]);
        assert!(explicit.exists(), "user-supplied archive is never deleted");
    }

    #[tokio::test]
    async fn test_upload_failure_surfaces_and_still_cleans_up() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"alpha").unwrap();

        let channel = StubChannel::new(true);
        let err = resolve(&channel, None, Some(dir.path()), None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Upload(UploadError::Transfer(_))));
        let uploads = channel.uploaded();
        assert_eq!(uploads.len(), 1);
        assert!(!uploads[0].exists(), "temp archive removed on error path");
    }
}

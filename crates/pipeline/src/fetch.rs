//! Certificate retrieval: local media files or remote URLs.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use vitae_model::{FileRef, HasCertificate};

/// Bounds the total time spent on one remote certificate.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Always skippable, per record: the assembler logs and moves on.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("certificate file '{path}' unreadable: {message}")]
    Io { path: String, message: String },

    #[error("HTTP status {status} fetching '{url}'")]
    Status { url: String, status: u16 },

    #[error("network error fetching '{url}': {message}")]
    Network { url: String, message: String },
}

/// Retrieves certificate bytes for records implementing
/// [`HasCertificate`]. Local references resolve under the media root;
/// remote references are fetched with a bounded timeout (a timeout is
/// indistinguishable from any other network failure).
#[derive(Debug)]
pub struct CertificateFetcher {
    media_root: PathBuf,
    client: reqwest::blocking::Client,
}

impl CertificateFetcher {
    pub fn new(media_root: impl Into<PathBuf>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            media_root: media_root.into(),
            client,
        })
    }

    /// `Ok(None)` when the record carries no certificate reference;
    /// that is not an error, the record simply contributes nothing.
    pub fn fetch(&self, record: &dyn HasCertificate) -> Result<Option<Vec<u8>>, FetchError> {
        let Some(file_ref) = record.certificate_ref() else {
            return Ok(None);
        };
        match file_ref {
            FileRef::Remote(url) => self.fetch_remote(url).map(Some),
            FileRef::Local(path) => self.read_local(path).map(Some),
        }
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn read_local(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        // A local reference must stay inside the media root.
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(FetchError::Io {
                path: path.to_string(),
                message: "reference escapes the media root".to_string(),
            });
        }
        let full_path = self.media_root.join(relative);
        std::fs::read(&full_path).map_err(|e| FetchError::Io {
            path: full_path.to_string_lossy().into_owned(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use vitae_model::CourseEntry;

    fn course_with_certificate(reference: Option<&str>) -> CourseEntry {
        serde_json::from_value(serde_json::json!({
            "name": "Rust",
            "institution": "UTN",
            "hours": 40,
            "completed_on": "2023-06-01",
            "certificate": reference,
        }))
        .unwrap()
    }

    #[test]
    fn test_fetch_local_certificate() {
        let media = tempdir().unwrap();
        fs::create_dir_all(media.path().join("cursos")).unwrap();
        fs::write(media.path().join("cursos/rust.pdf"), b"%PDF-stub").unwrap();

        let fetcher = CertificateFetcher::new(media.path(), DEFAULT_FETCH_TIMEOUT).unwrap();
        let course = course_with_certificate(Some("cursos/rust.pdf"));

        let bytes = fetcher.fetch(&course).unwrap().unwrap();
        assert_eq!(bytes, b"%PDF-stub");
    }

    #[test]
    fn test_fetch_missing_local_file_is_io_error() {
        let media = tempdir().unwrap();
        let fetcher = CertificateFetcher::new(media.path(), DEFAULT_FETCH_TIMEOUT).unwrap();
        let course = course_with_certificate(Some("cursos/gone.pdf"));

        let result = fetcher.fetch(&course);
        assert!(matches!(result, Err(FetchError::Io { .. })));
    }

    #[test]
    fn test_fetch_without_reference_contributes_nothing() {
        let media = tempdir().unwrap();
        let fetcher = CertificateFetcher::new(media.path(), DEFAULT_FETCH_TIMEOUT).unwrap();
        let course = course_with_certificate(None);

        assert!(fetcher.fetch(&course).unwrap().is_none());
    }

    #[test]
    fn test_fetch_does_not_follow_parent_directory_references() {
        let media = tempdir().unwrap();
        let root = media.path().join("media");
        fs::create_dir_all(&root).unwrap();
        fs::write(media.path().join("secret.pdf"), b"%PDF-outside").unwrap();

        let fetcher = CertificateFetcher::new(&root, DEFAULT_FETCH_TIMEOUT).unwrap();
        let course = course_with_certificate(Some("../secret.pdf"));

        let result = fetcher.fetch(&course);
        assert!(matches!(result, Err(FetchError::Io { .. })));
    }

    #[test]
    fn test_fetch_non_success_status_is_status_error() {
        let media = tempdir().unwrap();
        let fetcher = CertificateFetcher::new(media.path(), DEFAULT_FETCH_TIMEOUT).unwrap();
        let url = crate::test_support::serve_one_response(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\n\r\n",
        );
        let course = course_with_certificate(Some(&format!("{}/cert.pdf", url)));

        let result = fetcher.fetch(&course);
        assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    }

    #[test]
    fn test_fetch_unreachable_remote_is_network_error() {
        let media = tempdir().unwrap();
        let fetcher =
            CertificateFetcher::new(media.path(), Duration::from_millis(500)).unwrap();
        // Nothing listens on the discard port.
        let course = course_with_certificate(Some("http://127.0.0.1:9/cert.pdf"));

        let result = fetcher.fetch(&course);
        assert!(matches!(result, Err(FetchError::Network { .. })));
    }
}

//! Filesystem-backed URI resolution for media and static assets.

use crate::UriResolver;
use std::path::{Path, PathBuf};

/// Resolves public URL prefixes to filesystem paths.
///
/// Rules, applied in order:
/// 1. URIs with an absolute scheme (`http`, `https`, `data`) pass
///    through unchanged; the transport layer resolves them later.
/// 2. URIs under the media public prefix rewrite to the media root.
/// 3. URIs under the static public prefix rewrite to the static root.
/// 4. The rewritten path is returned only if the file exists.
/// 5. Static URIs that miss the static root are retried against the
///    configured static search paths (assets not collected into the
///    primary static root).
/// 6. Anything else comes back unchanged.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    media_url: String,
    media_root: PathBuf,
    static_url: String,
    static_root: PathBuf,
    static_search_paths: Vec<PathBuf>,
}

impl ResourceLocator {
    pub fn new(
        media_url: impl Into<String>,
        media_root: impl Into<PathBuf>,
        static_url: impl Into<String>,
        static_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            media_url: media_url.into(),
            media_root: media_root.into(),
            static_url: static_url.into(),
            static_root: static_root.into(),
            static_search_paths: Vec::new(),
        }
    }

    /// Adds secondary directories searched for static assets missing
    /// from the static root.
    pub fn with_static_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.static_search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    fn has_absolute_scheme(uri: &str) -> bool {
        uri.starts_with("http://") || uri.starts_with("https://") || uri.starts_with("data:")
    }
}

impl UriResolver for ResourceLocator {
    fn resolve(&self, uri: &str) -> String {
        if Self::has_absolute_scheme(uri) {
            return uri.to_string();
        }

        let (relative, under_static) = if let Some(rest) = uri.strip_prefix(&self.media_url) {
            (rest, false)
        } else if let Some(rest) = uri.strip_prefix(&self.static_url) {
            (rest, true)
        } else {
            // Not under a known public prefix.
            return uri.to_string();
        };

        let root = if under_static {
            &self.static_root
        } else {
            &self.media_root
        };
        let candidate = root.join(relative);
        if candidate.is_file() {
            return candidate.to_string_lossy().into_owned();
        }

        if under_static {
            for dir in &self.static_search_paths {
                let fallback = dir.join(relative);
                if fallback.is_file() {
                    return fallback.to_string_lossy().into_owned();
                }
            }
        }

        log::debug!("resource '{}' did not resolve to a file, passing through", uri);
        uri.to_string()
    }

    fn name(&self) -> &'static str {
        "ResourceLocator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn locator_with_roots(media: &Path, statics: &Path) -> ResourceLocator {
        ResourceLocator::new("/media/", media, "/static/", statics)
    }

    #[test]
    fn test_absolute_uris_pass_through() {
        let dir = tempdir().unwrap();
        let locator = locator_with_roots(dir.path(), dir.path());

        let uri = "https://cdn.example.com/logo.png";
        assert_eq!(locator.resolve(uri), uri);
        assert_eq!(locator.resolve("http://x.test/a.css"), "http://x.test/a.css");
        assert_eq!(locator.resolve("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_media_uri_rewrites_to_media_root() {
        let media = tempdir().unwrap();
        let statics = tempdir().unwrap();
        fs::create_dir(media.path().join("perfil")).unwrap();
        fs::write(media.path().join("perfil/photo.jpg"), b"jpg").unwrap();

        let locator = locator_with_roots(media.path(), statics.path());
        let resolved = locator.resolve("/media/perfil/photo.jpg");
        assert_eq!(
            resolved,
            media.path().join("perfil/photo.jpg").to_string_lossy()
        );
    }

    #[test]
    fn test_static_uri_rewrites_to_static_root() {
        let media = tempdir().unwrap();
        let statics = tempdir().unwrap();
        fs::write(statics.path().join("cv.css"), b"body{}").unwrap();

        let locator = locator_with_roots(media.path(), statics.path());
        let resolved = locator.resolve("/static/cv.css");
        assert_eq!(resolved, statics.path().join("cv.css").to_string_lossy());
    }

    #[test]
    fn test_missing_file_returns_uri_unchanged() {
        let dir = tempdir().unwrap();
        let locator = locator_with_roots(dir.path(), dir.path());

        assert_eq!(locator.resolve("/media/missing.png"), "/media/missing.png");
    }

    #[test]
    fn test_unknown_prefix_returns_uri_unchanged() {
        let dir = tempdir().unwrap();
        let locator = locator_with_roots(dir.path(), dir.path());

        assert_eq!(locator.resolve("/other/file.png"), "/other/file.png");
    }

    #[test]
    fn test_static_search_path_fallback() {
        let media = tempdir().unwrap();
        let statics = tempdir().unwrap();
        let extra = tempdir().unwrap();
        fs::write(extra.path().join("icons.css"), b"x").unwrap();

        let locator = locator_with_roots(media.path(), statics.path())
            .with_static_search_paths([extra.path()]);

        let resolved = locator.resolve("/static/icons.css");
        assert_eq!(resolved, extra.path().join("icons.css").to_string_lossy());
    }

    #[test]
    fn test_fallback_does_not_apply_to_media_uris() {
        let media = tempdir().unwrap();
        let statics = tempdir().unwrap();
        let extra = tempdir().unwrap();
        fs::write(extra.path().join("photo.jpg"), b"x").unwrap();

        let locator = locator_with_roots(media.path(), statics.path())
            .with_static_search_paths([extra.path()]);

        // The search paths are a static-asset mechanism only.
        assert_eq!(locator.resolve("/media/photo.jpg"), "/media/photo.jpg");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let media = tempdir().unwrap();
        let statics = tempdir().unwrap();
        fs::write(media.path().join("a.png"), b"png").unwrap();

        let locator = locator_with_roots(media.path(), statics.path());
        let first = locator.resolve("/media/a.png");
        let second = locator.resolve("/media/a.png");
        assert_eq!(first, second);

        let miss_first = locator.resolve("/media/b.png");
        let miss_second = locator.resolve("/media/b.png");
        assert_eq!(miss_first, miss_second);
    }
}

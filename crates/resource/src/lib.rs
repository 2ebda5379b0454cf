//! Resolution of URIs referenced inside rendered HTML fragments.
//!
//! The HTML→PDF converter asks a [`UriResolver`] for every non-absolute
//! resource reference (images, stylesheets) it encounters. Resolution
//! is best-effort: an unresolvable URI is returned unchanged and the
//! converter simply fails to embed that one resource.

mod locator;

pub use locator::ResourceLocator;

use std::fmt::Debug;

/// Maps a URI from rendered HTML to something the converter can read.
///
/// Implementations must be pure: resolving the same URI twice yields
/// the same result.
pub trait UriResolver: Send + Sync + Debug {
    /// Resolve `uri` to a local filesystem path, or return it
    /// unchanged (absolute URIs, unknown prefixes, missing files).
    fn resolve(&self, uri: &str) -> String;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// A resolver that leaves every URI untouched. Useful in tests and for
/// fragments known to reference no local resources.
#[derive(Debug, Default, Clone)]
pub struct PassthroughResolver;

impl UriResolver for PassthroughResolver {
    fn resolve(&self, uri: &str) -> String {
        uri.to_string()
    }

    fn name(&self) -> &'static str {
        "PassthroughResolver"
    }
}

//! Rendering layer: named section fragments to HTML, HTML to PDF.
//!
//! The [`FragmentRenderer`] produces one HTML string per section mode
//! from embedded handlebars templates. The [`HtmlConverter`] trait is
//! the seam to the PDF conversion step; [`TextFlowConverter`] is the
//! bundled implementation.

mod context;
mod convert;
mod error;
mod renderer;
mod style;
mod templates;

pub use context::{CertificateIndexEntry, RenderContext};
pub use convert::{HtmlConverter, TextFlowConverter};
pub use error::{ConversionError, RenderError};
pub use renderer::{FragmentRenderer, SectionMode};
pub use style::{FontFamily, StyleOptions};

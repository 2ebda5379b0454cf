//! Vitae: a CV/portfolio PDF assembly engine.
//!
//! The facade crate re-exports the workspace members so library
//! consumers depend on a single crate:
//!
//! - [`model`]: record types and the content repository.
//! - [`composer`]: lopdf-based page merging, overlays and numbering.
//! - [`resource`]: URI resolution for media and static assets.
//! - [`render`]: section templates and HTML→PDF conversion.
//! - [`pipeline`]: the request-to-document assembler.
//!
//! The HTTP front end lives in the separate `vitae-server` binary
//! crate.

pub use vitae_composer as composer;
pub use vitae_model as model;
pub use vitae_pipeline as pipeline;
pub use vitae_render as render;
pub use vitae_resource as resource;

pub use vitae_model::{ContentRepository, CvData, InMemoryRepository, Profile};
pub use vitae_pipeline::{AssembleError, AssembledCv, CvAssembler, CvRequest};

// Commonly needed third-party types.
pub use vitae_composer::lopdf;

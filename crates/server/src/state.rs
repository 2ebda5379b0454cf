use crate::config::Config;
use crate::pages::PageRenderer;
use std::sync::Arc;
use vitae_model::ContentRepository;
use vitae_pipeline::CvAssembler;

/// Shared application state accessible to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Builds the CV PDF for one request at a time.
    pub assembler: Arc<CvAssembler>,

    /// Read-only content behind every page and the PDF endpoint.
    pub repository: Arc<dyn ContentRepository>,

    /// Renders the public HTML pages.
    pub pages: Arc<PageRenderer>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        assembler: CvAssembler,
        repository: Arc<dyn ContentRepository>,
        pages: PageRenderer,
        config: Config,
    ) -> Self {
        Self {
            assembler: Arc::new(assembler),
            repository,
            pages: Arc::new(pages),
            config: Arc::new(config),
        }
    }
}

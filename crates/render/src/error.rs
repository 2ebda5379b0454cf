use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template registration error: {0}")]
    Registration(#[from] handlebars::TemplateError),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// HTML→PDF conversion failure. Fatal for the mandatory top block,
/// skippable for every other block.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("refusing to convert empty HTML input")]
    EmptyInput,

    #[error("PDF build error: {0}")]
    Pdf(#[from] lopdf::Error),
}

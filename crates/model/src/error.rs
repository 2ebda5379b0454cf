use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

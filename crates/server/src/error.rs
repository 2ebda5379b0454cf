use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use vitae_pipeline::AssembleError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("CV assembly failed: {0}")]
    Assembly(#[from] AssembleError),

    #[error("Page rendering failed: {0}")]
    Page(#[from] handlebars::RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Assembly(ref e) => {
                tracing::error!("CV assembly failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AssemblyFailed",
                    format!("CV generation error: {}", e),
                )
            }
            Self::Page(_) | Self::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use vitae_pipeline::CvRequest;

/// CV download endpoint. Assembly is CPU- and IO-bound (rendering,
/// certificate fetching, PDF merging), so it runs on the blocking
/// pool.
pub async fn download_cv(
    State(state): State<AppState>,
    Query(request): Query<CvRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(custom = request.is_custom(), "CV generation request");

    let assembler = state.assembler.clone();
    let cv = tokio::task::spawn_blocking(move || assembler.assemble(&request))
        .await
        .map_err(|e| ServiceError::Internal(format!("assembly task panicked: {}", e)))??;

    tracing::info!(bytes = cv.bytes.len(), filename = %cv.filename, "CV assembled");

    let disposition = HeaderValue::from_str(&format!("inline; filename=\"{}\"", cv.filename))
        .unwrap_or_else(|_| HeaderValue::from_static("inline; filename=\"CV.pdf\""));

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/pdf"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        cv.bytes,
    ))
}

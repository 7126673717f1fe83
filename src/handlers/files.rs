use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::path::PathBuf;
use tokio::fs;

use crate::AppState;

/// Serve a stored resume. Uploads are renamed to UUIDs on write, so a
/// path component in `filename` can only be an attack; reject it.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response<Body>, StatusCode> {
    if filename.contains('/') || filename.contains("..") {
        return Err(StatusCode::FORBIDDEN);
    }

    let file_path = PathBuf::from(&state.upload_dir).join(&filename);

    let file_content = match fs::read(&file_path).await {
        Ok(content) => content,
        Err(_) => return Err(StatusCode::NOT_FOUND),
    };

    let content_type = match file_path.extension().and_then(|ext| ext.to_str()) {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, file_content.len())
        .body(Body::from(file_content))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

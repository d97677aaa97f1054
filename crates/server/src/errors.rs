use axum::http::StatusCode;

/// Collapse extractor failures into an opaque 500 response
pub fn internal_error<E: std::fmt::Display>(err: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

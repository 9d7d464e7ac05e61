use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Body served by [`text`].
pub const TEXT_BODY: &str = "Hello, from the echo server!";

/// Handler answering with the status code taken from the path.
pub async fn respond(Path(code): Path<u16>) -> impl IntoResponse {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!("status {code}")),
        Err(_) => (StatusCode::BAD_REQUEST, format!("invalid status {code}")),
    }
}

/// Handler answering with a plain text body.
pub async fn text() -> &'static str {
    TEXT_BODY
}

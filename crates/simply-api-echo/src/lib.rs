//! A development server that mirrors every request back as JSON.
//!
//! Point a [`simply_api::SimplyApi`] at it to see exactly which URL, query,
//! headers and body the facade produced.

pub mod handlers;

use axum::{Router, http::HeaderValue, http::Method, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::echo::Echo;

/// Environment variable holding the address the binary binds to.
pub const ADDR_ENV: &str = "ECHO_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3030";

fn cors() -> CorsLayer {
    let origins = if cfg!(debug_assertions) {
        let dev_ports = vec![3000, 8000, 8080, 8081, 5173];
        let mut allowed_origins = Vec::new();
        for port in dev_ports {
            allowed_origins.push(format!("http://localhost:{}", port));
            allowed_origins.push(format!("http://127.0.0.1:{}", port));
        }
        allowed_origins
    } else {
        vec![]
    };

    CorsLayer::new()
        .allow_origin(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        )
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
}

/// Builds the echo router.
pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", get(handlers::status::respond))
        .route("/text", get(handlers::status::text))
        .fallback(handlers::echo::echo)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

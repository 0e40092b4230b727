//! Route table, body limits and request tracing.

use axum::extract::{DefaultBodyLimit, Extension, connect_info::ConnectInfo};
use axum::http::Request;
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info_span};

use crate::error::not_found;
use crate::frontend;
use crate::http::add_security_headers;
use crate::storage::Storage;
use crate::{files, upload};

/// Builds the application router. `max_body_size` of 0 lifts the body limit.
pub fn build_router(storage: Arc<Storage>, max_body_size: usize) -> Router {
    let static_files = frontend::static_files(storage.root_path());
    let body_limit = if max_body_size == 0 {
        DefaultBodyLimit::disable()
    } else {
        DefaultBodyLimit::max(max_body_size)
    };

    Router::new()
        .route("/", get(frontend::serve_index).fallback(not_found))
        .route(
            "/send",
            post(upload::send_file).fallback_service(static_files.clone()),
        )
        .route(
            "/dirlist",
            post(files::list_dir).fallback_service(static_files.clone()),
        )
        .fallback_service(static_files)
        .layer(body_limit)
        .layer(middleware::from_fn(add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let client_ip = request
                        .extensions()
                        .get::<ConnectInfo<SocketAddr>>()
                        .map(|ConnectInfo(addr)| addr.ip().to_string())
                        .unwrap_or_else(|| "unknown".to_string());

                    info_span!(
                        env!("CARGO_CRATE_NAME"),
                        client_ip,
                        method = ?request.method(),
                        path = ?request.uri().path(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(Extension(storage))
}

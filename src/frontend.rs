//! Embedded index page and static file fallback.

use axum::body::Body as AxumBody;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get_service};
use rust_embed::RustEmbed;
use std::path::Path;
use tower_http::services::ServeDir;

use crate::error::{ApiError, not_found};

#[derive(RustEmbed)]
#[folder = "assets"]
/// Assets compiled into the binary.
pub struct FrontendAssets;

pub const INDEX_PAGE: &str = "index.html";

/// Serves the upload page at `/`.
pub async fn serve_index() -> Result<Response, ApiError> {
    load_embedded_asset(INDEX_PAGE)?.ok_or(ApiError::NotFound)
}

/// GET/HEAD are answered from files under `root`; other methods get the JSON 404.
pub fn static_files(root: &Path) -> MethodRouter {
    get_service(ServeDir::new(root)).fallback(not_found)
}

fn load_embedded_asset(path: &str) -> Result<Option<Response>, ApiError> {
    let Some(asset) = FrontendAssets::get(path) else {
        return Ok(None);
    };
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let mut headers = HeaderMap::new();
    let content_type = HeaderValue::from_str(mime.essence_str())
        .map_err(|err| ApiError::Io(std::io::Error::other(err)))?;
    headers.insert(header::CONTENT_TYPE, content_type);
    Ok(Some(
        (headers, AxumBody::from(asset.data.into_owned())).into_response(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_is_embedded() {
        let asset = FrontendAssets::get(INDEX_PAGE).expect("embedded index");
        let html = std::str::from_utf8(&asset.data).expect("utf-8 page");
        assert!(html.contains("/send"));
        assert!(html.contains("/dirlist"));
    }

    #[tokio::test]
    async fn index_is_served_as_html() {
        let response = serve_index().await.expect("index response");
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("text/html"))
        );
    }
}

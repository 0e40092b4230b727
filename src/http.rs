//! HTTP helpers: request body decoding and baseline response headers.

use axum::body::{Body as AxumBody, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::{middleware, response::Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decodes a JSON request body into its declared schema.
///
/// The `Content-Type` header is not inspected: browsers posting a string via
/// `XMLHttpRequest` label it `text/plain`.
pub fn parse_json<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(&body?)?)
}

/// Adds baseline security response headers.
pub async fn add_security_headers(
    request: Request<AxumBody>,
    next: middleware::Next,
) -> Result<Response, StatusCode> {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok(response)
}

//! Single-request upload handler: base64 payload written with exclusive create.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::Extension;
use axum::response::Json as JsonResponse;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::http::parse_json;
use crate::storage::{RelativeDir, Storage};

#[derive(Deserialize)]
pub(crate) struct UploadRequest {
    #[serde(default)]
    dir: String,
    name: String,
    data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadResponse {
    result: &'static str,
}

/// Stores an uploaded file, refusing to replace one that already exists.
pub async fn send_file(
    Extension(storage): Extension<Arc<Storage>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<JsonResponse<UploadResponse>, ApiError> {
    let request: UploadRequest = parse_json(body)?;
    let dir = RelativeDir::parse(&request.dir)?;
    let file_name = basename(&request.name).ok_or(ApiError::InvalidFileName)?;
    let data = decode_payload(&request.data)?;

    let target = storage.create_exclusive(&dir, file_name, &data).await?;
    info!(path = ?target, size = data.len(), "file uploaded");
    Ok(JsonResponse(UploadResponse { result: "OK" }))
}

/// Final component of a client-proposed name; directory parts are dropped.
fn basename(name: &str) -> Option<&str> {
    Path::new(name).file_name().and_then(|value| value.to_str())
}

fn decode_payload(data: &str) -> Result<Vec<u8>, ApiError> {
    if data.bytes().any(|byte| byte.is_ascii_whitespace()) {
        let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        return Ok(STANDARD.decode(compact)?);
    }
    Ok(STANDARD.decode(data)?)
}

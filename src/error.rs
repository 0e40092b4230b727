//! API error kinds and their JSON error envelope.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use std::io;
use tracing::warn;

use crate::storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    InvalidDirectory,
    InvalidFileName,
    NotADirectory,
    Decode(base64::DecodeError),
    Payload(serde_json::Error),
    Body(BytesRejection),
    Io(io::Error),
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Body(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the envelope.
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidDirectory => "Invalid directory".into(),
            ApiError::InvalidFileName => "Invalid file name".into(),
            ApiError::NotADirectory => "Not a directory".into(),
            ApiError::Decode(err) => err.to_string(),
            ApiError::Payload(err) => err.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Io(err) => err.to_string(),
            ApiError::NotFound => "Not found".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.message();
        if status != StatusCode::NOT_FOUND {
            warn!(error = %error, "request failed");
        }
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::InvalidDirectory => ApiError::InvalidDirectory,
            StorageError::NotADirectory => ApiError::NotADirectory,
            StorageError::Io(err) => ApiError::Io(err),
        }
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(error: base64::DecodeError) -> Self {
        ApiError::Decode(error)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Payload(error)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Body(rejection)
    }
}

/// Fallback for every method/path pair without a handler.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn envelope(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn not_found_is_404_envelope() {
        let (status, body) = envelope(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn storage_errors_map_to_500_envelopes() {
        let (status, body) = envelope(StorageError::NotADirectory.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Not a directory" }));

        let io_err = io::Error::new(io::ErrorKind::AlreadyExists, "File exists");
        let (status, body) = envelope(StorageError::Io(io_err).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "File exists" }));
    }
}

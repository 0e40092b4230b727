//! Directory listing handler.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::Extension;
use axum::response::Json as JsonResponse;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::http::parse_json;
use crate::storage::{DirectoryEntry, RelativeDir, Storage};

#[derive(Deserialize)]
pub(crate) struct DirListRequest {
    dir: String,
}

/// Lists one directory level. The response body is the bare entry array.
pub async fn list_dir(
    Extension(storage): Extension<Arc<Storage>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<JsonResponse<Vec<DirectoryEntry>>, ApiError> {
    let DirListRequest { dir } = parse_json(body)?;
    let relative = RelativeDir::parse(&dir)?;
    let entries = storage.list_dir(&relative).await?;
    info!(dir, count = entries.len(), "list directory");
    Ok(JsonResponse(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EntryKind;
    use tempfile::tempdir;

    fn make_storage() -> (tempfile::TempDir, Arc<Storage>) {
        let temp = tempdir().expect("tempdir");
        let storage = Arc::new(Storage::new(temp.path().to_path_buf()));
        (temp, storage)
    }

    async fn list(storage: &Arc<Storage>, dir: &str) -> Result<Vec<DirectoryEntry>, ApiError> {
        let body = Bytes::from(serde_json::to_vec(&serde_json::json!({ "dir": dir })).expect("encode"));
        list_dir(Extension(storage.clone()), Ok(body))
            .await
            .map(|JsonResponse(entries)| entries)
    }

    #[tokio::test]
    async fn empty_directory_lists_nothing() {
        let (temp, storage) = make_storage();
        std::fs::create_dir(temp.path().join("inbox")).expect("create inbox");

        let entries = list(&storage, "inbox").await.expect("list");

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn entry_paths_are_reusable_as_dir_arguments() {
        let (temp, storage) = make_storage();
        std::fs::create_dir_all(temp.path().join("a/b")).expect("create tree");
        std::fs::write(temp.path().join("a/b/deep.txt"), b"x").expect("write file");

        let top = list(&storage, "a").await.expect("list a");
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].kind, EntryKind::Dir);
        assert_eq!(top[0].path, "a/b");

        let nested = list(&storage, &top[0].path).await.expect("list a/b");
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].kind, EntryKind::File);
        assert_eq!(nested[0].name, "deep.txt");
        assert_eq!(nested[0].path, "a/b/deep.txt");
    }

    #[tokio::test]
    async fn missing_directory_is_not_a_directory() {
        let (_temp, storage) = make_storage();

        let result = list(&storage, "missing").await;

        assert!(matches!(result, Err(ApiError::NotADirectory)));
    }

    #[tokio::test]
    async fn traversal_is_invalid_directory() {
        let (_temp, storage) = make_storage();

        assert!(matches!(list(&storage, "..").await, Err(ApiError::InvalidDirectory)));
        assert!(matches!(list(&storage, "/etc").await, Err(ApiError::InvalidDirectory)));
    }

    #[tokio::test]
    async fn missing_dir_field_is_payload_error() {
        let (_temp, storage) = make_storage();

        let result = list_dir(Extension(storage), Ok(Bytes::from_static(b"{}"))).await;

        assert!(matches!(result, Err(ApiError::Payload(_))));
    }
}

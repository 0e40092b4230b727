use serde::Serialize;
use std::cmp::Ordering;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Returns true when `candidate` is a root-relative path with no `..` segment.
///
/// Absolute paths (a root or drive prefix component) are rejected, as is a
/// parent-directory segment in any position. Existence is not checked.
pub fn is_safe_relative_dir(candidate: &str) -> bool {
    Path::new(candidate)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// A validated, normalized directory path relative to the storage root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelativeDir(PathBuf);

impl RelativeDir {
    pub fn parse(candidate: &str) -> Result<Self, StorageError> {
        if !is_safe_relative_dir(candidate) {
            return Err(StorageError::InvalidDirectory);
        }
        let normalized = Path::new(candidate)
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect();
        Ok(Self(normalized))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Root-relative path of a child, `/`-separated for use in URLs.
    pub fn child_path(&self, name: &str) -> String {
        let mut segments: Vec<String> = self
            .0
            .iter()
            .map(|segment| segment.to_string_lossy().into_owned())
            .collect();
        segments.push(name.to_string());
        segments.join("/")
    }
}

#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Fails unless the root exists and is a directory.
    pub async fn ensure_root(&self) -> io::Result<()> {
        let metadata = fs::metadata(&self.root).await?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", self.root.display()),
            ));
        }
        Ok(())
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, dir: &RelativeDir) -> PathBuf {
        self.root.join(dir.as_path())
    }

    /// Lists the immediate children of `dir`, directories first.
    pub async fn list_dir(&self, dir: &RelativeDir) -> Result<Vec<DirectoryEntry>, StorageError> {
        let target = self.resolve(dir);
        match fs::metadata(&target).await {
            Ok(metadata) if metadata.is_dir() => {}
            _ => return Err(StorageError::NotADirectory),
        }

        let mut reader = fs::read_dir(&target).await?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks; entries that vanish mid-listing count as files.
            let kind = match fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_dir() => EntryKind::Dir,
                _ => EntryKind::File,
            };
            entries.push(DirectoryEntry {
                path: dir.child_path(&name),
                name,
                kind,
            });
        }

        entries.sort_by(|a, b| match (a.kind, b.kind) {
            (EntryKind::Dir, EntryKind::File) => Ordering::Less,
            (EntryKind::File, EntryKind::Dir) => Ordering::Greater,
            _ => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        });

        Ok(entries)
    }

    /// Writes `data` to `dir/file_name`, failing if the file already exists.
    pub async fn create_exclusive(
        &self,
        dir: &RelativeDir,
        file_name: &str,
        data: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let target = self.resolve(dir).join(file_name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await?;

        let written: io::Result<()> = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;
        if let Err(err) = written {
            drop(file);
            if let Err(cleanup_err) = fs::remove_file(&target).await {
                warn!(path = ?target, error = %cleanup_err, "failed to remove partial upload");
            }
            return Err(StorageError::Io(err));
        }

        Ok(target)
    }
}

#[derive(Debug)]
pub enum StorageError {
    InvalidDirectory,
    NotADirectory,
    Io(io::Error),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
}

#[derive(Debug, Serialize)]
pub struct DirectoryEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub path: String,
}

//! Local public storage for roster photos.
//!
//! Layout: `<root>/<roster storage dir>/<filename>`. The same tree is served
//! read-only under `/storage`, so a stored filename maps directly onto its
//! public URL (see [`RosterKind::image_url`]).

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::roster::RosterKind;
use crate::upload::AcceptedImage;

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir_of(&self, kind: RosterKind) -> PathBuf {
        self.root.join(kind.storage_dir())
    }

    /// Absolute path for a stored filename. Any directory part of `name`
    /// is discarded so a tampered column value cannot escape the roster
    /// directory.
    pub fn path_of(&self, kind: RosterKind, name: &str) -> Result<PathBuf, CoreError> {
        let file = Path::new(name)
            .file_name()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| CoreError::Storage(format!("Invalid stored filename '{name}'")))?;
        Ok(self.dir_of(kind).join(file))
    }

    /// Write an accepted photo and return its stored filename.
    ///
    /// Names are content-addressed, so an existing file with the same name
    /// already holds these bytes and is left as is. Each write goes through
    /// its own temp file in the roster directory and is then renamed into
    /// place; concurrent uploads of the same photo all succeed.
    pub async fn put(&self, kind: RosterKind, image: &AcceptedImage) -> Result<String, CoreError> {
        let name = image.stored_name();
        let path = self.path_of(kind, &name)?;

        if tokio::fs::try_exists(&path).await? {
            tracing::debug!(%kind, file = %name, "Photo already stored");
            return Ok(name);
        }

        let dir = self.dir_of(kind);
        tokio::fs::create_dir_all(&dir).await?;

        let bytes = image.bytes.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_via_temp(&dir, &target, &bytes))
            .await
            .map_err(|e| CoreError::Storage(format!("Photo write task failed: {e}")))??;

        tracing::debug!(%kind, file = %name, bytes = image.bytes.len(), "Photo stored");
        Ok(name)
    }

    /// Remove a stored photo. Returns `false` if it was already gone.
    pub async fn remove(&self, kind: RosterKind, name: &str) -> Result<bool, CoreError> {
        let path = self.path_of(kind, name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(test)]
    pub async fn exists(&self, kind: RosterKind, name: &str) -> bool {
        match self.path_of(kind, name) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

/// Write `bytes` to a uniquely named temp file in `dir`, then rename it to
/// `target`. Losing a rename race to an identical write counts as success.
fn write_via_temp(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), CoreError> {
    let mut tmp = tempfile::Builder::new()
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    match tmp.persist(target) {
        Ok(_) => Ok(()),
        Err(_) if target.exists() => Ok(()),
        Err(e) => Err(e.error.into()),
    }
}

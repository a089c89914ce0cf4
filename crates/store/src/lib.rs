//! Filesystem-backed object store.
//!
//! Lays bundle files out under a local root exactly as their storage keys
//! read (`<root>/games/<id>/index.html`), so published games can be served
//! by any static file server pointed at the root.

use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use gamedock_bundle::BundleFile;
use gamedock_publish::{ObjectStore, StoreError};

/// Object store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store over `root`. Directories are created lazily on the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn put_entries(
        &self,
        prefix: String,
        entries: Vec<BundleFile>,
    ) -> Result<(), StoreError> {
        // Validate every key before the first write so a bad entry cannot
        // leave a half-written game behind.
        validate_key(&prefix)?;
        for entry in &entries {
            validate_key(&entry.path)?;
        }

        for entry in &entries {
            let target = self.root.join(&prefix).join(&entry.path);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            let mut file = tokio::fs::File::create(&target).await?;
            file.write_all(&entry.bytes).await?;
            debug!(path = %target.display(), bytes = entry.bytes.len(), "stored bundle file");
        }

        Ok(())
    }
}

impl ObjectStore for FsStore {
    fn put(
        &self,
        prefix: &str,
        entries: &[BundleFile],
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        let prefix = prefix.to_string();
        let entries = entries.to_vec();
        Box::pin(async move { self.put_entries(prefix, entries).await })
    }
}

/// Rejects storage keys that could escape the store root.
///
/// Keys are relative forward-slash paths; bundle normalization already
/// guarantees that, but the store re-checks every key it is handed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("empty key".into()));
    }

    if key.contains('\\') {
        return Err(StoreError::InvalidKey(format!(
            "backslash not allowed: {key}"
        )));
    }

    let path = Path::new(key);

    if path.is_absolute() {
        return Err(StoreError::InvalidKey(format!(
            "absolute key not allowed: {key}"
        )));
    }

    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(StoreError::InvalidKey(format!(
                    "parent directory traversal not allowed: {key}"
                )));
            }
            Component::Prefix(_) => {
                return Err(StoreError::InvalidKey(format!(
                    "path prefix not allowed: {key}"
                )));
            }
            Component::RootDir => {
                return Err(StoreError::InvalidKey(format!(
                    "absolute key not allowed: {key}"
                )));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

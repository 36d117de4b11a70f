// file: src/document/store.rs
// description: document read/write collaborator with a tokio filesystem implementation
// reference: https://docs.rs/tokio/latest/tokio/fs

use crate::error::{BenefitError, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Whole-document access to the host's note storage.
pub trait DocumentStore {
    fn read(&self, path: &Path) -> impl Future<Output = Result<String>> + Send;

    fn write(&self, path: &Path, text: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Notes stored as files under a vault root. Relative paths resolve against
/// the root; absolute paths are used as given.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DocumentStore for FsDocumentStore {
    async fn read(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        debug!("Reading note {}", full.display());

        fs::read_to_string(&full)
            .await
            .map_err(|source| BenefitError::FileOperation { path: full, source })
    }

    async fn write(&self, path: &Path, text: &str) -> Result<()> {
        let full = self.resolve(path);

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| BenefitError::FileOperation {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::write(&full, text)
            .await
            .map_err(|source| BenefitError::FileOperation { path: full.clone(), source })?;

        debug!("Wrote {} bytes to {}", text.len(), full.display());
        Ok(())
    }
}

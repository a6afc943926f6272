//! Catalog source backed by a JSON export on disk.

use crate::CatalogRepository;
use async_trait::async_trait;
use shaku::Component;
use std::path::{Path, PathBuf};
use tracing::debug;
use vitrina_core::{RawCatalogRecord, VitrinaError, VitrinaResult};

/// Reads a JSON array of raw records from disk on every call, so edits to
/// the export are visible without a restart.
#[derive(Component)]
#[shaku(interface = CatalogRepository)]
pub struct FileCatalogRepository {
    path: PathBuf,
}

impl FileCatalogRepository {
    /// Creates a repository over the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this repository reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogRepository for FileCatalogRepository {
    async fn fetch_all(&self) -> VitrinaResult<Vec<RawCatalogRecord>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            VitrinaError::Repository(format!(
                "Failed to read catalog '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let records: Vec<RawCatalogRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            VitrinaError::Repository(format!(
                "Malformed catalog '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("Loaded {} catalog records from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

impl std::fmt::Debug for FileCatalogRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCatalogRepository")
            .field("path", &self.path)
            .finish()
    }
}

//! Asset storage
//!
//! Persists validated uploads and hands back immutable [`Asset`] records.
//! The store is abstracted behind a trait so the backend (local disk,
//! object store) is swappable without touching ingestion logic. The
//! storage directory is append-only: nothing here mutates or deletes a
//! stored file.

use artscan_common::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A stored, validated uploaded file with metadata
///
/// Created once by the ingestion gateway, never mutated afterwards.
/// Deletion is left to an external retention policy.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Unique asset identifier
    pub id: Uuid,
    /// File name as submitted by the client
    pub original_name: String,
    /// Location in the backing store
    pub stored_path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
    /// Declared media type
    pub mime_type: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Storage backend for uploaded comparison assets
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist a file under a name unique within the store
    async fn store(
        &self,
        field: &str,
        original_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> Result<Asset>;
}

/// Local-disk asset store writing under `<root>/uploads/comparisons`
pub struct LocalAssetStore {
    dir: PathBuf,
}

impl LocalAssetStore {
    /// Create the store, ensuring the comparisons directory exists
    pub fn new(root: &Path) -> Result<Self> {
        let dir = root.join("uploads").join("comparisons");
        std::fs::create_dir_all(&dir)?;
        tracing::info!("Asset store directory: {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory files are written into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Collision-resistant stored file name: field identifier, millisecond
/// timestamp, random component, original extension.
fn unique_file_name(field: &str, original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();
    format!(
        "{}-{}-{}{}",
        field,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension
    )
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(
        &self,
        field: &str,
        original_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> Result<Asset> {
        let stored_path = self.dir.join(unique_file_name(field, original_name));
        tokio::fs::write(&stored_path, data).await?;

        tracing::debug!(
            field = field,
            original_name = original_name,
            stored_path = %stored_path.display(),
            size_bytes = data.len(),
            "Stored upload"
        );

        Ok(Asset {
            id: Uuid::new_v4(),
            original_name: original_name.to_string(),
            stored_path,
            size_bytes: data.len() as u64,
            mime_type: mime_type.to_string(),
            created_at: Utc::now(),
        })
    }
}

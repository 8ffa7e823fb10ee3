use std::path::Path;

use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{ClinicStore, Tables};

impl ClinicStore {
    /// Restores a store written by [`ClinicStore::save_snapshot`]. A missing
    /// file yields an empty store.
    pub async fn load_snapshot(path: &Path, activity_capacity: usize) -> StoreResult<Self> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No snapshot at {}, starting empty", path.display());
                return Ok(Self::new(activity_capacity));
            }
            Err(e) => return Err(StoreError::Snapshot(format!("{}: {}", path.display(), e))),
        };

        let tables: Tables = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Snapshot(format!("{}: {}", path.display(), e)))?;
        info!("Restored snapshot from {}", path.display());
        Ok(Self::from_tables(tables, activity_capacity))
    }

    /// Writes every table to `path` through a sibling temp file, so a crash
    /// mid-write leaves the previous snapshot intact.
    pub async fn save_snapshot(&self, path: &Path) -> StoreResult<()> {
        let bytes = {
            let tables = self.read_tables().await;
            serde_json::to_vec(&*tables).map_err(|e| StoreError::Snapshot(e.to_string()))?
        };

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::Snapshot(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| StoreError::Snapshot(format!("{}: {}", path.display(), e)))?;

        info!("Wrote snapshot to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    data::models::{
        entry_model::{EntryFieldsModel, EntryRecordModel},
        settings_model::SettingsModel,
        store_snapshot_model::StoreSnapshotModel,
    },
    errors::{InvalidJson, ReadError, WriteError},
};

use super::record_store_datasource::RecordStoreDatasource;

/// Record store persisted as a single JSON document.
///
/// The whole document is rewritten after every mutation. A mutation only
/// becomes visible once the write succeeded.
#[derive(Debug)]
pub struct JsonFileRecordStoreDatasource {
    path: PathBuf,
    snapshot: Mutex<StoreSnapshotModel>,
}

impl JsonFileRecordStoreDatasource {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub async fn open<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        let snapshot = if exists {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ReadError::with_debug(&e))?;
            serde_json::from_str(&raw).map_err(|e| InvalidJson::with_debug("record store", &e))?
        } else {
            debug!(path = %path.display(), "record store file not found, starting empty");
            StoreSnapshotModel::default()
        };
        Ok(Self {
            path,
            snapshot: Mutex::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, snapshot: &StoreSnapshotModel) -> Result<(), ServerError> {
        let raw = serde_json::to_string_pretty(snapshot)
            .map_err(|e| InvalidJson::with_debug("record store", &e))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        info!(
            path = %self.path.display(),
            entries = snapshot.entries.len(),
            "record store flushed"
        );
        Ok(())
    }

    /// Applies `mutation` to a copy of the snapshot, persists it, then commits.
    async fn mutate<T, F>(&self, mutation: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut StoreSnapshotModel) -> T + Send,
        T: Send,
    {
        let mut guard = self.snapshot.lock().await;
        let mut next = guard.clone();
        let out = mutation(&mut next);
        self.flush(&next).await?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl RecordStoreDatasource for JsonFileRecordStoreDatasource {
    async fn list_entries(&self) -> Result<Vec<EntryRecordModel>, ServerError> {
        Ok(self.snapshot.lock().await.entries.clone())
    }

    async fn get_entry(&self, id: &str) -> Result<Option<EntryRecordModel>, ServerError> {
        Ok(self.snapshot.lock().await.get_entry(id).cloned())
    }

    async fn create_entry(
        &self,
        fields: EntryFieldsModel,
    ) -> Result<EntryRecordModel, ServerError> {
        self.mutate(|s| s.create_entry(fields)).await
    }

    async fn update_entry(
        &self,
        id: &str,
        fields: EntryFieldsModel,
    ) -> Result<Option<EntryRecordModel>, ServerError> {
        self.mutate(|s| s.update_entry(id, fields)).await
    }

    async fn delete_entry(&self, id: &str) -> Result<bool, ServerError> {
        self.mutate(|s| s.delete_entry(id)).await
    }

    async fn get_settings(&self) -> Result<Option<SettingsModel>, ServerError> {
        Ok(self.snapshot.lock().await.settings.clone())
    }

    async fn put_settings(&self, settings: SettingsModel) -> Result<SettingsModel, ServerError> {
        self.mutate(|s| {
            s.settings = Some(settings.clone());
            settings
        })
        .await
    }
}

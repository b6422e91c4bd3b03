use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::RwLock;

use crate::data::models::{
    entry_model::{EntryFieldsModel, EntryRecordModel},
    settings_model::SettingsModel,
    store_snapshot_model::StoreSnapshotModel,
};

use super::record_store_datasource::RecordStoreDatasource;

/// Record store kept entirely in memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryRecordStoreDatasource {
    snapshot: RwLock<StoreSnapshotModel>,
}

impl InMemoryRecordStoreDatasource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStoreDatasource for InMemoryRecordStoreDatasource {
    async fn list_entries(&self) -> Result<Vec<EntryRecordModel>, ServerError> {
        Ok(self.snapshot.read().await.entries.clone())
    }

    async fn get_entry(&self, id: &str) -> Result<Option<EntryRecordModel>, ServerError> {
        Ok(self.snapshot.read().await.get_entry(id).cloned())
    }

    async fn create_entry(
        &self,
        fields: EntryFieldsModel,
    ) -> Result<EntryRecordModel, ServerError> {
        Ok(self.snapshot.write().await.create_entry(fields))
    }

    async fn update_entry(
        &self,
        id: &str,
        fields: EntryFieldsModel,
    ) -> Result<Option<EntryRecordModel>, ServerError> {
        Ok(self.snapshot.write().await.update_entry(id, fields))
    }

    async fn delete_entry(&self, id: &str) -> Result<bool, ServerError> {
        Ok(self.snapshot.write().await.delete_entry(id))
    }

    async fn get_settings(&self) -> Result<Option<SettingsModel>, ServerError> {
        Ok(self.snapshot.read().await.settings.clone())
    }

    async fn put_settings(&self, settings: SettingsModel) -> Result<SettingsModel, ServerError> {
        self.snapshot.write().await.settings = Some(settings.clone());
        Ok(settings)
    }
}

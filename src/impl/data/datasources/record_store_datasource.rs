use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::data::models::{
    entry_model::{EntryFieldsModel, EntryRecordModel},
    settings_model::SettingsModel,
};

/// Record store holding the entries collection and the settings record.
///
/// The store assigns entry ids and maintains `created` / `updated`.
#[async_trait]
pub trait RecordStoreDatasource: Send + Sync {
    async fn list_entries(&self) -> Result<Vec<EntryRecordModel>, ServerError>;

    async fn get_entry(&self, id: &str) -> Result<Option<EntryRecordModel>, ServerError>;

    async fn create_entry(&self, fields: EntryFieldsModel)
        -> Result<EntryRecordModel, ServerError>;

    /// Returns `None` if no entry has the given id.
    async fn update_entry(
        &self,
        id: &str,
        fields: EntryFieldsModel,
    ) -> Result<Option<EntryRecordModel>, ServerError>;

    /// Returns whether an entry was deleted.
    async fn delete_entry(&self, id: &str) -> Result<bool, ServerError>;

    async fn get_settings(&self) -> Result<Option<SettingsModel>, ServerError>;

    async fn put_settings(&self, settings: SettingsModel) -> Result<SettingsModel, ServerError>;
}

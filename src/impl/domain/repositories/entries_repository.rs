use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{Entry, EntryId, NewEntry};

#[async_trait]
pub(crate) trait EntriesRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Entry>, ServerError>;

    async fn get(&self, id: &EntryId) -> Result<Option<Entry>, ServerError>;

    async fn create(&self, entry: NewEntry) -> Result<Entry, ServerError>;

    /// Replaces the stored content of an existing entry.
    async fn update(&self, id: &EntryId, entry: NewEntry) -> Result<Entry, ServerError>;

    async fn remove(&self, id: &EntryId) -> Result<(), ServerError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::datasources::record_store_datasource::RecordStoreDatasource,
    domain::repositories::entries_repository::EntriesRepository,
    entities::{Entry, EntryId, NewEntry},
    errors::EntryNotFound,
};

pub(crate) struct EntriesRepositoryImpl<DS>
where
    DS: RecordStoreDatasource,
{
    store: Arc<DS>,
}

#[async_trait]
impl<DS> EntriesRepository for EntriesRepositoryImpl<DS>
where
    DS: RecordStoreDatasource,
{
    async fn list(&self) -> Result<Vec<Entry>, ServerError> {
        self.store
            .list_entries()
            .await?
            .into_iter()
            .map(|r| r.into_entry())
            .collect()
    }

    async fn get(&self, id: &EntryId) -> Result<Option<Entry>, ServerError> {
        self.store
            .get_entry(id.as_str())
            .await?
            .map(|r| r.into_entry())
            .transpose()
    }

    async fn create(&self, entry: NewEntry) -> Result<Entry, ServerError> {
        self.store.create_entry(entry.into()).await?.into_entry()
    }

    async fn update(&self, id: &EntryId, entry: NewEntry) -> Result<Entry, ServerError> {
        self.store
            .update_entry(id.as_str(), entry.into())
            .await?
            .ok_or_else(|| EntryNotFound::new(id.as_str()))?
            .into_entry()
    }

    async fn remove(&self, id: &EntryId) -> Result<(), ServerError> {
        if !self.store.delete_entry(id.as_str()).await? {
            return Err(EntryNotFound::new(id.as_str()));
        }
        Ok(())
    }
}

impl<DS> EntriesRepositoryImpl<DS>
where
    DS: RecordStoreDatasource,
{
    pub(crate) fn new(store: Arc<DS>) -> Self {
        EntriesRepositoryImpl { store }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::datasources::record_store_datasource::RecordStoreDatasource,
    domain::repositories::settings_repository::SettingsRepository, entities::Settings,
};

pub(crate) struct SettingsRepositoryImpl<DS>
where
    DS: RecordStoreDatasource,
{
    store: Arc<DS>,
}

#[async_trait]
impl<DS> SettingsRepository for SettingsRepositoryImpl<DS>
where
    DS: RecordStoreDatasource,
{
    async fn get(&self) -> Result<Option<Settings>, ServerError> {
        Ok(self.store.get_settings().await?.map(Into::into))
    }

    async fn save(&self, settings: Settings) -> Result<Settings, ServerError> {
        Ok(self.store.put_settings(settings.into()).await?.into())
    }
}

impl<DS> SettingsRepositoryImpl<DS>
where
    DS: RecordStoreDatasource,
{
    pub(crate) fn new(store: Arc<DS>) -> Self {
        SettingsRepositoryImpl { store }
    }
}

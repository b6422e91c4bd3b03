use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::Settings;

#[async_trait]
pub(crate) trait SettingsRepository: Send + Sync {
    /// The stored settings, or `None` if they were never created.
    async fn get(&self) -> Result<Option<Settings>, ServerError>;

    async fn save(&self, settings: Settings) -> Result<Settings, ServerError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::{
        datasources::record_store_datasource::RecordStoreDatasource,
        repositories::settings_repository_impl::SettingsRepositoryImpl,
    },
    domain::{
        logic::settings_resolver::resolve_settings,
        repositories::{
            settings_repository::SettingsRepository, wallet_repository::WalletRepository,
        },
    },
    entities::{Settings, SettingsPatch},
};

#[async_trait]
pub trait SettingsUsecase: Send + Sync {
    /// The settings, created with zero defaults on first access.
    async fn get(&self) -> Result<Settings, ServerError>;

    async fn update(&self, patch: SettingsPatch) -> Result<Settings, ServerError>;
}

pub(crate) struct SettingsUsecaseImpl<
    DS,
    W,
    R1 = SettingsRepositoryImpl<DS>, // Default.
> where
    DS: RecordStoreDatasource,
    W: WalletRepository,
    R1: SettingsRepository,
{
    settings_repository: R1,
    wallet_repository: Arc<W>,
    _phantom: std::marker::PhantomData<DS>,
}

#[async_trait]
impl<DS, W, R1> SettingsUsecase for SettingsUsecaseImpl<DS, W, R1>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
    R1: SettingsRepository,
{
    async fn get(&self) -> Result<Settings, ServerError> {
        load_resolved_settings(&self.settings_repository, self.wallet_repository.as_ref()).await
    }

    async fn update(&self, patch: SettingsPatch) -> Result<Settings, ServerError> {
        let current = self.settings_repository.get().await?.unwrap_or_default();
        let wallet_available = self.wallet_repository.is_available().await;
        let resolved = resolve_settings(Some(current.apply(patch)), wallet_available);
        let saved = self.settings_repository.save(resolved.settings).await?;
        info!(
            link_with_wallet = saved.link_with_wallet,
            "rental payment tracker settings updated"
        );
        Ok(saved)
    }
}

impl<DS, W> SettingsUsecaseImpl<DS, W>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
{
    pub(crate) fn new(store: Arc<DS>, wallet_repository: Arc<W>) -> Self {
        SettingsUsecaseImpl {
            settings_repository: SettingsRepositoryImpl::new(store),
            wallet_repository,
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Reads the settings slot, resolving it against wallet availability and
/// persisting the result when it changed (first access, or wallet removed).
pub(crate) async fn load_resolved_settings<R, W>(
    settings_repository: &R,
    wallet_repository: &W,
) -> Result<Settings, ServerError>
where
    R: SettingsRepository + ?Sized,
    W: WalletRepository + ?Sized,
{
    let stored = settings_repository.get().await?;
    let first_access = stored.is_none();
    let wallet_available = wallet_repository.is_available().await;
    let resolved = resolve_settings(stored, wallet_available);
    if !resolved.needs_save {
        return Ok(resolved.settings);
    }
    if first_access {
        info!("created default rental payment tracker settings");
    } else {
        info!("wallet module unavailable, disabled wallet linking in settings");
    }
    settings_repository.save(resolved.settings).await
}

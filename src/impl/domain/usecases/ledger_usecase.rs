use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use futures::{stream, StreamExt as _};
use tracing::{debug, warn};

use crate::{
    data::{
        datasources::record_store_datasource::RecordStoreDatasource,
        repositories::{
            entries_repository_impl::EntriesRepositoryImpl,
            settings_repository_impl::SettingsRepositoryImpl,
        },
    },
    domain::{
        logic::{ledger_calculator::LedgerCalculator, utils::newest_first},
        repositories::{
            entries_repository::EntriesRepository, settings_repository::SettingsRepository,
            wallet_repository::WalletRepository,
        },
        usecases::settings_usecase::load_resolved_settings,
    },
    entities::{Entry, EntryId, PaymentLedger},
};

#[async_trait]
pub trait LedgerUsecase: Send + Sync {
    /// Every entry with its calculated figures. Linked entries use the amount
    /// of their wallet transaction whenever it can be read.
    async fn calculate(&self) -> Result<PaymentLedger, ServerError>;

    async fn current_prepayment(&self) -> Result<f64, ServerError>;
}

pub(crate) struct LedgerUsecaseImpl<
    DS,
    W,
    R1 = EntriesRepositoryImpl<DS>,  // Default.
    R2 = SettingsRepositoryImpl<DS>, // Default.
> where
    DS: RecordStoreDatasource,
    W: WalletRepository,
    R1: EntriesRepository,
    R2: SettingsRepository,
{
    entries_repository: R1,
    settings_repository: R2,
    wallet_repository: Arc<W>,
    wallet_lookup_concurrency: usize,
    _phantom: std::marker::PhantomData<DS>,
}

#[async_trait]
impl<DS, W, R1, R2> LedgerUsecase for LedgerUsecaseImpl<DS, W, R1, R2>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
    R1: EntriesRepository,
    R2: SettingsRepository,
{
    async fn calculate(&self) -> Result<PaymentLedger, ServerError> {
        let settings =
            load_resolved_settings(&self.settings_repository, self.wallet_repository.as_ref())
                .await?;
        let entries = self.entries_repository.list().await?;
        let wallet_amounts = self.wallet_amounts(&entries).await;
        let calculations = LedgerCalculator::new(&entries, &settings)
            .with_wallet_amounts(&wallet_amounts)
            .process();
        Ok(PaymentLedger {
            settings,
            entries: newest_first(entries),
            calculations,
        })
    }

    async fn current_prepayment(&self) -> Result<f64, ServerError> {
        Ok(self.calculate().await?.current_prepayment())
    }
}

impl<DS, W, R1, R2> LedgerUsecaseImpl<DS, W, R1, R2>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
    R1: EntriesRepository,
    R2: SettingsRepository,
{
    /// Reads the amount of every linked entry's wallet transaction. Entries
    /// whose transaction is missing or unreadable are left out, so the
    /// calculator falls back to their stored amount.
    async fn wallet_amounts(&self, entries: &[Entry]) -> HashMap<EntryId, f64> {
        let linked: Vec<_> = entries
            .iter()
            .filter_map(|e| e.wallet_entry_id.as_ref().map(|t| (&e.id, t)))
            .collect();
        if linked.is_empty() {
            return HashMap::new();
        }
        if !self.wallet_repository.is_available().await {
            debug!(
                linked = linked.len(),
                "wallet module unavailable, using stored amounts for linked entries"
            );
            return HashMap::new();
        }

        let linked_count = linked.len();
        let wallet = self.wallet_repository.as_ref();
        let amounts: HashMap<EntryId, f64> = stream::iter(linked)
            .map(|(entry_id, transaction_id)| async move {
                match wallet.get_transaction_amount(transaction_id).await {
                    Ok(Some(amount)) => Some((entry_id.clone(), amount)),
                    Ok(None) => {
                        warn!(
                            entry_id = %entry_id,
                            wallet_transaction = %transaction_id,
                            "linked wallet transaction not found, using stored amount"
                        );
                        None
                    }
                    Err(e) => {
                        warn!(
                            entry_id = %entry_id,
                            wallet_transaction = %transaction_id,
                            error = ?e,
                            "could not read linked wallet transaction, using stored amount"
                        );
                        None
                    }
                }
            })
            .buffer_unordered(self.wallet_lookup_concurrency.max(1))
            .boxed()
            .filter_map(|r| async move { r })
            .collect()
            .await;
        debug!(
            linked = linked_count,
            resolved = amounts.len(),
            "resolved wallet amounts"
        );
        amounts
    }
}

impl<DS, W> LedgerUsecaseImpl<DS, W>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
{
    pub(crate) fn new(
        store: Arc<DS>,
        wallet_repository: Arc<W>,
        wallet_lookup_concurrency: usize,
    ) -> Self {
        LedgerUsecaseImpl {
            entries_repository: EntriesRepositoryImpl::new(store.clone()),
            settings_repository: SettingsRepositoryImpl::new(store),
            wallet_repository,
            wallet_lookup_concurrency,
            _phantom: std::marker::PhantomData,
        }
    }
}

use std::sync::Arc;

use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    data::datasources::record_store_datasource::RecordStoreDatasource,
    domain::{
        repositories::wallet_repository::WalletRepository,
        usecases::{
            entries_usecase::{EntriesUsecase as _, EntriesUsecaseImpl},
            ledger_usecase::{LedgerUsecase as _, LedgerUsecaseImpl},
            settings_usecase::{SettingsUsecase as _, SettingsUsecaseImpl},
        },
    },
    entities::{
        Entry, EntryDraft, EntryId, EntryPatch, PaymentLedger, Settings, SettingsPatch,
        TrackerConfig, WalletTransactionId,
    },
    presentation::{ledger_csv_printer::LedgerCsvPrinter, statement_printer::StatementPrinter},
};

pub type Statement = String;

/// Entry point for hosts embedding the tracker.
///
/// Ties a record store and a wallet module together. Every read of the
/// ledger recomputes the prepayment chain from the stored entries.
pub struct RentalPaymentTrackerUtil<DS, W>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
{
    config: TrackerConfig,
    settings_usecase: SettingsUsecaseImpl<DS, W>,
    entries_usecase: EntriesUsecaseImpl<DS, W>,
    ledger_usecase: LedgerUsecaseImpl<DS, W>,
    statement_printer: StatementPrinter,
    csv_printer: LedgerCsvPrinter,
}

impl<DS, W> RentalPaymentTrackerUtil<DS, W>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
{
    pub fn new(store: Arc<DS>, wallet: Arc<W>, config: TrackerConfig) -> Self {
        Self {
            settings_usecase: SettingsUsecaseImpl::new(store.clone(), wallet.clone()),
            entries_usecase: EntriesUsecaseImpl::new(store.clone(), wallet.clone()),
            ledger_usecase: LedgerUsecaseImpl::new(
                store,
                wallet,
                config.wallet_lookup_concurrency,
            ),
            statement_printer: StatementPrinter::new(config.currency),
            csv_printer: LedgerCsvPrinter::new(config.currency),
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // Settings.
    // ---

    pub async fn settings(&self) -> Result<Settings, ServerError> {
        self.settings_usecase.get().await
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, ServerError> {
        self.settings_usecase.update(patch).await
    }

    // Entries.
    // ---

    pub async fn entries(&self) -> Result<Vec<Entry>, ServerError> {
        self.entries_usecase.list().await
    }

    pub async fn entry(&self, id: &EntryId) -> Result<Entry, ServerError> {
        self.entries_usecase.get(id).await
    }

    pub async fn new_entry_defaults(&self, today: NaiveDate) -> Result<EntryDraft, ServerError> {
        self.entries_usecase.new_entry_defaults(today).await
    }

    pub async fn create_entry(&self, draft: EntryDraft) -> Result<Entry, ServerError> {
        self.entries_usecase.create(draft).await
    }

    pub async fn update_entry(
        &self,
        id: &EntryId,
        patch: EntryPatch,
    ) -> Result<Entry, ServerError> {
        self.entries_usecase.update(id, patch).await
    }

    pub async fn remove_entry(&self, id: &EntryId) -> Result<(), ServerError> {
        self.entries_usecase.remove(id).await
    }

    pub async fn import_csv(&self, csv: &str) -> Result<Vec<Entry>, ServerError> {
        self.entries_usecase.import_csv(csv).await
    }

    pub async fn import_csv_file<P>(&self, path: P) -> Result<Vec<Entry>, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        self.entries_usecase.import_csv_file(path).await
    }

    // Wallet linking.
    // ---

    pub async fn link_wallet_transaction(
        &self,
        id: &EntryId,
        transaction_id: &WalletTransactionId,
    ) -> Result<Entry, ServerError> {
        self.entries_usecase
            .link_wallet_transaction(id, transaction_id)
            .await
    }

    pub async fn unlink_wallet_transaction(&self, id: &EntryId) -> Result<Entry, ServerError> {
        self.entries_usecase.unlink_wallet_transaction(id).await
    }

    pub async fn cleanup_orphaned_wallet_links(&self) -> Result<usize, ServerError> {
        self.entries_usecase.cleanup_orphaned_wallet_links().await
    }

    // Ledger.
    // ---

    pub async fn ledger(&self) -> Result<PaymentLedger, ServerError> {
        self.ledger_usecase.calculate().await
    }

    pub async fn current_prepayment(&self) -> Result<f64, ServerError> {
        self.ledger_usecase.current_prepayment().await
    }

    /// Plain-text statement: the prepaid amount, then a payment card per
    /// entry, newest first.
    pub async fn statement(&self) -> Result<Statement, ServerError> {
        let ledger = self.ledger_usecase.calculate().await?;
        Ok(self.statement_printer.print_statement(&ledger))
    }

    pub async fn export_csv(&self) -> Result<String, ServerError> {
        let ledger = self.ledger_usecase.calculate().await?;
        self.csv_printer.print_csv(&ledger)
    }
}

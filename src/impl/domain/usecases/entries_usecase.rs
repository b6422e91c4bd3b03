use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use fractic_server_error::ServerError;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    data::{
        datasources::{
            entries_csv_datasource::{EntriesCsvDatasource, EntriesCsvDatasourceImpl},
            record_store_datasource::RecordStoreDatasource,
        },
        repositories::{
            entries_repository_impl::EntriesRepositoryImpl,
            settings_repository_impl::SettingsRepositoryImpl,
        },
    },
    domain::{
        logic::{
            entry_defaults::new_entry_defaults,
            utils::{ensure_accepted_attachment, ensure_period_available, newest_first},
        },
        repositories::{
            entries_repository::EntriesRepository, settings_repository::SettingsRepository,
            wallet_repository::WalletRepository,
        },
        usecases::settings_usecase::load_resolved_settings,
    },
    entities::{
        AttachmentChange, Entry, EntryDraft, EntryId, EntryPatch, NewEntry, NewWalletTransaction,
        WalletTransactionId,
    },
    errors::{
        AmountPaidLockedByWalletLink, EntryNotFound, EntryNotLinked, WalletLinkingDisabled,
        WalletModuleUnavailable, WalletTransactionAlreadyLinked, WalletTransactionNotFound,
    },
};

#[async_trait]
pub trait EntriesUsecase: Send + Sync {
    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<Entry>, ServerError>;

    async fn get(&self, id: &EntryId) -> Result<Entry, ServerError>;

    /// Pre-filled draft for the month containing `today`.
    async fn new_entry_defaults(&self, today: NaiveDate) -> Result<EntryDraft, ServerError>;

    async fn create(&self, draft: EntryDraft) -> Result<Entry, ServerError>;

    async fn update(&self, id: &EntryId, patch: EntryPatch) -> Result<Entry, ServerError>;

    async fn remove(&self, id: &EntryId) -> Result<(), ServerError>;

    /// Links an existing wallet transaction. The entry's own amount is zeroed;
    /// the transaction amount is used from then on.
    async fn link_wallet_transaction(
        &self,
        id: &EntryId,
        transaction_id: &WalletTransactionId,
    ) -> Result<Entry, ServerError>;

    /// Removes the wallet link, restoring the amount paid from the
    /// transaction when it can still be read.
    async fn unlink_wallet_transaction(&self, id: &EntryId) -> Result<Entry, ServerError>;

    /// Clears links to wallet transactions that no longer exist. Returns the
    /// number of entries cleaned.
    async fn cleanup_orphaned_wallet_links(&self) -> Result<usize, ServerError>;

    /// Creates an entry for each CSV row, in file order. Stops at the first
    /// row that fails.
    async fn import_csv(&self, csv: &str) -> Result<Vec<Entry>, ServerError>;

    async fn import_csv_file<P>(&self, path: P) -> Result<Vec<Entry>, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct EntriesUsecaseImpl<
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
    /// Held across each read-check-write sequence, so that period uniqueness
    /// and single-link checks see every committed write.
    write_lock: Mutex<()>,
    _phantom: std::marker::PhantomData<DS>,
}

#[async_trait]
impl<DS, W, R1, R2> EntriesUsecase for EntriesUsecaseImpl<DS, W, R1, R2>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
    R1: EntriesRepository,
    R2: SettingsRepository,
{
    async fn list(&self) -> Result<Vec<Entry>, ServerError> {
        Ok(newest_first(self.entries_repository.list().await?))
    }

    async fn get(&self, id: &EntryId) -> Result<Entry, ServerError> {
        self.entries_repository
            .get(id)
            .await?
            .ok_or_else(|| EntryNotFound::new(id.as_str()))
    }

    async fn new_entry_defaults(&self, today: NaiveDate) -> Result<EntryDraft, ServerError> {
        let entries = self.entries_repository.list().await?;
        let settings =
            load_resolved_settings(&self.settings_repository, self.wallet_repository.as_ref())
                .await?;
        Ok(new_entry_defaults(&entries, &settings, today))
    }

    async fn create(&self, draft: EntryDraft) -> Result<Entry, ServerError> {
        let _guard = self.write_lock.lock().await;
        ensure_accepted_attachment("meter_reading_image", draft.meter_reading_image.as_ref())?;
        ensure_accepted_attachment("bank_statement", draft.bank_statement.as_ref())?;
        let entries = self.entries_repository.list().await?;
        ensure_period_available(&entries, draft.period, None)?;

        let wallet_entry_id = if draft.auto_create_wallet_transaction {
            self.auto_create_wallet_transaction(&draft).await?
        } else {
            None
        };

        let mut new_entry = NewEntry::from_draft(draft);
        if wallet_entry_id.is_some() {
            new_entry.amount_paid = 0.0;
            new_entry.wallet_entry_id = wallet_entry_id.clone();
        }

        let entry = match self.entries_repository.create(new_entry).await {
            Ok(entry) => entry,
            Err(e) => {
                if let Some(transaction_id) = wallet_entry_id {
                    self.discard_wallet_transaction(&transaction_id).await;
                }
                return Err(e);
            }
        };
        info!(
            entry_id = %entry.id,
            period = %entry.period,
            linked = entry.is_linked(),
            "payment entry created"
        );
        Ok(entry)
    }

    async fn update(&self, id: &EntryId, patch: EntryPatch) -> Result<Entry, ServerError> {
        let _guard = self.write_lock.lock().await;
        let existing = self.get(id).await?;
        if existing.is_linked() && patch.amount_paid.is_some() {
            return Err(AmountPaidLockedByWalletLink::new(id.as_str()));
        }
        if let AttachmentChange::Replace(a) = &patch.meter_reading_image {
            ensure_accepted_attachment("meter_reading_image", Some(a))?;
        }
        if let AttachmentChange::Replace(a) = &patch.bank_statement {
            ensure_accepted_attachment("bank_statement", Some(a))?;
        }
        if let Some(period) = patch.period {
            let entries = self.entries_repository.list().await?;
            ensure_period_available(&entries, period, Some(id))?;
        }

        let updated = existing.into_new_entry().apply(patch);
        let entry = self.entries_repository.update(id, updated).await?;
        info!(entry_id = %entry.id, period = %entry.period, "payment entry updated");
        Ok(entry)
    }

    async fn remove(&self, id: &EntryId) -> Result<(), ServerError> {
        let _guard = self.write_lock.lock().await;
        self.get(id).await?;
        self.entries_repository.remove(id).await?;
        info!(entry_id = %id, "payment entry removed");
        Ok(())
    }

    async fn link_wallet_transaction(
        &self,
        id: &EntryId,
        transaction_id: &WalletTransactionId,
    ) -> Result<Entry, ServerError> {
        let _guard = self.write_lock.lock().await;
        if !self.wallet_repository.is_available().await {
            return Err(WalletModuleUnavailable::new());
        }
        let existing = self.get(id).await?;
        if self
            .wallet_repository
            .get_transaction_amount(transaction_id)
            .await?
            .is_none()
        {
            return Err(WalletTransactionNotFound::new(transaction_id.as_str()));
        }
        let entries = self.entries_repository.list().await?;
        if let Some(other) = entries
            .iter()
            .find(|e| e.id != *id && e.wallet_entry_id.as_ref() == Some(transaction_id))
        {
            return Err(WalletTransactionAlreadyLinked::new(
                transaction_id.as_str(),
                other.id.as_str(),
            ));
        }

        let mut linked = existing.into_new_entry();
        linked.wallet_entry_id = Some(transaction_id.clone());
        linked.amount_paid = 0.0;
        let entry = self.entries_repository.update(id, linked).await?;
        info!(entry_id = %id, wallet_transaction = %transaction_id, "wallet transaction linked");
        Ok(entry)
    }

    async fn unlink_wallet_transaction(&self, id: &EntryId) -> Result<Entry, ServerError> {
        let _guard = self.write_lock.lock().await;
        let existing = self.get(id).await?;
        let Some(transaction_id) = existing.wallet_entry_id.clone() else {
            return Err(EntryNotLinked::new(id.as_str()));
        };

        let restored_amount = if self.wallet_repository.is_available().await {
            match self
                .wallet_repository
                .get_transaction_amount(&transaction_id)
                .await
            {
                Ok(Some(amount)) => Some(amount),
                Ok(None) => {
                    warn!(
                        entry_id = %id,
                        wallet_transaction = %transaction_id,
                        "linked wallet transaction no longer exists, keeping stored amount"
                    );
                    None
                }
                Err(e) => {
                    warn!(
                        entry_id = %id,
                        wallet_transaction = %transaction_id,
                        error = ?e,
                        "could not read linked wallet transaction, keeping stored amount"
                    );
                    None
                }
            }
        } else {
            warn!(entry_id = %id, "wallet module unavailable, keeping stored amount");
            None
        };

        let mut unlinked = existing.into_new_entry();
        unlinked.wallet_entry_id = None;
        if let Some(amount) = restored_amount {
            unlinked.amount_paid = amount;
        }
        let entry = self.entries_repository.update(id, unlinked).await?;
        info!(entry_id = %id, wallet_transaction = %transaction_id, "wallet transaction unlinked");
        Ok(entry)
    }

    async fn cleanup_orphaned_wallet_links(&self) -> Result<usize, ServerError> {
        let _guard = self.write_lock.lock().await;
        if !self.wallet_repository.is_available().await {
            debug!("wallet module unavailable, skipping orphaned link cleanup");
            return Ok(0);
        }

        let mut cleaned = 0;
        for entry in self.entries_repository.list().await? {
            let Some(transaction_id) = entry.wallet_entry_id.clone() else {
                continue;
            };
            match self
                .wallet_repository
                .get_transaction_amount(&transaction_id)
                .await
            {
                Ok(Some(_)) => {}
                Ok(None) => {
                    let id = entry.id.clone();
                    let mut unlinked = entry.into_new_entry();
                    unlinked.wallet_entry_id = None;
                    self.entries_repository.update(&id, unlinked).await?;
                    warn!(
                        entry_id = %id,
                        wallet_transaction = %transaction_id,
                        "cleared link to missing wallet transaction"
                    );
                    cleaned += 1;
                }
                Err(e) => {
                    warn!(
                        entry_id = %entry.id,
                        wallet_transaction = %transaction_id,
                        error = ?e,
                        "could not check wallet transaction, leaving link in place"
                    );
                }
            }
        }
        Ok(cleaned)
    }

    async fn import_csv(&self, csv: &str) -> Result<Vec<Entry>, ServerError> {
        let drafts = EntriesCsvDatasourceImpl::new().from_string(csv)?;
        self.create_all(drafts).await
    }

    async fn import_csv_file<P>(&self, path: P) -> Result<Vec<Entry>, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let drafts = EntriesCsvDatasourceImpl::new().from_file(path)?;
        self.create_all(drafts).await
    }
}

impl<DS, W, R1, R2> EntriesUsecaseImpl<DS, W, R1, R2>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
    R1: EntriesRepository,
    R2: SettingsRepository,
{
    /// Creates the wallet transaction for a new entry, returning its id. `None`
    /// when there is nothing to record.
    async fn auto_create_wallet_transaction(
        &self,
        draft: &EntryDraft,
    ) -> Result<Option<WalletTransactionId>, ServerError> {
        let settings =
            load_resolved_settings(&self.settings_repository, self.wallet_repository.as_ref())
                .await?;
        let template_id = settings
            .active_wallet_template()
            .cloned()
            .ok_or_else(WalletLinkingDisabled::new)?;
        if draft.amount_paid <= 0.0 {
            debug!(period = %draft.period, "nothing paid, no wallet transaction created");
            return Ok(None);
        }
        let transaction_id = self
            .wallet_repository
            .create_transaction(NewWalletTransaction {
                template_id,
                amount: draft.amount_paid,
                date: Utc::now().date_naive(),
                particulars: format!("Rental payment for {}", draft.period),
            })
            .await?;
        Ok(Some(transaction_id))
    }

    /// Deletes a wallet transaction created for an entry that was never saved.
    async fn discard_wallet_transaction(&self, transaction_id: &WalletTransactionId) {
        match self.wallet_repository.delete_transaction(transaction_id).await {
            Ok(_) => {
                info!(
                    wallet_transaction = %transaction_id,
                    "entry not saved, deleted its wallet transaction"
                );
            }
            Err(e) => {
                warn!(
                    wallet_transaction = %transaction_id,
                    error = ?e,
                    "entry not saved and its wallet transaction could not be deleted"
                );
            }
        }
    }

    async fn create_all(&self, drafts: Vec<EntryDraft>) -> Result<Vec<Entry>, ServerError> {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(self.create(draft).await?);
        }
        info!(count = created.len(), "payment entries imported");
        Ok(created)
    }
}

impl<DS, W> EntriesUsecaseImpl<DS, W>
where
    DS: RecordStoreDatasource,
    W: WalletRepository,
{
    pub(crate) fn new(store: Arc<DS>, wallet_repository: Arc<W>) -> Self {
        EntriesUsecaseImpl {
            entries_repository: EntriesRepositoryImpl::new(store.clone()),
            settings_repository: SettingsRepositoryImpl::new(store),
            wallet_repository,
            write_lock: Mutex::new(()),
            _phantom: std::marker::PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::datasources::in_memory_record_store_datasource::InMemoryRecordStoreDatasource,
        data::models::{
            entry_model::{EntryFieldsModel, EntryRecordModel},
            settings_model::SettingsModel,
        },
        data::repositories::in_memory_wallet_repository_impl::InMemoryWalletRepository,
        domain::usecases::settings_usecase::{SettingsUsecase, SettingsUsecaseImpl},
        entities::{Attachment, BillingPeriod, SettingsPatch, WalletTemplateId, WalletTransaction},
        errors::WriteError,
    };

    /// In-memory store that can fail entry creation, or yield to other tasks
    /// between reading and writing.
    #[derive(Default)]
    struct TestStore {
        inner: InMemoryRecordStoreDatasource,
        fail_creates: bool,
        yield_after_list: bool,
    }

    #[async_trait]
    impl RecordStoreDatasource for TestStore {
        async fn list_entries(&self) -> Result<Vec<EntryRecordModel>, ServerError> {
            let entries = self.inner.list_entries().await?;
            if self.yield_after_list {
                tokio::task::yield_now().await;
            }
            Ok(entries)
        }

        async fn get_entry(&self, id: &str) -> Result<Option<EntryRecordModel>, ServerError> {
            self.inner.get_entry(id).await
        }

        async fn create_entry(
            &self,
            fields: EntryFieldsModel,
        ) -> Result<EntryRecordModel, ServerError> {
            if self.fail_creates {
                return Err(WriteError::new());
            }
            self.inner.create_entry(fields).await
        }

        async fn update_entry(
            &self,
            id: &str,
            fields: EntryFieldsModel,
        ) -> Result<Option<EntryRecordModel>, ServerError> {
            self.inner.update_entry(id, fields).await
        }

        async fn delete_entry(&self, id: &str) -> Result<bool, ServerError> {
            self.inner.delete_entry(id).await
        }

        async fn get_settings(&self) -> Result<Option<SettingsModel>, ServerError> {
            self.inner.get_settings().await
        }

        async fn put_settings(
            &self,
            settings: SettingsModel,
        ) -> Result<SettingsModel, ServerError> {
            self.inner.put_settings(settings).await
        }
    }

    type Usecase = EntriesUsecaseImpl<InMemoryRecordStoreDatasource, InMemoryWalletRepository>;

    fn usecase() -> (
        Arc<InMemoryRecordStoreDatasource>,
        Arc<InMemoryWalletRepository>,
        Usecase,
    ) {
        let store = Arc::new(InMemoryRecordStoreDatasource::new());
        let wallet = Arc::new(InMemoryWalletRepository::new());
        let usecase = EntriesUsecaseImpl::new(store.clone(), wallet.clone());
        (store, wallet, usecase)
    }

    fn draft(year: i32, month: u32, amount_paid: f64) -> EntryDraft {
        EntryDraft {
            period: BillingPeriod::new(year, month).unwrap(),
            previous_meter_reading: 1000.0,
            current_meter_reading: 1050.0,
            electricity_rate: 0.5,
            utility_bill: 10.0,
            rental_fee: 500.0,
            amount_paid,
            meter_reading_image: None,
            bank_statement: None,
            auto_create_wallet_transaction: false,
        }
    }

    async fn enable_wallet_linking<DS: RecordStoreDatasource>(
        store: Arc<DS>,
        wallet: Arc<InMemoryWalletRepository>,
    ) {
        SettingsUsecaseImpl::new(store, wallet)
            .update(SettingsPatch {
                link_with_wallet: Some(true),
                wallet_template_id: Some(Some(WalletTemplateId::new("rent-template"))),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    async fn wallet_transaction(wallet: &InMemoryWalletRepository, id: &str, amount: f64) {
        wallet
            .insert_transaction(WalletTransaction {
                id: WalletTransactionId::new(id),
                amount,
            })
            .await;
    }

    #[tokio::test]
    async fn create_derives_usage_and_assigns_id() {
        let (_, _, usecase) = usecase();
        let entry = usecase.create(draft(2024, 1, 600.0)).await.unwrap();
        assert_eq!(entry.electricity_used, 50.0);
        assert_eq!(entry.amount_paid, 600.0);
        assert!(EntryId::parse(entry.id.as_str()).is_ok());
        assert_eq!(usecase.get(&entry.id).await.unwrap(), entry);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (_, _, usecase) = usecase();
        usecase.create(draft(2024, 2, 0.0)).await.unwrap();
        usecase.create(draft(2023, 12, 0.0)).await.unwrap();
        usecase.create(draft(2024, 1, 0.0)).await.unwrap();

        let periods: Vec<String> = usecase
            .list()
            .await
            .unwrap()
            .iter()
            .map(|e| e.period.to_string())
            .collect();
        assert_eq!(periods, vec!["2024-02", "2024-01", "2023-12"]);
    }

    #[tokio::test]
    async fn duplicate_periods_are_rejected() {
        let (_, _, usecase) = usecase();
        let jan = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        let feb = usecase.create(draft(2024, 2, 0.0)).await.unwrap();
        assert!(usecase.create(draft(2024, 1, 100.0)).await.is_err());

        let moved_onto_jan = EntryPatch {
            period: Some(jan.period),
            ..Default::default()
        };
        assert!(usecase.update(&feb.id, moved_onto_jan).await.is_err());

        // Re-saving an entry with its own period is fine.
        let same_period = EntryPatch {
            period: Some(jan.period),
            rental_fee: Some(550.0),
            ..Default::default()
        };
        let jan = usecase.update(&jan.id, same_period).await.unwrap();
        assert_eq!(jan.rental_fee, 550.0);
    }

    #[tokio::test]
    async fn update_rederives_usage_and_replaces_attachments() {
        let (_, _, usecase) = usecase();
        let entry = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        let image = Attachment::new("meter.jpg", "image/jpeg", vec![1, 2, 3]);
        let updated = usecase
            .update(
                &entry.id,
                EntryPatch {
                    current_meter_reading: Some(1080.0),
                    meter_reading_image: AttachmentChange::Replace(image.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.electricity_used, 80.0);
        assert_eq!(updated.meter_reading_image, Some(image));

        let cleared = usecase
            .update(
                &entry.id,
                EntryPatch {
                    meter_reading_image: AttachmentChange::Remove,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.meter_reading_image, None);
    }

    #[tokio::test]
    async fn unsupported_attachments_are_rejected() {
        let (_, _, usecase) = usecase();
        let mut d = draft(2024, 1, 0.0);
        d.bank_statement = Some(Attachment::new("statement.pdf", "application/pdf", vec![0]));
        assert!(usecase.create(d).await.is_err());
        assert!(usecase.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_entries_are_reported() {
        let (_, _, usecase) = usecase();
        let id = EntryId::parse("000000000000zzz").unwrap();
        assert!(usecase.get(&id).await.is_err());
        assert!(usecase.remove(&id).await.is_err());
        assert!(usecase.update(&id, EntryPatch::default()).await.is_err());
    }

    #[tokio::test]
    async fn remove_deletes_entry() {
        let (_, _, usecase) = usecase();
        let entry = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        usecase.remove(&entry.id).await.unwrap();
        assert!(usecase.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn link_zeroes_amount_and_locks_it() {
        let (_, wallet, usecase) = usecase();
        wallet_transaction(&wallet, "txn-1", 600.0).await;
        let entry = usecase.create(draft(2024, 1, 580.0)).await.unwrap();

        let linked = usecase
            .link_wallet_transaction(&entry.id, &WalletTransactionId::new("txn-1"))
            .await
            .unwrap();
        assert_eq!(linked.amount_paid, 0.0);
        assert_eq!(linked.wallet_entry_id, Some(WalletTransactionId::new("txn-1")));

        let edit_amount = EntryPatch {
            amount_paid: Some(10.0),
            ..Default::default()
        };
        assert!(usecase.update(&entry.id, edit_amount).await.is_err());
    }

    #[tokio::test]
    async fn link_rejects_missing_or_taken_transactions() {
        let (_, wallet, usecase) = usecase();
        wallet_transaction(&wallet, "txn-1", 600.0).await;
        let jan = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        let feb = usecase.create(draft(2024, 2, 0.0)).await.unwrap();

        let missing = WalletTransactionId::new("txn-404");
        assert!(usecase.link_wallet_transaction(&jan.id, &missing).await.is_err());

        let txn = WalletTransactionId::new("txn-1");
        usecase.link_wallet_transaction(&jan.id, &txn).await.unwrap();
        assert!(usecase.link_wallet_transaction(&feb.id, &txn).await.is_err());

        wallet.set_available(false);
        assert!(usecase.link_wallet_transaction(&feb.id, &txn).await.is_err());
    }

    #[tokio::test]
    async fn unlink_restores_amount_from_wallet() {
        let (_, wallet, usecase) = usecase();
        wallet_transaction(&wallet, "txn-1", 612.5).await;
        let entry = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        let txn = WalletTransactionId::new("txn-1");
        usecase.link_wallet_transaction(&entry.id, &txn).await.unwrap();

        let unlinked = usecase.unlink_wallet_transaction(&entry.id).await.unwrap();
        assert_eq!(unlinked.wallet_entry_id, None);
        assert_eq!(unlinked.amount_paid, 612.5);

        assert!(usecase.unlink_wallet_transaction(&entry.id).await.is_err());
    }

    #[tokio::test]
    async fn unlink_keeps_stored_amount_when_transaction_is_gone() {
        let (_, wallet, usecase) = usecase();
        wallet_transaction(&wallet, "txn-1", 612.5).await;
        let entry = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        let txn = WalletTransactionId::new("txn-1");
        usecase.link_wallet_transaction(&entry.id, &txn).await.unwrap();
        wallet.remove_transaction(&txn).await;

        let unlinked = usecase.unlink_wallet_transaction(&entry.id).await.unwrap();
        assert_eq!(unlinked.wallet_entry_id, None);
        assert_eq!(unlinked.amount_paid, 0.0);
    }

    #[tokio::test]
    async fn cleanup_clears_only_orphaned_links() {
        let (_, wallet, usecase) = usecase();
        wallet_transaction(&wallet, "txn-1", 600.0).await;
        wallet_transaction(&wallet, "txn-2", 550.0).await;
        let jan = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        let feb = usecase.create(draft(2024, 2, 0.0)).await.unwrap();
        let txn_1 = WalletTransactionId::new("txn-1");
        let txn_2 = WalletTransactionId::new("txn-2");
        usecase.link_wallet_transaction(&jan.id, &txn_1).await.unwrap();
        usecase.link_wallet_transaction(&feb.id, &txn_2).await.unwrap();
        wallet.remove_transaction(&txn_2).await;

        assert_eq!(usecase.cleanup_orphaned_wallet_links().await.unwrap(), 1);
        assert!(usecase.get(&jan.id).await.unwrap().is_linked());
        assert!(!usecase.get(&feb.id).await.unwrap().is_linked());
        assert_eq!(usecase.cleanup_orphaned_wallet_links().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn cleanup_is_skipped_without_wallet() {
        let (_, wallet, usecase) = usecase();
        wallet_transaction(&wallet, "txn-1", 600.0).await;
        let entry = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        usecase
            .link_wallet_transaction(&entry.id, &WalletTransactionId::new("txn-1"))
            .await
            .unwrap();

        wallet.set_available(false);
        assert_eq!(usecase.cleanup_orphaned_wallet_links().await.unwrap(), 0);
        assert!(usecase.get(&entry.id).await.unwrap().is_linked());
    }

    #[tokio::test]
    async fn auto_created_wallet_transaction_is_linked() {
        let (store, wallet, usecase) = usecase();
        enable_wallet_linking(store, wallet.clone()).await;

        let mut d = draft(2024, 3, 575.0);
        d.auto_create_wallet_transaction = true;
        let entry = usecase.create(d).await.unwrap();
        assert!(entry.is_linked());
        assert_eq!(entry.amount_paid, 0.0);

        let created = wallet.created_transactions().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].amount, 575.0);
        assert_eq!(created[0].template_id, WalletTemplateId::new("rent-template"));
        assert_eq!(created[0].particulars, "Rental payment for 2024-03");
    }

    #[tokio::test]
    async fn auto_create_skips_unpaid_entries() {
        let (store, wallet, usecase) = usecase();
        enable_wallet_linking(store, wallet.clone()).await;

        let mut d = draft(2024, 3, 0.0);
        d.auto_create_wallet_transaction = true;
        let entry = usecase.create(d).await.unwrap();
        assert!(!entry.is_linked());
        assert!(wallet.created_transactions().await.is_empty());
    }

    #[tokio::test]
    async fn auto_create_requires_wallet_linking() {
        let (_, wallet, usecase) = usecase();
        let mut d = draft(2024, 3, 575.0);
        d.auto_create_wallet_transaction = true;
        assert!(usecase.create(d).await.is_err());
        assert!(wallet.created_transactions().await.is_empty());
        assert!(usecase.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn defaults_follow_latest_entry() {
        let (store, wallet, usecase) = usecase();
        SettingsUsecaseImpl::new(store, wallet)
            .update(SettingsPatch {
                rental_fee: Some(650.0),
                ..Default::default()
            })
            .await
            .unwrap();
        usecase.create(draft(2024, 1, 0.0)).await.unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        let defaults = usecase.new_entry_defaults(today).await.unwrap();
        assert_eq!(defaults.period, BillingPeriod::new(2024, 2).unwrap());
        assert_eq!(defaults.previous_meter_reading, 1050.0);
        assert_eq!(defaults.rental_fee, 650.0);
    }

    #[tokio::test]
    async fn import_creates_entries_in_file_order() {
        let (_, _, usecase) = usecase();
        let csv = "\
period,previous_meter_reading,current_meter_reading,electricity_rate,utility_bill,rental_fee,amount_paid
2024-01,1000,1050,0.5,10,500,600
2024-02,1050,1110,0.5,10,500,\"1,000.00\"
";
        let created = usecase.import_csv(csv).await.unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].period, BillingPeriod::new(2024, 1).unwrap());
        assert_eq!(created[1].electricity_used, 60.0);
        assert_eq!(created[1].amount_paid, 1000.0);
    }

    #[tokio::test]
    async fn import_stops_at_duplicate_period() {
        let (_, _, usecase) = usecase();
        usecase.create(draft(2024, 2, 0.0)).await.unwrap();
        let csv = "\
period,previous_meter_reading,current_meter_reading,electricity_rate,utility_bill,rental_fee,amount_paid
2024-01,1000,1050,0.5,10,500,600
2024-02,1050,1110,0.5,10,500,600
";
        assert!(usecase.import_csv(csv).await.is_err());
        assert_eq!(usecase.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_save_deletes_auto_created_wallet_transaction() {
        let store = Arc::new(TestStore {
            fail_creates: true,
            ..Default::default()
        });
        let wallet = Arc::new(InMemoryWalletRepository::new());
        enable_wallet_linking(store.clone(), wallet.clone()).await;
        let usecase = EntriesUsecaseImpl::new(store, wallet.clone());

        let mut d = draft(2024, 3, 575.0);
        d.auto_create_wallet_transaction = true;
        assert!(usecase.create(d).await.is_err());

        let created = wallet.created_transactions().await;
        assert_eq!(created.len(), 1);
        let amount = wallet
            .get_transaction_amount(&WalletTransactionId::new("wallet-txn-1"))
            .await
            .unwrap();
        assert_eq!(amount, None);
        assert!(usecase.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_for_one_period_store_one_entry() {
        let store = Arc::new(TestStore {
            yield_after_list: true,
            ..Default::default()
        });
        let usecase = EntriesUsecaseImpl::new(store, Arc::new(InMemoryWalletRepository::new()));

        let (first, second) = tokio::join!(
            usecase.create(draft(2024, 1, 0.0)),
            usecase.create(draft(2024, 1, 100.0))
        );
        assert!(first.is_ok() != second.is_ok());
        assert_eq!(usecase.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_links_to_one_transaction_link_one_entry() {
        let store = Arc::new(TestStore {
            yield_after_list: true,
            ..Default::default()
        });
        let wallet = Arc::new(InMemoryWalletRepository::new());
        wallet_transaction(&wallet, "txn-1", 600.0).await;
        let usecase = EntriesUsecaseImpl::new(store, wallet);
        let jan = usecase.create(draft(2024, 1, 0.0)).await.unwrap();
        let feb = usecase.create(draft(2024, 2, 0.0)).await.unwrap();

        let txn = WalletTransactionId::new("txn-1");
        let (first, second) = tokio::join!(
            usecase.link_wallet_transaction(&jan.id, &txn),
            usecase.link_wallet_transaction(&feb.id, &txn)
        );
        assert!(first.is_ok() != second.is_ok());
        let linked = usecase
            .list()
            .await
            .unwrap()
            .iter()
            .filter(|e| e.is_linked())
            .count();
        assert_eq!(linked, 1);
    }
}

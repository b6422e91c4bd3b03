use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::RwLock;

use crate::{
    domain::repositories::wallet_repository::WalletRepository,
    entities::{NewWalletTransaction, WalletTransaction, WalletTransactionId},
    errors::WalletModuleUnavailable,
};

/// Wallet kept in memory, for embedding and tests.
#[derive(Debug)]
pub struct InMemoryWalletRepository {
    available: AtomicBool,
    next_id: AtomicU64,
    transactions: RwLock<HashMap<WalletTransactionId, f64>>,
    created: RwLock<Vec<NewWalletTransaction>>,
}

impl Default for InMemoryWalletRepository {
    fn default() -> Self {
        Self {
            available: AtomicBool::new(true),
            next_id: AtomicU64::new(0),
            transactions: RwLock::new(HashMap::new()),
            created: RwLock::new(Vec::new()),
        }
    }
}

impl InMemoryWalletRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn insert_transaction(&self, transaction: WalletTransaction) {
        self.transactions
            .write()
            .await
            .insert(transaction.id, transaction.amount);
    }

    pub async fn remove_transaction(&self, id: &WalletTransactionId) -> bool {
        self.transactions.write().await.remove(id).is_some()
    }

    /// Transactions created through [`WalletRepository::create_transaction`],
    /// oldest first.
    pub async fn created_transactions(&self) -> Vec<NewWalletTransaction> {
        self.created.read().await.clone()
    }

    fn ensure_available(&self) -> Result<(), ServerError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(WalletModuleUnavailable::new())
        }
    }
}

#[async_trait]
impl WalletRepository for InMemoryWalletRepository {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn get_transaction_amount(
        &self,
        id: &WalletTransactionId,
    ) -> Result<Option<f64>, ServerError> {
        self.ensure_available()?;
        Ok(self.transactions.read().await.get(id).copied())
    }

    async fn create_transaction(
        &self,
        transaction: NewWalletTransaction,
    ) -> Result<WalletTransactionId, ServerError> {
        self.ensure_available()?;
        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = WalletTransactionId(format!("wallet-txn-{seq}"));
        self.transactions
            .write()
            .await
            .insert(id.clone(), transaction.amount);
        self.created.write().await.push(transaction);
        Ok(id)
    }

    async fn delete_transaction(&self, id: &WalletTransactionId) -> Result<bool, ServerError> {
        self.ensure_available()?;
        Ok(self.remove_transaction(id).await)
    }
}

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{NewWalletTransaction, WalletTransactionId};

/// Narrow view of the external wallet module.
///
/// Implemented by the host. The tracker reads transaction amounts, creates
/// transactions from a template, and deletes a transaction it created when
/// the entry linking it could not be saved.
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Whether the wallet module is installed and reachable.
    async fn is_available(&self) -> bool;

    /// Amount of the given transaction, or `None` if it does not exist.
    async fn get_transaction_amount(
        &self,
        id: &WalletTransactionId,
    ) -> Result<Option<f64>, ServerError>;

    async fn create_transaction(
        &self,
        transaction: NewWalletTransaction,
    ) -> Result<WalletTransactionId, ServerError>;

    /// Returns whether a transaction was deleted.
    async fn delete_transaction(&self, id: &WalletTransactionId) -> Result<bool, ServerError>;
}

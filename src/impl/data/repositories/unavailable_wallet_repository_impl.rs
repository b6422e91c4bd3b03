use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    domain::repositories::wallet_repository::WalletRepository,
    entities::{NewWalletTransaction, WalletTransactionId},
    errors::WalletModuleUnavailable,
};

/// Wallet for hosts without a wallet module installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableWalletRepository;

#[async_trait]
impl WalletRepository for UnavailableWalletRepository {
    async fn is_available(&self) -> bool {
        false
    }

    async fn get_transaction_amount(
        &self,
        _id: &WalletTransactionId,
    ) -> Result<Option<f64>, ServerError> {
        Err(WalletModuleUnavailable::new())
    }

    async fn create_transaction(
        &self,
        _transaction: NewWalletTransaction,
    ) -> Result<WalletTransactionId, ServerError> {
        Err(WalletModuleUnavailable::new())
    }

    async fn delete_transaction(&self, _id: &WalletTransactionId) -> Result<bool, ServerError> {
        Err(WalletModuleUnavailable::new())
    }
}

use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::{
    entities::{TrackerConfig, DEFAULT_WALLET_LOOKUP_CONCURRENCY},
    errors::InvalidIsoCurrencyCode,
};

fn default_currency() -> String {
    Currency::MYR.code().to_string()
}

fn default_wallet_lookup_concurrency() -> usize {
    DEFAULT_WALLET_LOOKUP_CONCURRENCY
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct TrackerConfigModel {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_wallet_lookup_concurrency")]
    pub wallet_lookup_concurrency: usize,
}

impl TryFrom<TrackerConfigModel> for TrackerConfig {
    type Error = ServerError;

    fn try_from(model: TrackerConfigModel) -> Result<Self, Self::Error> {
        let currency = Currency::from_code(model.currency.trim())
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&model.currency))?;
        Ok(TrackerConfig {
            currency,
            wallet_lookup_concurrency: model.wallet_lookup_concurrency.max(1),
        })
    }
}

use iso_currency::Currency;

pub const DEFAULT_WALLET_LOOKUP_CONCURRENCY: usize = 8;

/// Host-level configuration, loaded from a RON file.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Currency used when presenting amounts.
    pub currency: Currency,
    /// Maximum number of wallet transaction lookups in flight at once.
    pub wallet_lookup_concurrency: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            currency: Currency::MYR,
            wallet_lookup_concurrency: DEFAULT_WALLET_LOOKUP_CONCURRENCY,
        }
    }
}

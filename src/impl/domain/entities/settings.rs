use super::wallet::WalletTemplateId;

/// The tracker's singleton settings record.
///
/// `electricity_rate`, `utility_bill` and `rental_fee` are only defaults for
/// new entries; each entry keeps its own copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub initial_prepayment: f64,
    pub initial_meter_reading: f64,
    pub electricity_rate: f64,
    pub utility_bill: f64,
    pub rental_fee: f64,
    pub link_with_wallet: bool,
    pub wallet_template_id: Option<WalletTemplateId>,
}

/// Partial update of the settings. `wallet_template_id: Some(None)` clears the
/// template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub initial_prepayment: Option<f64>,
    pub initial_meter_reading: Option<f64>,
    pub electricity_rate: Option<f64>,
    pub utility_bill: Option<f64>,
    pub rental_fee: Option<f64>,
    pub link_with_wallet: Option<bool>,
    pub wallet_template_id: Option<Option<WalletTemplateId>>,
}

impl Settings {
    pub(crate) fn apply(mut self, patch: SettingsPatch) -> Self {
        if let Some(v) = patch.initial_prepayment {
            self.initial_prepayment = v;
        }
        if let Some(v) = patch.initial_meter_reading {
            self.initial_meter_reading = v;
        }
        if let Some(v) = patch.electricity_rate {
            self.electricity_rate = v;
        }
        if let Some(v) = patch.utility_bill {
            self.utility_bill = v;
        }
        if let Some(v) = patch.rental_fee {
            self.rental_fee = v;
        }
        if let Some(v) = patch.link_with_wallet {
            self.link_with_wallet = v;
        }
        if let Some(v) = patch.wallet_template_id {
            self.wallet_template_id = v;
        }
        self
    }

    /// Template to auto-create wallet transactions from, if linking is on.
    pub fn active_wallet_template(&self) -> Option<&WalletTemplateId> {
        if self.link_with_wallet {
            self.wallet_template_id.as_ref()
        } else {
            None
        }
    }
}

use crate::entities::{Settings, WalletTemplateId};

/// The settings record, named as in the record store.
#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct SettingsModel {
    #[serde(default)]
    pub initial_prepayment: f64,
    #[serde(default)]
    pub initial_meter_reading: f64,
    #[serde(default)]
    pub electricity_rate: f64,
    #[serde(default)]
    pub utility_bill: f64,
    #[serde(default)]
    pub rental_fee: f64,
    #[serde(default)]
    pub link_with_wallet: bool,
    /// Empty when no template is configured.
    #[serde(default)]
    pub wallet_template_id: String,
}

impl From<Settings> for SettingsModel {
    fn from(settings: Settings) -> Self {
        SettingsModel {
            initial_prepayment: settings.initial_prepayment,
            initial_meter_reading: settings.initial_meter_reading,
            electricity_rate: settings.electricity_rate,
            utility_bill: settings.utility_bill,
            rental_fee: settings.rental_fee,
            link_with_wallet: settings.link_with_wallet,
            wallet_template_id: settings
                .wallet_template_id
                .map(|t| t.0)
                .unwrap_or_default(),
        }
    }
}

impl From<SettingsModel> for Settings {
    fn from(model: SettingsModel) -> Self {
        Settings {
            initial_prepayment: model.initial_prepayment,
            initial_meter_reading: model.initial_meter_reading,
            electricity_rate: model.electricity_rate,
            utility_bill: model.utility_bill,
            rental_fee: model.rental_fee,
            link_with_wallet: model.link_with_wallet,
            wallet_template_id: match model.wallet_template_id.trim() {
                "" => None,
                t => Some(WalletTemplateId(t.to_string())),
            },
        }
    }
}

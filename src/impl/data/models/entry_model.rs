use fractic_server_error::ServerError;

use crate::{
    entities::{BillingPeriod, Entry, EntryId, NewEntry, WalletTransactionId},
    errors::CorruptStoreRecord,
};

use super::{attachment_model::AttachmentModel, timestamp_model::TimestampModel};

/// Writable fields of an entry record, named as in the record store.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct EntryFieldsModel {
    pub month: u32,
    pub year: i32,
    pub previous_meter_reading: f64,
    pub current_meter_reading: f64,
    pub electricity_used: f64,
    pub electricity_rate: f64,
    pub utility_bill: f64,
    pub rental_fee: f64,
    pub amount_paid: f64,
    /// Empty when the entry is not linked.
    #[serde(default)]
    pub wallet_entry_id: String,
    #[serde(default)]
    pub meter_reading_image: Option<AttachmentModel>,
    #[serde(default)]
    pub bank_statement: Option<AttachmentModel>,
}

/// A stored entry record.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct EntryRecordModel {
    pub id: String,
    #[serde(flatten)]
    pub fields: EntryFieldsModel,
    pub created: TimestampModel,
    pub updated: TimestampModel,
}

impl From<NewEntry> for EntryFieldsModel {
    fn from(entry: NewEntry) -> Self {
        EntryFieldsModel {
            month: entry.period.month(),
            year: entry.period.year(),
            previous_meter_reading: entry.previous_meter_reading,
            current_meter_reading: entry.current_meter_reading,
            electricity_used: entry.electricity_used,
            electricity_rate: entry.electricity_rate,
            utility_bill: entry.utility_bill,
            rental_fee: entry.rental_fee,
            amount_paid: entry.amount_paid,
            wallet_entry_id: entry.wallet_entry_id.map(|w| w.0).unwrap_or_default(),
            meter_reading_image: entry.meter_reading_image.map(Into::into),
            bank_statement: entry.bank_statement.map(Into::into),
        }
    }
}

impl EntryRecordModel {
    pub(crate) fn into_entry(self) -> Result<Entry, ServerError> {
        let EntryRecordModel {
            id,
            fields,
            created,
            updated,
        } = self;

        let entry_id = EntryId::parse(id.clone())
            .map_err(|e| CorruptStoreRecord::with_debug(&id, "invalid id", &e))?;
        let period = BillingPeriod::new(fields.year, fields.month)
            .map_err(|e| CorruptStoreRecord::with_debug(&id, "invalid billing period", &e))?;
        let wallet_entry_id = match fields.wallet_entry_id.trim() {
            "" => None,
            w => Some(WalletTransactionId(w.to_string())),
        };

        Ok(Entry {
            id: entry_id,
            period,
            previous_meter_reading: fields.previous_meter_reading,
            current_meter_reading: fields.current_meter_reading,
            electricity_used: fields.electricity_used,
            electricity_rate: fields.electricity_rate,
            utility_bill: fields.utility_bill,
            rental_fee: fields.rental_fee,
            amount_paid: fields.amount_paid,
            wallet_entry_id,
            meter_reading_image: fields
                .meter_reading_image
                .map(|a| a.into_attachment(&id))
                .transpose()?,
            bank_statement: fields
                .bank_statement
                .map(|a| a.into_attachment(&id))
                .transpose()?,
            created: created.0,
            updated: updated.0,
        })
    }
}

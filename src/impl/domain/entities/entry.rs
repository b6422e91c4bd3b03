use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;
use regex::Regex;

use crate::errors::InvalidRecordId;

use super::{
    attachment::{Attachment, AttachmentChange},
    billing_period::BillingPeriod,
    wallet::WalletTransactionId,
};

static RECORD_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]{15}$").expect("hardcoded regex should be valid"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) String);

/// A stored payment entry for one billing month.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub period: BillingPeriod,
    pub previous_meter_reading: f64,
    pub current_meter_reading: f64,
    /// Always `current_meter_reading - previous_meter_reading`.
    pub electricity_used: f64,
    pub electricity_rate: f64,
    pub utility_bill: f64,
    pub rental_fee: f64,
    /// Zeroed while the entry is linked to a wallet transaction; the
    /// transaction amount is used instead.
    pub amount_paid: f64,
    pub wallet_entry_id: Option<WalletTransactionId>,
    pub meter_reading_image: Option<Attachment>,
    pub bank_statement: Option<Attachment>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub period: BillingPeriod,
    pub previous_meter_reading: f64,
    pub current_meter_reading: f64,
    pub electricity_rate: f64,
    pub utility_bill: f64,
    pub rental_fee: f64,
    pub amount_paid: f64,
    pub meter_reading_image: Option<Attachment>,
    pub bank_statement: Option<Attachment>,
    pub auto_create_wallet_transaction: bool,
}

/// Partial update of an entry. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub period: Option<BillingPeriod>,
    pub previous_meter_reading: Option<f64>,
    pub current_meter_reading: Option<f64>,
    pub electricity_rate: Option<f64>,
    pub utility_bill: Option<f64>,
    pub rental_fee: Option<f64>,
    pub amount_paid: Option<f64>,
    pub meter_reading_image: AttachmentChange,
    pub bank_statement: AttachmentChange,
}

/// Entry content before the store assigns an id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewEntry {
    pub period: BillingPeriod,
    pub previous_meter_reading: f64,
    pub current_meter_reading: f64,
    pub electricity_used: f64,
    pub electricity_rate: f64,
    pub utility_bill: f64,
    pub rental_fee: f64,
    pub amount_paid: f64,
    pub wallet_entry_id: Option<WalletTransactionId>,
    pub meter_reading_image: Option<Attachment>,
    pub bank_statement: Option<Attachment>,
}

// --

impl EntryId {
    pub fn parse(id: impl Into<String>) -> Result<Self, ServerError> {
        let id = id.into();
        if !RECORD_ID_PATTERN.is_match(&id) {
            return Err(InvalidRecordId::new(&id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Entry {
    pub fn is_linked(&self) -> bool {
        self.wallet_entry_id.is_some()
    }

    pub(crate) fn into_new_entry(self) -> NewEntry {
        NewEntry {
            period: self.period,
            previous_meter_reading: self.previous_meter_reading,
            current_meter_reading: self.current_meter_reading,
            electricity_used: self.electricity_used,
            electricity_rate: self.electricity_rate,
            utility_bill: self.utility_bill,
            rental_fee: self.rental_fee,
            amount_paid: self.amount_paid,
            wallet_entry_id: self.wallet_entry_id,
            meter_reading_image: self.meter_reading_image,
            bank_statement: self.bank_statement,
        }
    }
}

impl EntryDraft {
    pub fn electricity_used(&self) -> f64 {
        self.current_meter_reading - self.previous_meter_reading
    }
}

impl NewEntry {
    pub(crate) fn from_draft(draft: EntryDraft) -> Self {
        Self {
            period: draft.period,
            previous_meter_reading: draft.previous_meter_reading,
            current_meter_reading: draft.current_meter_reading,
            electricity_used: draft.electricity_used(),
            electricity_rate: draft.electricity_rate,
            utility_bill: draft.utility_bill,
            rental_fee: draft.rental_fee,
            amount_paid: draft.amount_paid,
            wallet_entry_id: None,
            meter_reading_image: draft.meter_reading_image,
            bank_statement: draft.bank_statement,
        }
    }

    /// Applies a patch and re-derives `electricity_used` from the readings.
    pub(crate) fn apply(mut self, patch: EntryPatch) -> Self {
        if let Some(period) = patch.period {
            self.period = period;
        }
        if let Some(v) = patch.previous_meter_reading {
            self.previous_meter_reading = v;
        }
        if let Some(v) = patch.current_meter_reading {
            self.current_meter_reading = v;
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
        if let Some(v) = patch.amount_paid {
            self.amount_paid = v;
        }
        self.meter_reading_image = patch.meter_reading_image.apply(self.meter_reading_image);
        self.bank_statement = patch.bank_statement.apply(self.bank_statement);
        self.electricity_used = self.current_meter_reading - self.previous_meter_reading;
        self
    }
}

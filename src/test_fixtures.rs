use chrono::{DateTime, Utc};

use crate::entities::{BillingPeriod, Entry, EntryId};

#[allow(clippy::too_many_arguments)]
pub(crate) fn entry(
    id: &str,
    year: i32,
    month: u32,
    electricity_used: f64,
    electricity_rate: f64,
    utility_bill: f64,
    rental_fee: f64,
    amount_paid: f64,
) -> Entry {
    Entry {
        id: EntryId(id.to_string()),
        period: BillingPeriod::new(year, month).unwrap(),
        previous_meter_reading: 0.0,
        current_meter_reading: electricity_used,
        electricity_used,
        electricity_rate,
        utility_bill,
        rental_fee,
        amount_paid,
        wallet_entry_id: None,
        meter_reading_image: None,
        bank_statement: None,
        created: DateTime::<Utc>::default(),
        updated: DateTime::<Utc>::default(),
    }
}

use chrono::{Datelike as _, NaiveDate};

use crate::{
    domain::logic::utils::latest,
    entities::{BillingPeriod, Entry, EntryDraft, Settings},
};

/// Pre-filled draft for the next entry: this month, continuing from the latest
/// meter reading, with the rates from settings.
pub fn new_entry_defaults(entries: &[Entry], settings: &Settings, today: NaiveDate) -> EntryDraft {
    let previous_meter_reading = latest(entries)
        .map_or(settings.initial_meter_reading, |e| e.current_meter_reading);

    EntryDraft {
        period: BillingPeriod {
            year: today.year(),
            month: today.month(),
        },
        previous_meter_reading,
        current_meter_reading: 0.0,
        electricity_rate: settings.electricity_rate,
        utility_bill: settings.utility_bill,
        rental_fee: settings.rental_fee,
        amount_paid: 0.0,
        meter_reading_image: None,
        bank_statement: None,
        auto_create_wallet_transaction: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::entry;

    fn settings() -> Settings {
        Settings {
            initial_meter_reading: 1200.0,
            electricity_rate: 0.57,
            utility_bill: 15.0,
            rental_fee: 650.0,
            ..Default::default()
        }
    }

    #[test]
    fn first_entry_starts_from_initial_reading() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let draft = new_entry_defaults(&[], &settings(), today);
        assert_eq!(draft.period, BillingPeriod::new(2024, 5).unwrap());
        assert_eq!(draft.previous_meter_reading, 1200.0);
        assert_eq!(draft.electricity_rate, 0.57);
        assert_eq!(draft.utility_bill, 15.0);
        assert_eq!(draft.rental_fee, 650.0);
        assert_eq!(draft.amount_paid, 0.0);
    }

    #[test]
    fn continues_from_latest_entry_reading() {
        let mut older = entry("a", 2024, 1, 50.0, 0.5, 10.0, 500.0, 600.0);
        older.current_meter_reading = 1250.0;
        let mut newer = entry("b", 2024, 2, 60.0, 0.5, 10.0, 500.0, 500.0);
        newer.current_meter_reading = 1310.0;

        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let draft = new_entry_defaults(&[newer, older], &settings(), today);
        assert_eq!(draft.previous_meter_reading, 1310.0);
    }
}

use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::{
    entities::PaymentLedger,
    errors::{InvalidCsv, WriteError},
};

use super::utils::format_plain;

const HEADER: [&str; 14] = [
    "id",
    "period",
    "previous_meter_reading",
    "current_meter_reading",
    "electricity_used",
    "electricity_rate",
    "electricity_bill",
    "utility_bill",
    "rental_fee",
    "total_payable",
    "amount_paid",
    "wallet_entry_id",
    "previous_prepayment",
    "current_prepayment",
];

/// Exports the ledger as CSV, one row per entry, newest first. Money columns
/// are rounded to the currency; readings and rates are written as stored.
pub(crate) struct LedgerCsvPrinter {
    currency: Currency,
}

impl LedgerCsvPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub(crate) fn print_csv(&self, ledger: &PaymentLedger) -> Result<String, ServerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| InvalidCsv::with_debug(&e))?;
        for (entry, calculation) in ledger.rows() {
            let money = |amount: f64| format_plain(amount, self.currency);
            writer
                .write_record([
                    entry.id.to_string(),
                    entry.period.to_string(),
                    entry.previous_meter_reading.to_string(),
                    entry.current_meter_reading.to_string(),
                    entry.electricity_used.to_string(),
                    entry.electricity_rate.to_string(),
                    money(calculation.electricity_bill),
                    money(entry.utility_bill),
                    money(entry.rental_fee),
                    money(calculation.total_payable),
                    money(calculation.amount_paid),
                    entry
                        .wallet_entry_id
                        .as_ref()
                        .map(|t| t.to_string())
                        .unwrap_or_default(),
                    money(calculation.previous_prepayment),
                    money(calculation.current_prepayment),
                ])
                .map_err(|e| InvalidCsv::with_debug(&e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| WriteError::with_debug(&e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| WriteError::with_debug(&e))
    }
}

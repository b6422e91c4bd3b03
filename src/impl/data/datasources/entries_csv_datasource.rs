use std::{fs, str::FromStr as _};

use fractic_server_error::ServerError;

use crate::{
    data::models::{
        accounting_amount_model::AccountingAmountModel, billing_period_model::BillingPeriodModel,
    },
    entities::EntryDraft,
    errors::{InvalidCsv, InvalidCsvContent, ReadError},
};

/// Reads entry drafts from a headered CSV with columns:
/// period (YYYY-MM), previous_meter_reading, current_meter_reading,
/// electricity_rate, utility_bill, rental_fee, amount_paid.
pub(crate) trait EntriesCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<EntryDraft>, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<Vec<EntryDraft>, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct EntriesCsvDatasourceImpl;

impl EntriesCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl EntriesCsvDatasource for EntriesCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<EntryDraft>, ServerError> {
        csv::Reader::from_reader(s.as_bytes())
            .records()
            .enumerate()
            .map(|(i, r)| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    // Extract from CSV record.
                    let raw_period = r
                        .get(0)
                        .filter(|p| !p.trim().is_empty())
                        .ok_or_else(|| {
                            InvalidCsvContent::new(&format!("row {} has no period", i + 1))
                        })?;
                    let raw_previous_reading = r.get(1).unwrap_or("0");
                    let raw_current_reading = r.get(2).unwrap_or("0");
                    let raw_electricity_rate = r.get(3).unwrap_or("0");
                    let raw_utility_bill = r.get(4).unwrap_or("0");
                    let raw_rental_fee = r.get(5).unwrap_or("0");
                    let raw_amount_paid = r.get(6).unwrap_or("0");

                    // Parse.
                    let period = BillingPeriodModel::from_str(raw_period)?;
                    let previous_meter_reading =
                        AccountingAmountModel::from_str(raw_previous_reading)?;
                    let current_meter_reading =
                        AccountingAmountModel::from_str(raw_current_reading)?;
                    let electricity_rate = AccountingAmountModel::from_str(raw_electricity_rate)?;
                    let utility_bill = AccountingAmountModel::from_str(raw_utility_bill)?;
                    let rental_fee = AccountingAmountModel::from_str(raw_rental_fee)?;
                    let amount_paid = AccountingAmountModel::from_str(raw_amount_paid)?;

                    // Build.
                    Ok(EntryDraft {
                        period: period.into(),
                        previous_meter_reading: previous_meter_reading.into(),
                        current_meter_reading: current_meter_reading.into(),
                        electricity_rate: electricity_rate.into(),
                        utility_bill: utility_bill.into(),
                        rental_fee: rental_fee.into(),
                        amount_paid: amount_paid.into(),
                        meter_reading_image: None,
                        bank_statement: None,
                        auto_create_wallet_transaction: false,
                    })
                })
            })
            .collect()
    }

    fn from_file<P>(&self, path: P) -> Result<Vec<EntryDraft>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

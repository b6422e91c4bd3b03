use std::str::FromStr;

use chrono::{Datelike as _, NaiveDate};
use fractic_server_error::ServerError;

use crate::{entities::BillingPeriod, errors::InvalidBillingPeriod};

/// `YYYY-MM`, as used in CSV files.
#[derive(Debug)]
pub(crate) struct BillingPeriodModel(BillingPeriod);
impl FromStr for BillingPeriodModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|e| InvalidBillingPeriod::with_debug(s, &e))?;
        Ok(BillingPeriodModel(BillingPeriod::new(d.year(), d.month())?))
    }
}

impl From<BillingPeriodModel> for BillingPeriod {
    fn from(model: BillingPeriodModel) -> Self {
        model.0
    }
}

use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::errors::InvalidAccountingAmount;

/// Amount as written in spreadsheets: thousands separators allowed, negatives
/// in parentheses.
#[derive(Debug)]
pub(crate) struct AccountingAmountModel(pub f64);
impl FromStr for AccountingAmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.replace(",", "");
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(AccountingAmountModel(0.0));
        }
        let (opens, closes) = (raw.starts_with('('), raw.ends_with(')'));
        if opens != closes {
            return Err(InvalidAccountingAmount::new(s));
        }
        let is_negative = opens;
        let numeric_part = if is_negative {
            raw[1..raw.len() - 1].trim()
        } else {
            raw
        };
        let amount = numeric_part
            .parse::<f64>()
            .map_err(|_| InvalidAccountingAmount::new(s))?;
        Ok(AccountingAmountModel(if is_negative {
            -amount
        } else {
            amount
        }))
    }
}

impl From<AccountingAmountModel> for f64 {
    fn from(model: AccountingAmountModel) -> Self {
        model.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> f64 {
        AccountingAmountModel::from_str(s).unwrap().into()
    }

    #[test]
    fn parses_plain_and_formatted_amounts() {
        assert_eq!(parse("535"), 535.0);
        assert_eq!(parse("1,234.50"), 1234.5);
        assert_eq!(parse("(12.25)"), -12.25);
        assert_eq!(parse(" "), 0.0);
    }

    #[test]
    fn rejects_text() {
        assert!(AccountingAmountModel::from_str("RM 12").is_err());
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert!(AccountingAmountModel::from_str("(12").is_err());
        assert!(AccountingAmountModel::from_str("12)").is_err());
        assert!(AccountingAmountModel::from_str("((12)").is_err());
    }
}

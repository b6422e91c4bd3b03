use std::collections::HashMap;

use tracing::debug;

use crate::{
    domain::logic::utils::chronological,
    entities::{CalculatedPayment, Entry, EntryId, Settings},
};

/// Computes the running prepayment balance over a set of monthly entries.
///
/// Entries are walked oldest first. Each entry's balance starts from the
/// previous entry's closing balance (or the initial prepayment for the first
/// entry). Amounts are left unrounded; rounding is a presentation concern.
pub struct LedgerCalculator<'a> {
    entries: &'a [Entry],
    settings: &'a Settings,
    wallet_amounts: Option<&'a HashMap<EntryId, f64>>,
}

impl<'a> LedgerCalculator<'a> {
    pub fn new(entries: &'a [Entry], settings: &'a Settings) -> Self {
        Self {
            entries,
            settings,
            wallet_amounts: None,
        }
    }

    /// Paid amounts sourced from linked wallet transactions, keyed by entry id.
    /// Only consulted for entries that carry a wallet link.
    pub fn with_wallet_amounts(mut self, wallet_amounts: &'a HashMap<EntryId, f64>) -> Self {
        self.wallet_amounts = Some(wallet_amounts);
        self
    }

    pub fn process(self) -> HashMap<EntryId, CalculatedPayment> {
        let mut calculations = HashMap::with_capacity(self.entries.len());
        let mut running_prepayment = self.settings.initial_prepayment;

        for entry in chronological(self.entries) {
            let electricity_bill = entry.electricity_used * entry.electricity_rate;
            let total_payable = electricity_bill + entry.utility_bill + entry.rental_fee;
            let previous_prepayment = running_prepayment;
            let amount_paid = self.amount_paid(entry);
            let current_prepayment = previous_prepayment + amount_paid - total_payable;

            calculations.insert(
                entry.id.clone(),
                CalculatedPayment {
                    electricity_bill,
                    total_payable,
                    previous_prepayment,
                    current_prepayment,
                    amount_paid,
                },
            );
            running_prepayment = current_prepayment;
        }

        debug!(
            entries = self.entries.len(),
            closing_prepayment = running_prepayment,
            "calculated prepayment ledger"
        );
        calculations
    }

    fn amount_paid(&self, entry: &Entry) -> f64 {
        match (&entry.wallet_entry_id, self.wallet_amounts) {
            (Some(_), Some(amounts)) => amounts
                .get(&entry.id)
                .copied()
                .unwrap_or(entry.amount_paid),
            _ => entry.amount_paid,
        }
    }
}

pub fn calculate_all_prepayments(
    entries: &[Entry],
    settings: &Settings,
    wallet_amounts: Option<&HashMap<EntryId, f64>>,
) -> HashMap<EntryId, CalculatedPayment> {
    let calculator = LedgerCalculator::new(entries, settings);
    match wallet_amounts {
        Some(amounts) => calculator.with_wallet_amounts(amounts).process(),
        None => calculator.process(),
    }
}

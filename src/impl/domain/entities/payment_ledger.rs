use std::collections::HashMap;

use crate::domain::logic::utils::chronological;

use super::{
    calculated_payment::CalculatedPayment,
    entry::{Entry, EntryId},
    settings::Settings,
};

/// Every entry with its calculated figures, as shown to the user.
#[derive(Debug, Clone)]
pub struct PaymentLedger {
    pub settings: Settings,
    /// Newest first.
    pub entries: Vec<Entry>,
    pub calculations: HashMap<EntryId, CalculatedPayment>,
}

impl PaymentLedger {
    pub fn rows(&self) -> impl Iterator<Item = (&Entry, &CalculatedPayment)> {
        self.entries
            .iter()
            .filter_map(|e| self.calculations.get(&e.id).map(|c| (e, c)))
    }

    pub fn calculation(&self, id: &EntryId) -> Option<&CalculatedPayment> {
        self.calculations.get(id)
    }

    /// Prepayment balance after the most recent month, or the initial
    /// prepayment if there are no entries yet.
    pub fn current_prepayment(&self) -> f64 {
        chronological(&self.entries)
            .last()
            .and_then(|e| self.calculations.get(&e.id))
            .map_or(self.settings.initial_prepayment, |c| c.current_prepayment)
    }
}

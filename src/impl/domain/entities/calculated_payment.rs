/// Derived figures for one entry. Recomputed on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatedPayment {
    pub electricity_bill: f64,
    pub total_payable: f64,
    /// Balance carried down from the previous entry.
    pub previous_prepayment: f64,
    /// Balance brought down to the next entry.
    pub current_prepayment: f64,
    /// Wallet transaction amount for linked entries, else the stored amount.
    pub amount_paid: f64,
}

impl CalculatedPayment {
    /// Positive when the payment exceeded what was payable this month.
    pub fn excess_or_shortfall(&self) -> f64 {
        self.amount_paid - self.total_payable
    }
}

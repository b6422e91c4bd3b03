use iso_currency::Currency;

use crate::entities::{CalculatedPayment, Entry};

use super::utils::{format_accounting, format_plain};

pub(crate) struct PaymentCardPrinter {
    currency: Currency,
}

impl PaymentCardPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Prints the payment card for one month: header, formula line, then the
    /// breakdown table.
    pub(crate) fn print_card(&self, entry: &Entry, calculation: &CalculatedPayment) -> String {
        let mut card = String::new();

        card.push_str(&format!("{}\n", entry.period.label()));
        card.push_str(&format!(
            "{} ({} + {} + {}) = {}\n",
            self.currency.symbol(),
            format_plain(entry.rental_fee, self.currency),
            format_plain(entry.utility_bill, self.currency),
            format_plain(calculation.electricity_bill, self.currency),
            format_accounting(calculation.total_payable, self.currency),
        ));

        let amount_paid_label = if entry.is_linked() {
            "Amount paid (wallet)".to_string()
        } else {
            "Amount paid".to_string()
        };
        let rows = [
            ("Rental fee".to_string(), entry.rental_fee),
            (
                format!(
                    "Electricity ({} kWh x {})",
                    entry.electricity_used, entry.electricity_rate
                ),
                calculation.electricity_bill,
            ),
            ("Utility bill".to_string(), entry.utility_bill),
            ("Total payable".to_string(), calculation.total_payable),
            (amount_paid_label, calculation.amount_paid),
            ("Less: total payable".to_string(), -calculation.total_payable),
            (
                "Excess/(shortfall)".to_string(),
                calculation.excess_or_shortfall(),
            ),
            (
                format!("Prepayment c/d from {}", entry.period.previous().label()),
                calculation.previous_prepayment,
            ),
            (
                format!("Prepayment b/d to {}", entry.period.next().label()),
                calculation.current_prepayment,
            ),
        ];
        for (label, amount) in rows {
            card.push_str(&format!(
                "  {:44}{:>20}\n",
                label,
                format_accounting(amount, self.currency)
            ));
        }

        card
    }
}

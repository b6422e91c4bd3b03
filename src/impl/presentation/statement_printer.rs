use iso_currency::Currency;

use crate::entities::PaymentLedger;

use super::{payment_card_printer::PaymentCardPrinter, utils::format_accounting};

pub(crate) struct StatementPrinter {
    currency: Currency,
    card_printer: PaymentCardPrinter,
}

impl StatementPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self {
            currency,
            card_printer: PaymentCardPrinter::new(currency),
        }
    }

    pub(crate) fn print_statement(&self, ledger: &PaymentLedger) -> String {
        let mut statement_output = String::new();

        statement_output.push_str(
            "; --- Prepayment ---------------------------------------------------------------\n\n",
        );
        statement_output.push_str(&format!(
            "Prepaid amount: {}\n",
            format_accounting(ledger.current_prepayment(), self.currency)
        ));
        statement_output.push_str("\n\n");

        statement_output.push_str(
            "; --- Payments -----------------------------------------------------------------\n\n",
        );
        let cards: Vec<String> = ledger
            .rows()
            .map(|(entry, calculation)| self.card_printer.print_card(entry, calculation))
            .collect();
        if cards.is_empty() {
            statement_output.push_str("No payment entries.\n");
        } else {
            statement_output.push_str(&cards.join("\n"));
        }

        statement_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::logic::ledger_calculator::calculate_all_prepayments,
        entities::{Entry, Settings},
        test_fixtures::entry,
    };

    fn ledger(entries: Vec<Entry>, initial_prepayment: f64) -> PaymentLedger {
        let settings = Settings {
            initial_prepayment,
            ..Default::default()
        };
        let calculations = calculate_all_prepayments(&entries, &settings, None);
        PaymentLedger {
            settings,
            entries,
            calculations,
        }
    }

    #[test]
    fn prints_prepaid_amount_then_cards_newest_first() {
        let statement = StatementPrinter::new(Currency::MYR).print_statement(&ledger(
            vec![
                entry("b", 2024, 2, 60.0, 0.5, 10.0, 500.0, 500.0),
                entry("a", 2024, 1, 50.0, 0.5, 10.0, 500.0, 600.0),
            ],
            100.0,
        ));
        assert!(statement.contains("Prepaid amount: RM 125.00\n"));
        let feb = statement.find("Feb 2024\n").unwrap();
        let jan = statement.find("Jan 2024\n").unwrap();
        assert!(feb < jan);
    }

    #[test]
    fn empty_statement_shows_initial_prepayment() {
        let statement =
            StatementPrinter::new(Currency::MYR).print_statement(&ledger(vec![], 42.0));
        assert!(statement.contains("Prepaid amount: RM 42.00\n"));
        assert!(statement.contains("No payment entries.\n"));
    }
}

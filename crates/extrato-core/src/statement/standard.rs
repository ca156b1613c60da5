//! Investment-movement layouts ("Padrão 2" and Banco do Brasil).
//!
//! Text from every page is searched. Each field exists in two renderings:
//! the value on the line after the label, or a CSV-like `Label , "value`
//! artifact from statements converted through a spreadsheet.

use regex::Regex;
use tracing::debug;

use crate::models::statement::StatementRecord;
use crate::pdf::TextScope;

use super::rules::patterns::{
    MOVEMENT_ACCOUNT, MOVEMENT_ACCOUNT_CSV, MOVEMENT_CURRENT_BALANCE,
    MOVEMENT_CURRENT_BALANCE_CSV, MOVEMENT_INCOME, MOVEMENT_INCOME_CSV,
    MOVEMENT_PREVIOUS_BALANCE, MOVEMENT_PREVIOUS_BALANCE_CSV,
};
use super::rules::{parse_amount, AmountFormat, Field, FieldPattern, NO_MOVEMENT_MARKER};
use super::{Layout, StatementExtractor};

/// Account placeholder when neither rendering of the label is present.
pub const ACCOUNT_NOT_FOUND: &str = "Não encontrado";

pub static STANDARD: MovementExtractor = MovementExtractor {
    layout: Layout::Standard,
    bank: None,
    account_missing: ACCOUNT_NOT_FOUND,
};

pub static BB: MovementExtractor = MovementExtractor {
    layout: Layout::Bb,
    bank: Some("Banco do Brasil"),
    account_missing: ACCOUNT_NOT_FOUND,
};

/// Extractor shared by the layouts that print investment movements.
pub struct MovementExtractor {
    layout: Layout,
    bank: Option<&'static str>,
    account_missing: &'static str,
}

impl StatementExtractor for MovementExtractor {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn bank(&self) -> Option<&'static str> {
        self.bank
    }

    fn text_scope(&self) -> TextScope {
        TextScope::AllPages
    }

    fn extract_from_text(&self, file_name: &str, text: &str) -> StatementRecord {
        let locate = |field: Field, current: &'static Regex, csv: &'static Regex| {
            FieldPattern::new(field, current)
                .with_fallback(csv)
                .locate(text)
        };

        let account = locate(Field::Account, &MOVEMENT_ACCOUNT, &MOVEMENT_ACCOUNT_CSV)
            .map(str::trim)
            .unwrap_or(self.account_missing);

        let mut record = StatementRecord {
            file_name: file_name.to_string(),
            bank: self.bank.map(str::to_string),
            account: account.to_string(),
            previous_balance: 0.0,
            income: 0.0,
            current_balance: 0.0,
        };

        if text.contains(NO_MOVEMENT_MARKER) {
            debug!("{}: no movement in period", file_name);
            return record;
        }

        let amount = |field: Field, current: &'static Regex, csv: &'static Regex| {
            parse_amount(locate(field, current, csv), AmountFormat::Plain)
        };

        record.previous_balance = amount(
            Field::PreviousBalance,
            &MOVEMENT_PREVIOUS_BALANCE,
            &MOVEMENT_PREVIOUS_BALANCE_CSV,
        );
        record.income = amount(Field::Income, &MOVEMENT_INCOME, &MOVEMENT_INCOME_CSV);
        record.current_balance = amount(
            Field::CurrentBalance,
            &MOVEMENT_CURRENT_BALANCE,
            &MOVEMENT_CURRENT_BALANCE_CSV,
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::testing::TextPdf;
    use pretty_assertions::assert_eq;

    const CURRENT: &str = "EXTRATO DE INVESTIMENTOS\n\
        Agência\n1234\n\
        Conta\n98765-0\n\
        SALDO ANTERIOR\n2.500,00\n\
        RENDIMENTO LÍQUIDO\n12,34\n\
        SALDO ATUAL =\n2.512,34\n";

    const CSV_RENDERED: &str = "\"Agência\" , \"1234\n\
        Conta , \"98765-0\"\n\
        SALDO ANTERIOR , \"2.500,00\"\n\
        RENDIMENTO LÍQUIDO , \"12,34\"\n\
        SALDO ATUAL = , \"2.512,34\"\n";

    #[test]
    fn test_current_rendering() {
        let record = STANDARD.extract_from_text("inv.pdf", CURRENT);
        assert_eq!(
            record,
            StatementRecord {
                file_name: "inv.pdf".to_string(),
                bank: None,
                account: "98765-0".to_string(),
                previous_balance: 2500.0,
                income: 12.34,
                current_balance: 2512.34,
            }
        );
    }

    #[test]
    fn test_csv_rendering() {
        let record = STANDARD.extract_from_text("inv.pdf", CSV_RENDERED);
        assert_eq!(record.account, "98765-0");
        assert_eq!(record.previous_balance, 2500.0);
        assert_eq!(record.income, 12.34);
        assert_eq!(record.current_balance, 2512.34);
    }

    #[test]
    fn test_no_movement_short_circuits() {
        let text = format!("{}NÃO HOUVE MOVIMENTO NO PERÍODO SOLICITADO\n", CURRENT);
        let record = STANDARD.extract_from_text("inv.pdf", &text);
        assert_eq!(record.account, "98765-0");
        assert_eq!(record.previous_balance, 0.0);
        assert_eq!(record.income, 0.0);
        assert_eq!(record.current_balance, 0.0);
    }

    #[test]
    fn test_missing_account() {
        let record = STANDARD.extract_from_text("inv.pdf", "SALDO ATUAL =\n10,00\n");
        assert_eq!(record.account, ACCOUNT_NOT_FOUND);
        assert_eq!(record.current_balance, 10.0);
    }

    #[test]
    fn test_bb_carries_bank() {
        let record = BB.extract_from_text("bb.pdf", CURRENT);
        assert_eq!(record.bank.as_deref(), Some("Banco do Brasil"));
        assert_eq!(record.current_balance, 2512.34);
    }

    #[test]
    fn test_reads_all_pages() {
        let data = "Conta\n111-2\n\u{c}SALDO ATUAL =\n3.000,00\n";
        let mut pdf = TextPdf::default();
        let record = STANDARD.process_with(&mut pdf, data.as_bytes(), "two-pages.pdf");
        assert_eq!(record.account, "111-2");
        assert_eq!(record.current_balance, 3000.0);
    }

    #[test]
    fn test_error_record_keeps_bank() {
        let mut pdf = TextPdf::default();
        let record = BB.process_with(&mut pdf, b"%BROKEN", "bad.pdf");
        assert!(record.is_error());
        assert_eq!(record.bank.as_deref(), Some("Banco do Brasil"));
    }
}

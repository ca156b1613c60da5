//! CAIXA statement layout.
//!
//! Fields sit on the first page, each value on the line after its label.
//! Amounts carry a trailing C/D marker.

use regex::Regex;

use crate::models::statement::StatementRecord;
use crate::pdf::TextScope;

use super::rules::patterns::{
    CAIXA_ACCOUNT, CAIXA_CURRENT_BALANCE, CAIXA_INCOME, CAIXA_PREVIOUS_BALANCE,
};
use super::rules::{parse_amount, AmountFormat, Field, FieldPattern};
use super::{Layout, StatementExtractor};

/// Account placeholder when the label is missing.
pub const ACCOUNT_NOT_IDENTIFIED: &str = "Não identificada";

pub static CAIXA: CaixaExtractor = CaixaExtractor;

/// Extractor for CAIXA statements.
pub struct CaixaExtractor;

impl StatementExtractor for CaixaExtractor {
    fn layout(&self) -> Layout {
        Layout::Caixa
    }

    fn text_scope(&self) -> TextScope {
        TextScope::FirstPage
    }

    fn extract_from_text(&self, file_name: &str, text: &str) -> StatementRecord {
        let amount = |field: Field, pattern: &'static Regex| {
            let raw = FieldPattern::new(field, pattern).locate(text);
            parse_amount(raw, AmountFormat::BankSuffixed)
        };

        let account = FieldPattern::new(Field::Account, &CAIXA_ACCOUNT)
            .locate(text)
            .unwrap_or(ACCOUNT_NOT_IDENTIFIED);

        StatementRecord {
            file_name: file_name.to_string(),
            bank: self.bank().map(str::to_string),
            account: account.to_string(),
            previous_balance: amount(Field::PreviousBalance, &CAIXA_PREVIOUS_BALANCE),
            income: amount(Field::Income, &CAIXA_INCOME),
            current_balance: amount(Field::CurrentBalance, &CAIXA_CURRENT_BALANCE),
        }
    }
}

//! Regex patterns for the supported statement layouts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CAIXA: label on one line, value on the next
    pub static ref CAIXA_ACCOUNT: Regex = Regex::new(
        r"(?m)Conta Corrente\s*\n\s*([\d.\-]+)"
    ).unwrap();

    pub static ref CAIXA_PREVIOUS_BALANCE: Regex = Regex::new(
        r"(?m)Saldo Anterior\s*\n\s*([\d.,]+[CD]?)"
    ).unwrap();

    pub static ref CAIXA_INCOME: Regex = Regex::new(
        r"(?m)Rendimento Bruto no Mês\s*\n\s*([\d.,]+[CD]?)"
    ).unwrap();

    pub static ref CAIXA_CURRENT_BALANCE: Regex = Regex::new(
        r"(?m)Saldo Bruto\*?\s*\n\s*([\d.,]+[CD]?)"
    ).unwrap();

    // Padrão 2 / BB, direct PDF text: value right after the label's line break
    pub static ref MOVEMENT_ACCOUNT: Regex = Regex::new(
        r"Conta\n([\d\-]+)"
    ).unwrap();

    pub static ref MOVEMENT_PREVIOUS_BALANCE: Regex = Regex::new(
        r"SALDO ANTERIOR\n([\d.,]+)"
    ).unwrap();

    pub static ref MOVEMENT_INCOME: Regex = Regex::new(
        r"RENDIMENTO LÍQUIDO\n([\d.,]+)"
    ).unwrap();

    pub static ref MOVEMENT_CURRENT_BALANCE: Regex = Regex::new(
        r"SALDO ATUAL =\n([\d.,]+)"
    ).unwrap();

    // Padrão 2 / BB, CSV-derived rendering: `Label , "value`
    pub static ref MOVEMENT_ACCOUNT_CSV: Regex = Regex::new(
        r#"Conta\s*,\s*"([\d\-]+)"#
    ).unwrap();

    pub static ref MOVEMENT_PREVIOUS_BALANCE_CSV: Regex = Regex::new(
        r#"SALDO ANTERIOR\s*,\s*"([\d.,]+)"#
    ).unwrap();

    pub static ref MOVEMENT_INCOME_CSV: Regex = Regex::new(
        r#"RENDIMENTO LÍQUIDO\s*,\s*"([\d.,]+)"#
    ).unwrap();

    pub static ref MOVEMENT_CURRENT_BALANCE_CSV: Regex = Regex::new(
        r#"SALDO ATUAL =\s*,\s*"([\d.,]+)"#
    ).unwrap();
}

/// Marker printed on statements for periods without movement.
pub const NO_MOVEMENT_MARKER: &str = "NÃO HOUVE MOVIMENTO";

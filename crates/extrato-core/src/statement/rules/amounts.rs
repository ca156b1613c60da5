//! Amount normalization for Brazilian statements.

/// How an amount is written on the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountFormat {
    /// `1.000,00C`: pt-BR separators plus a trailing credit/debit letter.
    BankSuffixed,
    /// `1.000,00`: pt-BR separators only.
    Plain,
}

/// Parse a matched amount into a float.
///
/// Never fails: absent, empty or unparseable input yields 0.0. For
/// [`AmountFormat::BankSuffixed`] the C/D marker is dropped without changing
/// the sign.
pub fn parse_amount(raw: Option<&str>, format: AmountFormat) -> f64 {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return 0.0,
    };

    match format {
        AmountFormat::Plain => parse_brazilian_amount(raw),
        AmountFormat::BankSuffixed => {
            let digits: String = raw
                .trim()
                .to_uppercase()
                .chars()
                .filter(|c| !c.is_alphabetic())
                .collect();
            parse_brazilian_amount(digits.trim())
        }
    }
}

/// Parse a pt-BR amount (`1.234,56`), returning 0.0 when it is not a number.
pub fn parse_brazilian_amount(s: &str) -> f64 {
    let normalized = s.replace('.', "").replace(',', ".");
    normalized.trim().parse::<f64>().unwrap_or(0.0)
}

/// Format an amount in pt-BR currency style (`R$ 1.234,56`).
pub fn format_brl(amount: f64) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    let sign = if amount < 0.0 && s != "0.00" { "-" } else { "" };
    format!("{}R$ {},{}", sign, formatted, decimal_part)
}

//! Statement records produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Prefix carried by the account field of a record whose file failed.
pub const ERROR_PREFIX: &str = "Erro:";

/// One uploaded statement: its file name and raw bytes.
#[derive(Debug, Clone)]
pub struct StatementFile {
    /// File name as uploaded.
    pub name: String,
    /// Raw PDF bytes.
    pub data: Vec<u8>,
}

impl StatementFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// The flat record extracted from one statement file.
///
/// Numeric fields are always present; anything that could not be located or
/// parsed is 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Source file name.
    pub file_name: String,

    /// Bank label, for layouts that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,

    /// Account identifier, a not-found sentinel, or `Erro: <message>`.
    pub account: String,

    /// Balance carried over from the previous period.
    pub previous_balance: f64,

    /// Yield credited during the period.
    pub income: f64,

    /// Balance at the end of the period.
    pub current_balance: f64,
}

impl StatementRecord {
    /// Build a record for a file that could not be processed.
    pub fn failed(
        file_name: impl Into<String>,
        bank: Option<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            bank,
            account: format!("{} {}", ERROR_PREFIX, message),
            previous_balance: 0.0,
            income: 0.0,
            current_balance: 0.0,
        }
    }

    /// Whether this record stands for a failed file.
    pub fn is_error(&self) -> bool {
        self.account.starts_with(ERROR_PREFIX)
    }
}

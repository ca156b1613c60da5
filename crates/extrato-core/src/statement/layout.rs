//! The closed set of supported statement layouts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLayout;

use super::caixa::CAIXA;
use super::standard::{BB, STANDARD};
use super::StatementExtractor;

/// A bank statement layout. The user picks one per batch; it is never
/// inferred from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// CAIXA statement, single page, C/D suffixed amounts.
    #[serde(rename = "caixa")]
    Caixa,
    /// Investment statement ("Padrão 2"), all pages, plain amounts.
    #[serde(rename = "padrao2")]
    Standard,
    /// Banco do Brasil statement, same labels as [`Layout::Standard`].
    #[serde(rename = "bb")]
    Bb,
}

impl Layout {
    /// Every layout, in the order the selectors list them.
    pub const ALL: [Layout; 3] = [Layout::Caixa, Layout::Standard, Layout::Bb];

    /// Short machine name used in URLs, file names and config.
    pub fn slug(self) -> &'static str {
        match self {
            Layout::Caixa => "caixa",
            Layout::Standard => "padrao2",
            Layout::Bb => "bb",
        }
    }

    /// Human label shown in the selectors.
    pub fn label(self) -> &'static str {
        match self {
            Layout::Caixa => "Extrato CAIXA",
            Layout::Standard => "Extrato Padrão 2",
            Layout::Bb => "Extrato BB",
        }
    }

    /// The extractor implementing this layout.
    pub fn extractor(self) -> &'static dyn StatementExtractor {
        match self {
            Layout::Caixa => &CAIXA,
            Layout::Standard => &STANDARD,
            Layout::Bb => &BB,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Layout::ALL
            .into_iter()
            .find(|layout| {
                layout.slug().eq_ignore_ascii_case(wanted) || layout.label() == wanted
            })
            .ok_or_else(|| UnknownLayout(s.to_string()))
    }
}

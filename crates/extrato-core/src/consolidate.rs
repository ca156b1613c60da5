//! Consolidated table of statement records and its aggregates.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::statement::StatementRecord;

/// Records in processing order. Aggregates are computed on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConsolidatedTable {
    records: Vec<StatementRecord>,
}

/// Headline numbers shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableSummary {
    pub record_count: usize,
    pub total_current_balance: f64,
    pub total_income: f64,
    pub distinct_accounts: usize,
}

impl ConsolidatedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StatementRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StatementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatementRecord> {
        self.records.iter()
    }

    /// Whether any record names its bank, which adds a bank column.
    pub fn has_bank(&self) -> bool {
        self.records.iter().any(|r| r.bank.is_some())
    }

    pub fn total_current_balance(&self) -> f64 {
        self.records.iter().map(|r| r.current_balance).sum()
    }

    pub fn total_income(&self) -> f64 {
        self.records.iter().map(|r| r.income).sum()
    }

    /// Number of distinct account strings. Sentinels and error messages
    /// count as accounts too.
    pub fn distinct_accounts(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.account.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            record_count: self.len(),
            total_current_balance: self.total_current_balance(),
            total_income: self.total_income(),
            distinct_accounts: self.distinct_accounts(),
        }
    }

    /// Current balance summed per account, in first-seen order, for the
    /// balance chart.
    pub fn balance_by_account(&self) -> Vec<(&str, f64)> {
        let mut bars: Vec<(&str, f64)> = Vec::new();
        for record in &self.records {
            match bars.iter_mut().find(|(account, _)| *account == record.account) {
                Some((_, total)) => *total += record.current_balance,
                None => bars.push((&record.account, record.current_balance)),
            }
        }
        bars
    }
}

impl FromIterator<StatementRecord> for ConsolidatedTable {
    fn from_iter<I: IntoIterator<Item = StatementRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConsolidatedTable {
    type Item = &'a StatementRecord;
    type IntoIter = std::slice::Iter<'a, StatementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

//! Labeled field lookup with layout-variant fallback.

use regex::Regex;
use tracing::trace;

/// Fields located on a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Account,
    PreviousBalance,
    Income,
    CurrentBalance,
}

/// Patterns for one field: the current rendering first, an older rendering
/// as fallback.
pub struct FieldPattern {
    pub field: Field,
    pub primary: &'static Regex,
    pub fallback: Option<&'static Regex>,
}

impl FieldPattern {
    pub fn new(field: Field, primary: &'static Regex) -> Self {
        Self {
            field,
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: &'static Regex) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// First capture group of the first pattern that matches.
    pub fn locate<'t>(&self, text: &'t str) -> Option<&'t str> {
        let found = std::iter::once(self.primary)
            .chain(self.fallback)
            .find_map(|re| re.captures(text))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        trace!("{:?} -> {:?}", self.field, found);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref NEW: Regex = Regex::new(r"Total\n(\d+)").unwrap();
        static ref OLD: Regex = Regex::new(r#"Total\s*,\s*"(\d+)"#).unwrap();
    }

    #[test]
    fn test_primary_wins() {
        let pattern = FieldPattern::new(Field::CurrentBalance, &NEW).with_fallback(&OLD);
        assert_eq!(pattern.locate("Total , \"7\nTotal\n42"), Some("42"));
    }

    #[test]
    fn test_fallback_used() {
        let pattern = FieldPattern::new(Field::CurrentBalance, &NEW).with_fallback(&OLD);
        assert_eq!(pattern.locate("Total , \"7"), Some("7"));
    }

    #[test]
    fn test_first_match_only() {
        let pattern = FieldPattern::new(Field::CurrentBalance, &NEW);
        assert_eq!(pattern.locate("Total\n1\nTotal\n2"), Some("1"));
    }

    #[test]
    fn test_no_match() {
        let pattern = FieldPattern::new(Field::CurrentBalance, &NEW).with_fallback(&OLD);
        assert_eq!(pattern.locate("nothing here"), None);
    }
}

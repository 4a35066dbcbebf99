//! Text classification predicates used while walking a page.

use serde::{Deserialize, Serialize};

/// True when the text carries any of the currency indicators (`$`, `CAD`, ...).
pub fn is_amount_text<S: AsRef<str>>(text: &str, indicators: &[S]) -> bool {
    indicators
        .iter()
        .map(AsRef::as_ref)
        .filter(|ind| !ind.is_empty())
        .any(|ind| text.contains(ind))
}

/// Settlement status of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "settled")]
    Settled,
}

impl RowStatus {
    /// Pending if the row's full text contains the marker (case-sensitive).
    pub fn classify(row_text: &str, pending_marker: &str) -> Self {
        if !pending_marker.is_empty() && row_text.contains(pending_marker) {
            RowStatus::Pending
        } else {
            RowStatus::Settled
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RowStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_indicators() {
        let ind = ["$", "CAD"];
        assert!(is_amount_text("-$4.50", &ind));
        assert!(is_amount_text("12.00 CAD", &ind));
        assert!(!is_amount_text("Coffee Shop", &ind));
        assert!(!is_amount_text("12.00", &ind));
    }

    #[test]
    fn test_empty_indicator_never_matches() {
        assert!(!is_amount_text("anything", &[""]));
    }

    #[test]
    fn test_pending_marker() {
        assert_eq!(
            RowStatus::classify("Pending Merchant Pending -$9.99", "Pending"),
            RowStatus::Pending
        );
        assert_eq!(RowStatus::classify("Coffee Shop -$4.50", "Pending"), RowStatus::Settled);
        // Case-sensitive, as rendered.
        assert_eq!(RowStatus::classify("pending review", "Pending"), RowStatus::Settled);
        assert!(RowStatus::classify("Pending", "Pending").is_pending());
    }
}

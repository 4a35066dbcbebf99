//! Extraction pipeline: sections -> amount candidates -> rows -> records.
//!
//! All accumulation (seen-set, record list, counters) lives in the call, so
//! one [`Extractor`] can run against any number of documents.

use activity_core::{Insertion, Record, RecordSet, RowStatus, is_amount_text, normalize_amount};
use chrono::NaiveDate;
use scraper::Html;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dom::DocNode;
use crate::layout::PageLayout;
use crate::locate::{BoundedAscent, RowLocator};
use crate::sections::{Section, discover_sections};

/// Tallies for one run. Nothing here is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub sections: usize,
    pub non_date_headings: usize,
    pub undated_headings: usize,
    /// Marker fields with a currency indicator.
    pub candidates: usize,
    /// Candidates with no row inside the ascent bound.
    pub dead_ends: usize,
    pub pending_skipped: usize,
    pub unparseable_amounts: usize,
    pub duplicates: usize,
    pub records: usize,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub report: ExtractionReport,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Extractor<L: RowLocator = BoundedAscent> {
    layout: PageLayout,
    locator: L,
}

impl Extractor<BoundedAscent> {
    pub fn new(layout: PageLayout) -> Self {
        let locator = BoundedAscent::from_layout(&layout);
        Self { layout, locator }
    }
}

impl Default for Extractor<BoundedAscent> {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}

impl<L: RowLocator> Extractor<L> {
    pub fn with_locator(layout: PageLayout, locator: L) -> Self {
        Self { layout, locator }
    }

    /// Parse a saved page and extract from its root element.
    pub fn extract_html(&self, html: &str, today: NaiveDate) -> Extraction {
        let document = Html::parse_document(html);
        self.extract(document.root_element(), today)
    }

    /// Walk every date section under `root` and collect settled records.
    pub fn extract<N: DocNode>(&self, root: N, today: NaiveDate) -> Extraction {
        let scan = discover_sections(root, &self.layout, today);
        let mut report = ExtractionReport {
            sections: scan.sections.len(),
            non_date_headings: scan.non_date_headings,
            undated_headings: scan.undated_headings,
            ..Default::default()
        };
        let mut set = RecordSet::new();

        for section in &scan.sections {
            self.extract_section(section, &mut set, &mut report);
        }

        report.records = set.len();
        info!(
            sections = report.sections,
            candidates = report.candidates,
            records = report.records,
            pending = report.pending_skipped,
            duplicates = report.duplicates,
            dead_ends = report.dead_ends,
            "extraction finished"
        );

        Extraction {
            records: set.into_records(),
            report,
        }
    }

    fn extract_section<N: DocNode>(
        &self,
        section: &Section<N>,
        set: &mut RecordSet,
        report: &mut ExtractionReport,
    ) {
        let marker = &self.layout.marker;

        for member in &section.members {
            for candidate in marker.fields_within(member) {
                let amount_text = candidate.inner_text();
                if !is_amount_text(&amount_text, &self.layout.currency_indicators) {
                    continue;
                }
                report.candidates += 1;

                let Some(row) = self.locator.locate(candidate, *member) else {
                    debug!(section = %section.heading_text, amount = %amount_text, "no row found for amount");
                    report.dead_ends += 1;
                    continue;
                };

                if RowStatus::classify(&row.inner_text(), &self.layout.pending_marker).is_pending() {
                    debug!(section = %section.heading_text, amount = %amount_text, "skipping pending row");
                    report.pending_skipped += 1;
                    continue;
                }

                let fields = marker.fields_within(&row);
                // First marker field in a row is the payee.
                let Some(first) = fields.first().filter(|_| fields.len() >= self.layout.min_row_fields) else {
                    report.dead_ends += 1;
                    continue;
                };
                let payee = first.inner_text();

                let Some(amount) = normalize_amount(&amount_text, &self.layout.minus_glyphs) else {
                    warn!(payee = %payee, amount = %amount_text, "amount is not a number; dropping row");
                    report.unparseable_amounts += 1;
                    continue;
                };

                if set.insert(Record::new(section.date, payee, amount)) == Insertion::Duplicate {
                    debug!(section = %section.heading_text, amount = %amount_text, "duplicate record");
                    report.duplicates += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn extractor() -> Extractor {
        Extractor::new(PageLayout::default())
    }

    fn row(payee: &str, amount: &str, extra: &str) -> String {
        format!(
            "<a><div><p data-fs-privacy-rule='unmask'>{payee}</p>{extra}</div>\
             <div><p data-fs-privacy-rule='unmask'>{amount}</p></div></a>"
        )
    }

    fn page(sections: &[(&str, Vec<String>)]) -> String {
        let mut html = String::from("<html><body><main><h2>Activity</h2>");
        for (heading, rows) in sections {
            html.push_str(&format!("<h2>{heading}</h2><div>"));
            for r in rows {
                html.push_str(r);
            }
            html.push_str("</div>");
        }
        html.push_str("</main></body></html>");
        html
    }

    #[test]
    fn test_pending_rows_produce_nothing() {
        let html = page(&[(
            "Today",
            vec![
                row("Coffee Shop", "-$4.50", ""),
                row("Pending Merchant", "-$9.99", "<span>Pending</span>"),
            ],
        )]);
        let out = extractor().extract_html(&html, today());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].payee, "Coffee Shop");
        assert_eq!(out.report.pending_skipped, 1);
    }

    #[test]
    fn test_duplicates_collapse_but_different_amounts_do_not() {
        let html = page(&[(
            "Today",
            vec![
                row("Coffee Shop", "-$4.50", ""),
                row("Coffee Shop", "\u{2212}$4.50", ""),
                row("Coffee Shop", "-$5.00", ""),
            ],
        )]);
        let out = extractor().extract_html(&html, today());
        let amounts: Vec<f64> = out.records.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![-4.5, -5.0]);
        assert_eq!(out.report.duplicates, 1);
    }

    #[test]
    fn test_same_payee_and_amount_on_different_days_are_kept() {
        let html = page(&[
            ("Today", vec![row("Transit", "-$3.30", "")]),
            ("Yesterday", vec![row("Transit", "-$3.30", "")]),
        ]);
        let out = extractor().extract_html(&html, today());
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[1].date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    }

    #[test]
    fn test_non_amount_fields_are_not_candidates() {
        let html = page(&[("Today", vec![row("Coffee Shop", "4.50", "")])]);
        let out = extractor().extract_html(&html, today());
        assert!(out.is_empty());
        assert_eq!(out.report.candidates, 0);
    }

    #[test]
    fn test_unparseable_amount_is_dropped_and_counted() {
        let html = page(&[("Today", vec![row("Mystery", "CAD", "")])]);
        let out = extractor().extract_html(&html, today());
        assert!(out.is_empty());
        assert_eq!(out.report.candidates, 1);
        assert_eq!(out.report.unparseable_amounts, 1);
    }

    #[test]
    fn test_lonely_amount_is_a_dead_end() {
        let html = page(&[(
            "Today",
            vec!["<div><p data-fs-privacy-rule='unmask'>$10.00</p></div>".to_string()],
        )]);
        let out = extractor().extract_html(&html, today());
        assert!(out.is_empty());
        assert_eq!(out.report.dead_ends, 1);
    }

    #[test]
    fn test_amount_without_its_own_row_is_not_credited_to_a_neighbour() {
        let html = page(&[(
            "Today",
            vec![
                row("Coffee Shop", "-$4.50", ""),
                "<div><p data-fs-privacy-rule='unmask'>$100.00</p></div>".to_string(),
            ],
        )]);
        let out = extractor().extract_html(&html, today());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].payee, "Coffee Shop");
        assert_eq!(out.records[0].amount, -4.5);
        assert_eq!(out.report.dead_ends, 1);
    }

    #[test]
    fn test_row_without_fields_is_a_dead_end() {
        /// Answers with the amount field itself, which has no fields below it.
        struct Itself;
        impl RowLocator for Itself {
            fn locate<N: DocNode>(&self, candidate: N, _boundary: N) -> Option<N> {
                Some(candidate)
            }
        }

        let layout = PageLayout {
            min_row_fields: 0,
            ..PageLayout::default()
        };
        let html = page(&[("Today", vec![row("Bakery", "-$7.25", "")])]);
        let out = Extractor::with_locator(layout, Itself).extract_html(&html, today());
        assert!(out.is_empty());
        assert_eq!(out.report.candidates, 1);
        assert_eq!(out.report.dead_ends, 1);
    }

    #[test]
    fn test_custom_locator() {
        /// Rows are always the candidate's grandparent.
        struct Grandparent;
        impl RowLocator for Grandparent {
            fn locate<N: DocNode>(&self, candidate: N, _boundary: N) -> Option<N> {
                candidate.parent_node()?.parent_node()
            }
        }

        let html = page(&[("Today", vec![row("Bakery", "-$7.25", "")])]);
        let out = Extractor::with_locator(PageLayout::default(), Grandparent).extract_html(&html, today());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].payee, "Bakery");
        assert_eq!(out.records[0].amount, -7.25);
    }
}

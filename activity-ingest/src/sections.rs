//! Date section discovery.

use activity_core::{is_date_heading, resolve_heading_date};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dom::DocNode;
use crate::layout::PageLayout;

/// A heading plus the sibling elements that follow it, up to the next heading.
#[derive(Debug, Clone)]
pub struct Section<N> {
    pub heading_text: String,
    pub date: NaiveDate,
    pub members: Vec<N>,
}

#[derive(Debug, Clone)]
pub struct SectionScan<N> {
    pub sections: Vec<Section<N>>,
    /// Headings that do not look like dates ("Activity", "Filters", ...).
    pub non_date_headings: usize,
    /// Date-looking headings that could not be parsed.
    pub undated_headings: usize,
}

/// Scan headings in document order and resolve each date section.
pub fn discover_sections<N: DocNode>(root: N, layout: &PageLayout, today: NaiveDate) -> SectionScan<N> {
    let mut scan = SectionScan {
        sections: Vec::new(),
        non_date_headings: 0,
        undated_headings: 0,
    };

    let headings = root
        .descendant_nodes()
        .into_iter()
        .filter(|n| layout.is_heading(n.tag_name()));

    for heading in headings {
        let heading_text = heading.inner_text();
        if !is_date_heading(&heading_text) {
            debug!(heading = %heading_text, "skipping non-date heading");
            scan.non_date_headings += 1;
            continue;
        }

        let Some(date) = resolve_heading_date(&heading_text, today) else {
            warn!(heading = %heading_text, "could not parse section date; skipping section");
            scan.undated_headings += 1;
            continue;
        };

        let members = section_members(heading, layout);
        debug!(heading = %heading_text, %date, members = members.len(), "section");
        scan.sections.push(Section {
            heading_text,
            date,
            members,
        });
    }

    scan
}

fn section_members<N: DocNode>(heading: N, layout: &PageLayout) -> Vec<N> {
    let mut members = Vec::new();
    let mut sibling = heading.next_sibling_node();
    while let Some(node) = sibling {
        if layout.is_heading(node.tag_name()) {
            break;
        }
        members.push(node);
        sibling = node.next_sibling_node();
    }
    members
}

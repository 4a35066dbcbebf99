//! Row location: from an amount field up to the container of one transaction.

use crate::dom::{DocNode, MarkerRule};
use crate::layout::PageLayout;

/// Finds the row that owns an amount field.
///
/// `boundary` is the section member the candidate was found in; a locator
/// must not return anything above it.
pub trait RowLocator {
    fn locate<N: DocNode>(&self, candidate: N, boundary: N) -> Option<N>;
}

/// Walk up from the candidate's parent, at most `max_ascent` levels and never
/// onto the section member, and take the first ancestor holding `min_fields`
/// marker fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedAscent {
    pub marker: MarkerRule,
    pub max_ascent: usize,
    pub min_fields: usize,
}

impl BoundedAscent {
    pub fn from_layout(layout: &PageLayout) -> Self {
        Self {
            marker: layout.marker.clone(),
            max_ascent: layout.max_ascent,
            min_fields: layout.min_row_fields,
        }
    }

    fn is_row<N: DocNode>(&self, node: &N) -> bool {
        self.marker.count_within(node) >= self.min_fields
    }
}

impl RowLocator for BoundedAscent {
    fn locate<N: DocNode>(&self, candidate: N, boundary: N) -> Option<N> {
        if candidate.same_node(&boundary) {
            return None;
        }

        // The member itself is never a row; the highest row is one of its children.
        let mut current = candidate.parent_node()?;
        for _ in 0..self.max_ascent {
            if current.same_node(&boundary) {
                return None;
            }
            if self.is_row(&current) {
                return Some(current);
            }
            let parent = current.parent_node()?;
            if parent.same_node(&boundary) {
                return None;
            }
            current = parent;
        }
        None
    }
}

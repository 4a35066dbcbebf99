//! Page layout convention for the activity feed.
//!
//! ```text
//! <h2>Today</h2>
//! <div>                                   section member
//!   <div>                                 row
//!     <p data-fs-privacy-rule="unmask">Coffee Shop</p>
//!     <p data-fs-privacy-rule="unmask">-$4.50</p>
//!   </div>
//! </div>
//! <h2>October 14</h2>
//! ```

use activity_core::MinusGlyphs;
use serde::{Deserialize, Serialize};

use crate::dom::MarkerRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Element that opens a date section.
    pub heading_tag: String,
    /// Any of these in a marker field's text makes it an amount candidate.
    pub currency_indicators: Vec<String>,
    /// Rows whose text contains this are skipped.
    pub pending_marker: String,
    /// How many ancestors above an amount field may be tried as its row.
    pub max_ascent: usize,
    /// Marker fields a container needs before it counts as a row.
    pub min_row_fields: usize,
    pub minus_glyphs: MinusGlyphs,
    /// Fields holding payee/amount text.
    pub marker: MarkerRule,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            heading_tag: "h2".to_string(),
            currency_indicators: vec!["$".to_string(), "CAD".to_string()],
            pending_marker: "Pending".to_string(),
            max_ascent: 5,
            min_row_fields: 2,
            minus_glyphs: MinusGlyphs::default(),
            marker: MarkerRule::default(),
        }
    }
}

impl PageLayout {
    pub fn is_heading(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(&self.heading_tag)
    }
}

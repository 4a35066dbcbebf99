//! Tree abstraction over a rendered page.
//!
//! Only element nodes are visible; text nodes are folded into
//! [`DocNode::inner_text`]. The `scraper` adapter is the one used for saved
//! pages; anything else that can answer these questions can be walked too.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

pub trait DocNode: Copy {
    fn parent_node(&self) -> Option<Self>;
    fn child_nodes(&self) -> Vec<Self>;
    fn next_sibling_node(&self) -> Option<Self>;
    /// Lowercase element name.
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    /// Rendered text with whitespace runs collapsed to single spaces.
    fn inner_text(&self) -> String;
    /// Element descendants in document order, excluding `self`.
    fn descendant_nodes(&self) -> Vec<Self>;
    fn same_node(&self, other: &Self) -> bool;
}

impl<'a> DocNode for ElementRef<'a> {
    fn parent_node(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn next_sibling_node(&self) -> Option<Self> {
        self.next_siblings().find_map(ElementRef::wrap)
    }

    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn inner_text(&self) -> String {
        collapse_whitespace(self.text())
    }

    fn descendant_nodes(&self) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn same_node(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

fn collapse_whitespace<'t>(pieces: impl Iterator<Item = &'t str>) -> String {
    let mut out = String::new();
    for word in pieces.flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Marks a text field the page renders unredacted, e.g.
/// `<p data-fs-privacy-rule="unmask">`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerRule {
    pub tag: String,
    pub attribute: String,
    pub value: String,
}

impl Default for MarkerRule {
    fn default() -> Self {
        Self {
            tag: "p".to_string(),
            attribute: "data-fs-privacy-rule".to_string(),
            value: "unmask".to_string(),
        }
    }
}

impl MarkerRule {
    pub fn matches<N: DocNode>(&self, node: &N) -> bool {
        node.tag_name().eq_ignore_ascii_case(&self.tag)
            && node.attribute(&self.attribute) == Some(self.value.as_str())
    }

    /// Marker fields strictly below `node`, in document order.
    pub fn fields_within<N: DocNode>(&self, node: &N) -> Vec<N> {
        node.descendant_nodes()
            .into_iter()
            .filter(|n| self.matches(n))
            .collect()
    }

    pub fn count_within<N: DocNode>(&self, node: &N) -> usize {
        node.descendant_nodes()
            .iter()
            .filter(|n| self.matches(*n))
            .count()
    }
}

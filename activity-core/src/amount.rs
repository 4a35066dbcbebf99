//! Amount text normalization.
//!
//! Rendered amounts look like `-$4.50`, `−$12.34`, `$2,000.00`, `($12.34)`
//! or `- $14.05 CAD`. The sign is kept; everything else that is not a digit,
//! decimal point or minus sign is dropped.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// MINUS SIGN, EN DASH, EM DASH, FIGURE DASH, SMALL and FULLWIDTH HYPHEN-MINUS.
const DEFAULT_GLYPHS: &str = "\u{2212}\u{2013}\u{2014}\u{2012}\u{FE63}\u{FF0D}";

/// Characters rendered in place of an ASCII `-` on negative amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinusGlyphs(String);

impl MinusGlyphs {
    pub fn new(glyphs: impl Into<String>) -> Self {
        Self(glyphs.into())
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(c)
    }
}

impl Default for MinusGlyphs {
    fn default() -> Self {
        Self(DEFAULT_GLYPHS.to_string())
    }
}

fn leading_decimal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").expect("static regex"))
}

/// Normalize rendered amount text into a signed number.
///
/// Returns `None` when nothing numeric survives stripping.
pub fn normalize_amount(text: &str, glyphs: &MinusGlyphs) -> Option<f64> {
    let trimmed = text.trim();
    let parenthesized = trimmed.starts_with('(') && trimmed.ends_with(')');

    let cleaned: String = trimmed
        .chars()
        .map(|c| if glyphs.contains(c) { '-' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    // Like the browser's parseFloat: read the longest numeric prefix.
    let prefix = leading_decimal_re().find(&cleaned)?.as_str();
    let mut value: f64 = prefix.parse().ok()?;
    if parenthesized && value > 0.0 {
        value = -value;
    }

    // -0 prints as "-0"; the export never shows a signed zero.
    if value == 0.0 {
        value = 0.0;
    }
    Some(value)
}

/// Shortest decimal text for an amount: `2000`, `-4.5`, `0.3`.
pub fn format_amount(value: f64) -> String {
    format!("{value}")
}

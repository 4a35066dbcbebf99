//! Section heading dates.
//!
//! Activity pages group rows under headings such as:
//!   Today
//!   Yesterday
//!   October 14
//!   Monday, October 14, 2024

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;

const TODAY: &str = "Today";
const YESTERDAY: &str = "Yesterday";

/// Formats tried once a year is present in the text.
const DATED_FORMATS: &[&str] = &[
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "mon", "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat", "sun",
];

fn date_like_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Today|Yesterday|[0-9]").expect("static regex"))
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{4}").expect("static regex"))
}

fn ordinal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("static regex"))
}

/// True for headings that can name a date: "Today", "Yesterday", or anything
/// with a digit. Category labels such as "Activity" are rejected.
pub fn is_date_heading(text: &str) -> bool {
    date_like_re().is_match(text)
}

/// Resolve a heading to a calendar date relative to `today`.
///
/// Text without a 4-digit year is placed in `today`'s year, even when that
/// puts a late-December heading into the following January's year.
pub fn resolve_heading_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.trim();
    if text.eq_ignore_ascii_case(TODAY) {
        return Some(today);
    }
    if text.eq_ignore_ascii_case(YESTERDAY) {
        return today.checked_sub_days(Days::new(1));
    }

    let cleaned = clean_heading(text);
    if cleaned.is_empty() {
        return None;
    }

    if year_re().is_match(text) {
        return parse_with(&cleaned, DATED_FORMATS);
    }

    // Yearless: borrow the current year.
    let year = today.year();
    if cleaned.contains('/') {
        return NaiveDate::parse_from_str(&format!("{cleaned}/{year}"), "%m/%d/%Y").ok();
    }
    parse_with(&format!("{cleaned} {year}"), DATED_FORMATS)
}

/// `YYYY-MM-DD`, zero padded.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` override (e.g. a pinned "today" for reproducible runs).
pub fn parse_iso_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

fn parse_with(s: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Drop punctuation, ordinal suffixes and a leading weekday.
fn clean_heading(text: &str) -> String {
    let no_commas = text.replace([',', '.'], " ");
    let no_ordinals = ordinal_re().replace_all(&no_commas, "$1");

    let mut tokens = no_ordinals.split_whitespace().peekable();
    let leading_weekday = tokens
        .peek()
        .is_some_and(|first| WEEKDAYS.contains(&first.to_ascii_lowercase().as_str()));
    if leading_weekday {
        tokens.next();
    }
    tokens.collect::<Vec<_>>().join(" ")
}

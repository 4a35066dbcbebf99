//! activity-core: record types and text normalization for activity exports

pub mod amount;
pub mod classify;
pub mod date;
pub mod record;
pub mod time;

pub use amount::{MinusGlyphs, format_amount, normalize_amount};
pub use classify::{RowStatus, is_amount_text};
pub use date::{format_iso, is_date_heading, parse_iso_date, resolve_heading_date};
pub use record::{DedupKey, Insertion, Record, RecordSet};
pub use time::today_in;

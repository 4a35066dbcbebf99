//! activity-ingest: walk a rendered activity page and pull out settled transactions.

pub mod dom;
pub mod extract;
pub mod layout;
pub mod locate;
pub mod sections;

pub use dom::{DocNode, MarkerRule};
pub use extract::{Extraction, ExtractionReport, Extractor};
pub use layout::PageLayout;
pub use locate::{BoundedAscent, RowLocator};
pub use sections::{Section, SectionScan, discover_sections};

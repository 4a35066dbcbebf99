//! activity-export: CSV serialization, download sinks and the "nothing found" notice

pub mod csv_writer;
pub mod deliver;
pub mod notice;
pub mod sink;

pub use csv_writer::{CSV_HEADER, escape_payee, to_csv};
pub use deliver::{ExportOutcome, deliver};
pub use notice::{NO_TRANSACTIONS_NOTICE, Notifier, StderrNotifier};
pub use sink::{Delivered, Download, DownloadSink, EXPORT_FILENAME, EXPORT_MIME, FileSink, WriterSink};

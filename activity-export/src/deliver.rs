//! Final step of an export run.

use activity_core::Record;
use anyhow::Result;
use tracing::info;

use crate::csv_writer::to_csv;
use crate::notice::{NO_TRANSACTIONS_NOTICE, Notifier};
use crate::sink::{Delivered, Download, DownloadSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Delivered(Delivered),
    /// Nothing qualified; the notice was raised and the sink was not touched.
    NoTransactions,
}

/// Serialize `records` and hand them to `sink` as `filename`, or raise the
/// "no transactions" notice when there are none.
pub fn deliver<S, N>(records: &[Record], filename: &str, sink: &mut S, notifier: &mut N) -> Result<ExportOutcome>
where
    S: DownloadSink,
    N: Notifier,
{
    if records.is_empty() {
        notifier.notify(NO_TRANSACTIONS_NOTICE);
        return Ok(ExportOutcome::NoTransactions);
    }

    let bytes = to_csv(records)?;
    let download = Download::csv(filename, bytes);
    let delivered = sink.deliver(&download)?;
    info!(records = records.len(), filename, "export delivered");
    Ok(ExportOutcome::Delivered(delivered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{EXPORT_FILENAME, WriterSink};
    use chrono::NaiveDate;

    #[derive(Default)]
    struct Recorded(Vec<String>);

    impl Notifier for Recorded {
        fn notify(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    #[test]
    fn test_no_records_raises_notice_and_skips_sink() {
        let mut sink = WriterSink::new(Vec::new());
        let mut notices = Recorded::default();
        let outcome = deliver(&[], EXPORT_FILENAME, &mut sink, &mut notices).unwrap();

        assert_eq!(outcome, ExportOutcome::NoTransactions);
        assert_eq!(notices.0, vec![NO_TRANSACTIONS_NOTICE.to_string()]);
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_records_go_to_sink_without_notice() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let records = vec![Record::new(date, "Coffee Shop", -4.5)];
        let mut sink = WriterSink::new(Vec::new());
        let mut notices = Recorded::default();

        let outcome = deliver(&records, EXPORT_FILENAME, &mut sink, &mut notices).unwrap();
        assert!(matches!(outcome, ExportOutcome::Delivered(Delivered::Stream { .. })));
        assert!(notices.0.is_empty());
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "Date,Payee,Amount\n2026-10-17,\"Coffee Shop\",-4.5\n"
        );
    }
}

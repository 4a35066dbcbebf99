//! User-facing notices.

pub const NO_TRANSACTIONS_NOTICE: &str = "No completed transactions found.\n\nTip: Scroll down to load more transactions before saving the page.";

pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Prints notices to stderr, leaving stdout for exported data.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

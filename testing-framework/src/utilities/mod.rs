// Shared utilities for the testing framework

/// Generated test account names
pub mod names;

/// Terminal progress display with a CI no-op fallback
pub mod progress;

pub use names::random_account_name;
pub use progress::{is_ci, pause, progress_bar, NullProgress, ProgressReporter, TermProgress};

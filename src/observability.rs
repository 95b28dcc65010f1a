//! Structured logging setup.
//!
//! Every pipeline stage takes a `slog::Logger` and emits key-value records
//! (columns swept, thresholds, classifiers found, frontier and ensemble
//! sizes). This module builds the two loggers the crate hands out:
//!
//! - [`term_logger`]: non-blocking terminal output (`slog-term` formatted,
//!   drained through `slog-async`), used when `ModelOptions::verbose` is set.
//! - [`discard_logger`]: drops every record; the default for library use and
//!   tests.
use slog::{Discard, Drain, Logger, o};

/// Terminal logger with an asynchronous drain.
///
/// Records are formatted by `slog_term::FullFormat` on a background thread;
/// the thread is flushed when the last clone of the logger is dropped.
pub fn term_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => env!("CARGO_PKG_NAME")))
}

/// Logger that discards every record.
pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}

/// [`term_logger`] when `verbose`, [`discard_logger`] otherwise.
pub fn logger(verbose: bool) -> Logger {
    if verbose { term_logger() } else { discard_logger() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::info;

    #[test]
    // Purpose
    // -------
    // Both loggers accept records without panicking.
    fn loggers_accept_records() {
        info!(discard_logger(), "quiet"; "n" => 1);
        info!(logger(true), "visible"; "n" => 2);
    }
}

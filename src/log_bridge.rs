//! Routes records from the `log` facade into [`LogRecord`]s.
//!
//! Libraries that log through `log::info!` and friends end up in the same
//! stream, with the same header and the same threshold, as lines written with
//! [`log!`](crate::log).
//!
//! ```rust,ignore
//! basic_logger::init_log_bridge().unwrap();
//! log::warn!("disk {}% full", 93);
//! // [WARN][2024-05-17 09:41:07][src/main.rs:4]: disk 93% full
//! ```

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::level_gate;
use crate::log_record::LogRecord;
use crate::severity::Severity;

/// A `log::Log` implementation backed by the process-wide gate.
///
/// `log`'s `TRACE` and `DEBUG` both map to [`Severity::Debug`]. The call
/// site's file and line come from the `log` record; when the macro did not
/// capture a file the target is used instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        level_gate::global().is_enabled(Severity::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        let file = record.file().unwrap_or_else(|| record.target());
        let mut entry = LogRecord::new(
            Severity::from(record.level()),
            file,
            record.line().unwrap_or(0),
        );
        entry.append(*record.args());
    }

    fn flush(&self) {}
}

static LOG_BRIDGE: LogBridge = LogBridge;

/// Installs [`LogBridge`] as the `log` crate's global logger.
///
/// Filtering stays with the [`LevelGate`](crate::LevelGate), so `log`'s own
/// maximum level is opened fully.
///
/// # Errors
///
/// Fails if another `log` logger was installed first.
pub fn init_log_bridge() -> Result<(), SetLoggerError> {
    log::set_logger(&LOG_BRIDGE)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

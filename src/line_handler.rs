use std::io::{self, Write};
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

/// Destination for finished log lines.
///
/// A [`LogRecord`](crate::LogRecord) hands its text to the installed handler
/// exactly once, when it is dropped. The default handler is [`StderrHandler`];
/// replacing it with [`set_line_handler`] is how tests capture output.
///
/// # Usage
///
/// ```
/// # use basic_logger::LineHandler;
/// # use std::sync::Mutex;
/// // Keeps every line in memory
/// struct Collecting(Mutex<Vec<String>>);
///
/// impl LineHandler for Collecting {
///     fn write_line(&self, line: &str) {
///         self.0.lock().unwrap().push(line.to_owned());
///     }
/// }
/// ```
pub trait LineHandler: Send + Sync {
    /// Writes one finished line.
    ///
    /// `line` already ends with its `\n` terminator, so a handler backed by a
    /// stream can emit it with a single write call.
    fn write_line(&self, line: &str);
}

/// Writes lines to the process's standard error stream.
///
/// The stream is locked for the duration of one `write_all`, so lines from
/// threads of this process do not interleave. Write failures are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrHandler;

impl LineHandler for StderrHandler {
    fn write_line(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
    }
}

lazy_static! {
    /// The handler every enabled record is flushed to.
    static ref LINE_HANDLER: RwLock<Arc<dyn LineHandler>> = RwLock::new(Arc::new(StderrHandler));
}

/// Installs `handler` as the destination for all subsequent lines and returns
/// the handler it replaced.
///
/// There is a single destination per process; this is a seam for capturing
/// output, not a way to fan lines out to several sinks.
pub fn set_line_handler(handler: Arc<dyn LineHandler>) -> Arc<dyn LineHandler> {
    std::mem::replace(&mut *LINE_HANDLER.write(), handler)
}

/// Restores the standard error handler.
pub fn reset_line_handler() {
    *LINE_HANDLER.write() = Arc::new(StderrHandler);
}

/// Sends a finished line to the installed handler.
pub(crate) fn emit(line: &str) {
    let handler = LINE_HANDLER.read().clone();
    handler.write_line(line);
}

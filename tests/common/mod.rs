#![allow(dead_code)]

use std::sync::Arc;

use basic_logger::{current_threshold, set_line_handler, set_threshold, LineHandler, Severity};
use lazy_static::lazy_static;
use parking_lot::{Mutex, MutexGuard};

lazy_static! {
    /// Tests that touch the global threshold or handler run one at a time.
    static ref SERIAL: Mutex<()> = Mutex::new(());
}

/// Keeps every line it receives, terminator included.
#[derive(Default)]
pub struct CollectingHandler {
    lines: Mutex<Vec<String>>,
}

impl LineHandler for CollectingHandler {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }
}

/// Captures output for the duration of a test and restores the global
/// handler and threshold afterwards.
pub struct Capture {
    handler: Arc<CollectingHandler>,
    previous_handler: Arc<dyn LineHandler>,
    previous_threshold: Severity,
    _serial: MutexGuard<'static, ()>,
}

impl Capture {
    pub fn start() -> Self {
        Self::with_threshold(Severity::Debug)
    }

    pub fn with_threshold(threshold: Severity) -> Self {
        let serial = SERIAL.lock();
        let handler = Arc::new(CollectingHandler::default());
        let previous_handler = set_line_handler(handler.clone());
        let previous_threshold = current_threshold();
        set_threshold(threshold);

        Self {
            handler,
            previous_handler,
            previous_threshold,
            _serial: serial,
        }
    }

    /// Raw lines as handed to the handler.
    pub fn raw_lines(&self) -> Vec<String> {
        self.handler.lines.lock().clone()
    }

    /// Lines without their terminator.
    pub fn lines(&self) -> Vec<String> {
        self.raw_lines()
            .into_iter()
            .map(|line| line.trim_end_matches('\n').to_owned())
            .collect()
    }

    /// What follows the `[...][...][...]:` header of each line.
    pub fn bodies(&self) -> Vec<String> {
        self.lines().iter().map(|line| body_of(line).to_owned()).collect()
    }

    /// The body of the only captured line.
    pub fn single_body(&self) -> String {
        let bodies = self.bodies();
        assert_eq!(bodies.len(), 1, "expected exactly one line, got {:?}", bodies);
        bodies[0].clone()
    }

    pub fn clear(&self) {
        self.handler.lines.lock().clear();
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        set_threshold(self.previous_threshold);
        set_line_handler(self.previous_handler.clone());
    }
}

pub fn body_of(line: &str) -> &str {
    match line.split_once("]:") {
        Some((_, rest)) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

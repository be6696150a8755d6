//! # Basic Logger
//!
//! A small process-local logger that writes leveled, timestamped lines tagged
//! with their call site to standard error:
//!
//! ```text
//! [WARN][2024-05-17 09:41:07][src/main.rs:12]: This is a warning message false
//! ```
//!
//! ## Key Features
//!
//! * Zero work for filtered lines: a record below the threshold never reads the
//!   clock, never allocates and never runs a value's formatter
//! * Stream-like records: values are appended one by one and the line is
//!   written exactly once, when the record goes out of scope
//! * Open formatting: any type can be logged by implementing [`Loggable`];
//!   containers, optionals, pairs, durations and timestamps are built in
//! * Lock-free threshold shared by every thread
//!
//! ## Main Components
//!
//! * [`LogRecord`]: one line under construction
//! * [`log!`]: creates a record for the caller's file and line
//! * [`LevelGate`]: the process-wide minimum [`Severity`]
//! * [`Loggable`]: the formatter trait
//! * [`LineHandler`]: where finished lines go (standard error by default)
//! * [`LogBridge`] and [`RecordLayer`]: adapters for the `log` and `tracing` facades
//!
//! ## Quick Start
//!
//! ```
//! use basic_logger::{log, set_threshold, Severity};
//! use std::collections::BTreeMap;
//!
//! set_threshold(Severity::Info);
//!
//! log!(INFO, "This is an info", 11, "message", 3.14555);
//! log!(DEBUG, "This debug message will not be shown");
//! log!(WARN).append("This is a warning message").append(false);
//!
//! let scores = BTreeMap::from([("key1", 1), ("key2", 2)]);
//! log!(ERROR, "scores", &scores, (1, 2), Some(42));
//! // ... scores BTreeMap{key1:1,key2:2} pair{1,2} optional{42}
//! # set_threshold(Severity::Debug);
//! ```

pub mod level_gate;
pub mod line_handler;
pub mod local_clock;
pub mod log_bridge;
pub mod log_record;
pub mod loggable;
pub mod severity;
pub mod tracing_bridge;
pub mod units;

pub use level_gate::{current_threshold, set_threshold, LevelGate, ThresholdGuard};
pub use line_handler::{reset_line_handler, set_line_handler, LineHandler, StderrHandler};
pub use log_bridge::{init_log_bridge, LogBridge};
pub use log_record::LogRecord;
pub use loggable::{Debugged, Displayed, Loggable, NoSpace, Null, Nullopt};
pub use severity::{ParseSeverityError, Severity};
pub use tracing_bridge::{init_tracing, RecordLayer};

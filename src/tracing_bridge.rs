//! Bridge from `tracing` events to [`LogRecord`]s.
//!
//! [`RecordLayer`] is a `tracing-subscriber` layer: every event that passes
//! the process-wide gate becomes one line, with the event's message first and
//! its other fields appended as `name=value` fragments.
//!
//! ```rust,ignore
//! basic_logger::init_tracing().unwrap();
//! tracing::info!(attempt = 3, "connecting");
//! // [INFO][2024-05-17 09:41:07][src/main.rs:4]: connecting attempt=3
//! ```

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::util::TryInitError;

use crate::level_gate;
use crate::log_record::LogRecord;
use crate::loggable::NoSpace;
use crate::severity::Severity;

/// A tracing layer that writes events through [`LogRecord`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordLayer;

impl RecordLayer {
    /// Creates the layer.
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RecordLayer
where
    S: Subscriber,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // The threshold can change at any time, so never cache a decision.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        level_gate::global().is_enabled(Severity::from(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut record = LogRecord::new(
            Severity::from(metadata.level()),
            metadata.file().unwrap_or_else(|| metadata.target()),
            metadata.line().unwrap_or(0),
        );
        if !record.is_enabled() {
            return;
        }
        event.record(&mut FieldVisitor { record: &mut record });
    }
}

/// Appends event fields to a record in the order tracing reports them.
struct FieldVisitor<'a> {
    record: &'a mut LogRecord,
}

impl FieldVisitor<'_> {
    fn append_named(&mut self, field: &Field) {
        self.record.append(field.name()).append(NoSpace).append("=").append(NoSpace);
    }
}

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() != "message" {
            self.append_named(field);
        }
        self.record.append(value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.append_named(field);
        self.record.append(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.append_named(field);
        self.record.append(value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.append_named(field);
        self.record.append(value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.append_named(field);
        self.record.append(value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() != "message" {
            self.append_named(field);
        }
        self.record.append(format_args!("{:?}", value));
    }
}

/// Installs a `tracing` registry whose only layer is [`RecordLayer`].
///
/// With `tracing-subscriber`'s default features this also captures the `log`
/// facade, so a program calls either this or
/// [`init_log_bridge`](crate::init_log_bridge), not both.
///
/// # Errors
///
/// Fails if a global default subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry().with(RecordLayer::new()).try_init()
}

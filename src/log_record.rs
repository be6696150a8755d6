use std::fmt::{self, Write};

use crate::level_gate::{self, LevelGate};
use crate::line_handler;
use crate::local_clock;
use crate::loggable::Loggable;
use crate::severity::Severity;

/// One log line under construction.
///
/// A record is created by the [`log!`](crate::log) macro (or [`LogRecord::new`]),
/// collects fragments through chained [`append`](LogRecord::append) calls and
/// writes its line when it is dropped, which for the macro form is the end of
/// the statement.
///
/// Whether the record is enabled is decided once, when it is created, by
/// comparing its severity with the threshold of a [`LevelGate`]. A disabled
/// record owns no buffer: it never reads the clock, never allocates and never
/// calls a value's formatter. Changing the threshold while a record is being
/// built does not change whether that record is written.
///
/// # Line format
///
/// ```text
/// [<SEVERITY>][YYYY-MM-DD HH:MM:SS][<file>:<line>]: fragment fragment ...
/// ```
///
/// Fragments are separated by a single space. A formatter can glue its next
/// fragment to the previous one with [`no_space`](LogRecord::no_space), which
/// is how `Vec{1,2,3}` keeps its name attached to the opening brace.
///
/// # Ownership
///
/// The record owns its buffer and is neither `Clone` nor `Copy`. Moving it is
/// allowed; only the final owner's drop writes the line, so a line is written
/// exactly once.
///
/// # Examples
///
/// ```
/// use basic_logger::{log, LogRecord, Severity};
///
/// log!(INFO).append("temperature").append(21.5).append(true);
/// log!(WARN, "retrying in", basic_logger::units::Seconds(3));
///
/// // Built by hand, against an explicit gate
/// let gate = basic_logger::LevelGate::new(Severity::Error);
/// let record = LogRecord::with_gate(&gate, Severity::Info, file!(), line!());
/// assert!(!record.is_enabled());
/// ```
#[derive(Debug)]
pub struct LogRecord {
    severity: Option<Severity>,
    buffer: Option<String>,
    suppress_next_separator: bool,
}

impl LogRecord {
    /// Creates a record checked against the process-wide gate.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity of the line
    /// * `file` - Source file of the call site
    /// * `line` - Line number of the call site
    #[inline]
    pub fn new(severity: Severity, file: &str, line: u32) -> Self {
        Self::with_gate(level_gate::global(), severity, file, line)
    }

    /// Creates a record checked against `gate` instead of the global one.
    pub fn with_gate(gate: &LevelGate, severity: Severity, file: &str, line: u32) -> Self {
        if !gate.is_enabled(severity) {
            return Self::disabled();
        }

        let header = format!(
            "[{}][{}][{}:{}]:",
            severity.as_str(),
            local_clock::now(),
            file,
            line
        );

        Self {
            severity: Some(severity),
            buffer: Some(header),
            suppress_next_separator: false,
        }
    }

    /// Creates a record that never writes anything.
    #[inline]
    pub const fn disabled() -> Self {
        Self {
            severity: None,
            buffer: None,
            suppress_next_separator: false,
        }
    }

    /// Returns `true` if this record will be written when dropped.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.buffer.is_some()
    }

    /// Severity of an enabled record, `None` for a disabled one.
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// Text accumulated so far, without the line terminator.
    pub fn text(&self) -> Option<&str> {
        self.buffer.as_deref()
    }

    /// Appends a value.
    ///
    /// On a disabled record this returns immediately; `value`'s formatter is
    /// not invoked.
    ///
    /// # Examples
    ///
    /// ```
    /// # use basic_logger::log;
    /// let ids = vec![3, 5, 8];
    /// log!(DEBUG).append("ids").append(&ids).append(Some("done"));
    /// ```
    #[inline]
    pub fn append<T: Loggable>(&mut self, value: T) -> &mut Self {
        if self.buffer.is_some() {
            value.log_to(self);
        }
        self
    }

    /// Writes the next fragment without a leading separator.
    #[inline]
    pub fn no_space(&mut self) -> &mut Self {
        if self.buffer.is_some() {
            self.suppress_next_separator = true;
        }
        self
    }

    /// Appends `value` glued to the previous fragment.
    #[inline]
    pub fn glued<T: Loggable>(&mut self, value: T) -> &mut Self {
        self.no_space().append(value)
    }

    /// Writes one fragment of text.
    ///
    /// This is the primitive formatters build on: a single space is written
    /// first unless the previous call asked for [`no_space`](Self::no_space).
    pub fn write_fragment(&mut self, text: &str) -> &mut Self {
        if let Some(buffer) = self.begin_fragment() {
            buffer.push_str(text);
        }
        self
    }

    /// Writes one fragment from format arguments.
    ///
    /// A `Display` implementation that reports an error here panics, exactly as
    /// `ToString::to_string` would.
    pub fn write_fragment_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        if let Some(buffer) = self.begin_fragment() {
            buffer
                .write_fmt(args)
                .expect("a Display implementation returned an error unexpectedly");
        }
        self
    }

    /// Renders `items` as `name{item,item,...}`.
    ///
    /// Items are written in iteration order, comma separated, with no spaces
    /// inside the braces.
    ///
    /// # Examples
    ///
    /// ```
    /// # use basic_logger::{LevelGate, LogRecord, Severity};
    /// let gate = LevelGate::default();
    /// let mut record = LogRecord::with_gate(&gate, Severity::Info, "main.rs", 1);
    /// record.log_sequence("seq", [1, 2, 3]);
    /// assert!(record.text().unwrap().ends_with(" seq{1,2,3}"));
    /// ```
    pub fn log_sequence<I>(&mut self, name: &str, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Loggable,
    {
        if self.buffer.is_none() {
            return self;
        }

        self.write_fragment(name).no_space().write_fragment("{");
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                self.no_space().write_fragment(",");
            }
            self.glued(item);
        }
        self.no_space().write_fragment("}")
    }

    /// Renders `entries` as `name{key:value,key:value,...}` in iteration order.
    pub fn log_mapping<I, K, V>(&mut self, name: &str, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Loggable,
        V: Loggable,
    {
        if self.buffer.is_none() {
            return self;
        }

        self.write_fragment(name).no_space().write_fragment("{");
        for (index, (key, value)) in entries.into_iter().enumerate() {
            if index > 0 {
                self.no_space().write_fragment(",");
            }
            self.glued(key).no_space().write_fragment(":").glued(value);
        }
        self.no_space().write_fragment("}")
    }

    /// Takes the text out so that dropping the record writes nothing.
    #[cfg(test)]
    pub(crate) fn take_text(&mut self) -> Option<String> {
        self.buffer.take()
    }

    /// Consumes the pending separator and returns the buffer to write into.
    fn begin_fragment(&mut self) -> Option<&mut String> {
        let buffer = self.buffer.as_mut()?;
        if self.suppress_next_separator {
            self.suppress_next_separator = false;
        } else {
            buffer.push(' ');
        }
        Some(buffer)
    }
}

impl Drop for LogRecord {
    fn drop(&mut self) {
        if let Some(mut line) = self.buffer.take() {
            line.push('\n');
            line_handler::emit(&line);
        }
    }
}

/// Creates a [`LogRecord`] for the calling file and line.
///
/// The level is a [`Severity`](crate::Severity) variant or its uppercase alias.
///
/// * `log!(LEVEL)` evaluates to a record; chain [`append`](LogRecord::append)
///   calls on it and the line is written at the end of the statement.
/// * `log!(LEVEL, a, b, ...)` appends each value and writes the line at once.
///
/// Value expressions are always evaluated, but on a disabled record their
/// formatters never run. Work that should be skipped belongs inside a
/// [`Loggable`] implementation.
///
/// # Examples
///
/// ```
/// use basic_logger::{log, set_threshold, Severity};
///
/// set_threshold(Severity::Info);
/// log!(DEBUG, "not shown");
/// log!(INFO, "This is an info", 11, "message", 3.14555);
/// log!(Warn).append("This is a warning message").append(false);
/// # set_threshold(Severity::Debug);
/// ```
#[macro_export]
macro_rules! log {
    ($level:ident) => {
        $crate::LogRecord::new($crate::Severity::$level, file!(), line!())
    };
    ($level:ident, $($value:expr),+ $(,)?) => {{
        let mut record = $crate::LogRecord::new($crate::Severity::$level, file!(), line!());
        $( record.append($value); )+
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counted<'a>(&'a Cell<usize>);

    impl Loggable for Counted<'_> {
        fn log_to(&self, record: &mut LogRecord) {
            self.0.set(self.0.get() + 1);
            record.write_fragment("counted");
        }
    }

    fn enabled_record() -> LogRecord {
        LogRecord::with_gate(&LevelGate::default(), Severity::Info, "lib.rs", 7)
    }

    fn finish(mut record: LogRecord) -> String {
        record.take_text().unwrap_or_default()
    }

    #[test]
    fn test_header_layout() {
        let text = finish(enabled_record());
        assert!(text.starts_with("[INFO]["));
        assert!(text.ends_with("][lib.rs:7]:"));
        // [INFO][YYYY-MM-DD HH:MM:SS][lib.rs:7]:
        assert_eq!(text.len(), "[INFO][".len() + 19 + "][lib.rs:7]:".len());
    }

    #[test]
    fn test_fragments_are_space_separated() {
        let mut record = enabled_record();
        record.append("a").append(1).append(2.5);
        assert!(finish(record).ends_with("]: a 1 2.5"));
    }

    #[test]
    fn test_no_space_glues_one_fragment() {
        let mut record = enabled_record();
        record.append("a").no_space().append("b").append("c");
        assert!(finish(record).ends_with("]: ab c"));
    }

    #[test]
    fn test_disabled_record_skips_formatting() {
        let calls = Cell::new(0);
        let gate = LevelGate::new(Severity::Error);
        let mut record = LogRecord::with_gate(&gate, Severity::Warn, "lib.rs", 1);
        record.append(Counted(&calls)).log_sequence("seq", [Counted(&calls)]);

        assert_eq!(calls.get(), 0);
        assert!(!record.is_enabled());
        assert_eq!(record.text(), None);
        assert_eq!(record.severity(), None);
    }

    #[test]
    fn test_enabled_record_runs_formatter_once() {
        let calls = Cell::new(0);
        let mut record = enabled_record();
        record.append(Counted(&calls));
        assert_eq!(calls.get(), 1);
        assert_eq!(record.severity(), Some(Severity::Info));
        assert!(finish(record).ends_with(" counted"));
    }

    #[test]
    fn test_threshold_latched_at_creation() {
        let gate = LevelGate::new(Severity::Info);
        let mut record = LogRecord::with_gate(&gate, Severity::Info, "lib.rs", 1);
        gate.set_threshold(Severity::Fatal);
        record.append("still here");
        assert!(record.is_enabled());
        assert!(finish(record).ends_with(" still here"));

        let late = LogRecord::with_gate(&gate, Severity::Debug, "lib.rs", 2);
        gate.set_threshold(Severity::Debug);
        assert!(!late.is_enabled());
    }

    #[test]
    fn test_empty_sequence_and_mapping() {
        let mut record = enabled_record();
        record
            .log_sequence("seq", Vec::<i32>::new())
            .log_mapping("map", Vec::<(i32, i32)>::new());
        assert!(finish(record).ends_with(" seq{} map{}"));
    }
}

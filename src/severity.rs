use std::fmt;
use std::str::FromStr;

/// Severity of a log line.
///
/// Severities are totally ordered, lowest first. The ordering drives the
/// enable/disable decision made by [`LevelGate`](crate::LevelGate): a record is
/// written only when its severity is at or above the current threshold.
///
/// The uppercase associated constants ([`Severity::INFO`] and friends) are
/// aliases of the variants so that call sites can read `log!(INFO)`.
///
/// # Examples
///
/// ```
/// # use basic_logger::Severity;
/// assert!(Severity::Debug < Severity::Fatal);
/// assert_eq!(Severity::WARN, Severity::Warn);
/// assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
/// assert_eq!(Severity::Info.to_string(), "INFO");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    pub const DEBUG: Severity = Severity::Debug;
    pub const INFO: Severity = Severity::Info;
    pub const WARN: Severity = Severity::Warn;
    pub const ERROR: Severity = Severity::Error;
    pub const FATAL: Severity = Severity::Fatal;

    /// Every severity, in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Returns the name printed in the line header.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Inverse of `self as u8`. Out-of-range values saturate to `Fatal`.
    pub(crate) const fn from_u8(value: u8) -> Severity {
        match value {
            0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}`, expected one of DEBUG, INFO, WARN, ERROR, FATAL")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("warning").then_some(Severity::Warn))
            .ok_or_else(|| ParseSeverityError(s.to_owned()))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warn,
            log::Level::Error => Severity::Error,
        }
    }
}

impl From<&tracing::Level> for Severity {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

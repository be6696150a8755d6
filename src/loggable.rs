use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, TimeZone};

use crate::local_clock;
use crate::log_record::LogRecord;
use crate::severity::Severity;

/// A type that can be appended to a [`LogRecord`].
///
/// `log_to` is only called on enabled records, so an implementation may do as
/// much work as it likes: it costs nothing when the line is filtered out.
/// Implementations write through [`LogRecord::write_fragment`] and friends;
/// adding a new type never requires touching `LogRecord` itself.
///
/// # Examples
///
/// ```
/// use basic_logger::{LevelGate, LogRecord, Loggable, Severity};
///
/// struct Celsius(f32);
///
/// impl Loggable for Celsius {
///     fn log_to(&self, record: &mut LogRecord) {
///         record.write_fragment_fmt(format_args!("{:.1}C", self.0));
///     }
/// }
///
/// let gate = LevelGate::default();
/// let mut record = LogRecord::with_gate(&gate, Severity::Info, "main.rs", 3);
/// record.append("temp").append(Celsius(21.25));
/// assert!(record.text().unwrap().ends_with("temp 21.2C"));
/// ```
pub trait Loggable {
    /// Writes this value's representation into `record`.
    fn log_to(&self, record: &mut LogRecord);
}

/// Appends nothing and glues the next fragment to the previous one.
///
/// `log!(INFO).append("id=").append(NoSpace).append(7)` gives `id=7`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSpace;

/// The absent-value marker, rendered as `nullptr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

/// The empty-optional marker on its own, rendered as `nullopt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nullopt;

/// Renders any `Display` value with its natural text.
#[derive(Debug, Clone, Copy)]
pub struct Displayed<T>(pub T);

/// Renders any `Debug` value with `{:?}`.
#[derive(Debug, Clone, Copy)]
pub struct Debugged<T>(pub T);

impl Loggable for NoSpace {
    fn log_to(&self, record: &mut LogRecord) {
        record.no_space();
    }
}

impl Loggable for Null {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment("nullptr");
    }
}

impl Loggable for Nullopt {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment("nullopt");
    }
}

impl<T: fmt::Display> Loggable for Displayed<T> {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment_fmt(format_args!("{}", self.0));
    }
}

impl<T: fmt::Debug> Loggable for Debugged<T> {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment_fmt(format_args!("{:?}", self.0));
    }
}

macro_rules! display_loggable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Loggable for $ty {
                #[inline]
                fn log_to(&self, record: &mut LogRecord) {
                    record.write_fragment_fmt(format_args!("{}", self));
                }
            }
        )*
    };
}

display_loggable!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
);

impl Loggable for bool {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment(if *self { "true" } else { "false" });
    }
}

impl Loggable for str {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment(self);
    }
}

impl Loggable for String {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment(self);
    }
}

impl Loggable for Cow<'_, str> {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment(self);
    }
}

impl Loggable for fmt::Arguments<'_> {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment_fmt(*self);
    }
}

impl Loggable for Severity {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment(self.as_str());
    }
}

// Pointer-like wrappers forward to the value they hold.

impl<T: Loggable + ?Sized> Loggable for &T {
    #[inline]
    fn log_to(&self, record: &mut LogRecord) {
        (**self).log_to(record);
    }
}

impl<T: Loggable + ?Sized> Loggable for &mut T {
    #[inline]
    fn log_to(&self, record: &mut LogRecord) {
        (**self).log_to(record);
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn log_to(&self, record: &mut LogRecord) {
        (**self).log_to(record);
    }
}

impl<T: Loggable + ?Sized> Loggable for Rc<T> {
    fn log_to(&self, record: &mut LogRecord) {
        (**self).log_to(record);
    }
}

impl<T: Loggable + ?Sized> Loggable for Arc<T> {
    fn log_to(&self, record: &mut LogRecord) {
        (**self).log_to(record);
    }
}

impl<T: ?Sized> Loggable for *const T {
    fn log_to(&self, record: &mut LogRecord) {
        if self.is_null() {
            record.write_fragment("nullptr");
        } else {
            record.write_fragment_fmt(format_args!("{:p}", *self));
        }
    }
}

impl<T: ?Sized> Loggable for *mut T {
    fn log_to(&self, record: &mut LogRecord) {
        self.cast_const().log_to(record);
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn log_to(&self, record: &mut LogRecord) {
        match self {
            Some(value) => {
                record
                    .write_fragment("optional")
                    .no_space()
                    .write_fragment("{")
                    .glued(value)
                    .no_space()
                    .write_fragment("}");
            }
            None => {
                record.write_fragment("optional{ nullopt }");
            }
        }
    }
}

impl<A: Loggable, B: Loggable> Loggable for (A, B) {
    fn log_to(&self, record: &mut LogRecord) {
        record
            .write_fragment("pair")
            .no_space()
            .write_fragment("{")
            .glued(&self.0)
            .no_space()
            .write_fragment(",")
            .glued(&self.1)
            .no_space()
            .write_fragment("}");
    }
}

macro_rules! sequence_loggable {
    ($($name:literal => $container:ident),* $(,)?) => {
        $(
            impl<T: Loggable> Loggable for $container<T> {
                fn log_to(&self, record: &mut LogRecord) {
                    record.log_sequence($name, self.iter());
                }
            }
        )*
    };
}

sequence_loggable!(
    "Vec" => Vec,
    "VecDeque" => VecDeque,
    "LinkedList" => LinkedList,
    "BTreeSet" => BTreeSet,
);

impl<T: Loggable, S> Loggable for HashSet<T, S> {
    fn log_to(&self, record: &mut LogRecord) {
        record.log_sequence("HashSet", self.iter());
    }
}

impl<T: Loggable> Loggable for [T] {
    fn log_to(&self, record: &mut LogRecord) {
        record.log_sequence("slice", self.iter());
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn log_to(&self, record: &mut LogRecord) {
        record.log_sequence("array", self.iter());
    }
}

impl<K: Loggable, V: Loggable> Loggable for BTreeMap<K, V> {
    fn log_to(&self, record: &mut LogRecord) {
        record.log_mapping("BTreeMap", self.iter());
    }
}

/// Entries appear in the map's iteration order, which is unspecified.
impl<K: Loggable, V: Loggable, S> Loggable for HashMap<K, V, S> {
    fn log_to(&self, record: &mut LogRecord) {
        record.log_mapping("HashMap", self.iter());
    }
}

/// `std` durations carry no unit of their own, so they are shown in
/// nanoseconds, the finest unit they hold exactly. Use the types in
/// [`units`](crate::units) to log a count in a specific unit.
impl Loggable for Duration {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment_fmt(format_args!("{}nanoseconds", self.as_nanos()));
    }
}

/// Times `chrono` cannot represent fall back to `<n>seconds` since the Unix
/// epoch.
impl Loggable for SystemTime {
    fn log_to(&self, record: &mut LogRecord) {
        match local_clock::format_system_time(*self) {
            Some(stamp) => record.write_fragment_fmt(format_args!("{}", stamp)),
            None => record.write_fragment_fmt(format_args!(
                "{}seconds",
                local_clock::seconds_since_epoch(*self)
            )),
        };
    }
}

impl<Tz: TimeZone> Loggable for DateTime<Tz> {
    fn log_to(&self, record: &mut LogRecord) {
        record.write_fragment_fmt(format_args!("{}", local_clock::format_date_time(self)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level_gate::LevelGate;

    /// Renders one value on a fresh record and returns what follows the header.
    fn render<T: Loggable>(value: T) -> String {
        let gate = LevelGate::default();
        let mut record = LogRecord::with_gate(&gate, Severity::Debug, "test.rs", 1);
        record.append(value);
        let text = record.take_text().unwrap_or_default();
        text.split_once("]: ").map(|(_, body)| body.to_owned()).unwrap_or_default()
    }

    #[test]
    fn test_numbers_use_display() {
        assert_eq!(render(42), "42");
        assert_eq!(render(-7i64), "-7");
        assert_eq!(render(3.14555), "3.14555");
        assert_eq!(render('x'), "x");
    }

    #[test]
    fn test_bool_is_never_numeric() {
        assert_eq!(render(true), "true");
        assert_eq!(render(false), "false");
    }

    #[test]
    fn test_null_markers() {
        assert_eq!(render(Null), "nullptr");
        assert_eq!(render(std::ptr::null::<u8>()), "nullptr");
        assert_eq!(render(std::ptr::null_mut::<u8>()), "nullptr");
        assert_eq!(render(Nullopt), "nullopt");
        assert_eq!(render(None::<i32>), "optional{ nullopt }");

        let value = 5u8;
        assert!(render(&value as *const u8).starts_with("0x"));
    }

    #[test]
    fn test_strings() {
        assert_eq!(render("hello"), "hello");
        assert_eq!(render(String::from("owned")), "owned");
        assert_eq!(render(Cow::Borrowed("cow")), "cow");
        assert_eq!(render(format_args!("{}-{}", 1, 2)), "1-2");
    }

    #[test]
    fn test_adapters() {
        assert_eq!(render(Displayed(std::net::Ipv4Addr::LOCALHOST)), "127.0.0.1");
        assert_eq!(render(Debugged("quoted")), "\"quoted\"");
        assert_eq!(render(Box::new(1)), "1");
        assert_eq!(render(Arc::new("shared")), "shared");
    }
}

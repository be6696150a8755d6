//! Durations tagged with the unit they were measured in.
//!
//! `std::time::Duration` does not remember whether it was built from hours or
//! nanoseconds. These newtypes do, and render as `<count><unit>` with no unit
//! conversion: `Milliseconds(1000)` is logged as `1000milliseconds`, never as
//! `1seconds`.
//!
//! ```
//! use basic_logger::units::{Hours, Milliseconds};
//! use std::time::Duration;
//!
//! assert_eq!(Duration::from(Milliseconds(1500)), Duration::from_millis(1500));
//! assert_eq!(Hours(2).unit_name(), "hours");
//! ```

use std::time::Duration;

use crate::log_record::LogRecord;
use crate::loggable::Loggable;

macro_rules! duration_units {
    ($($(#[$doc:meta])* $unit:ident => $name:literal, $to_duration:expr;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
            pub struct $unit(pub u64);

            impl $unit {
                /// The unit name appended to the count.
                pub const fn unit_name(&self) -> &'static str {
                    $name
                }

                /// The number of whole units.
                pub const fn count(&self) -> u64 {
                    self.0
                }
            }

            impl From<$unit> for Duration {
                fn from(value: $unit) -> Duration {
                    let to_duration: fn(u64) -> Duration = $to_duration;
                    to_duration(value.0)
                }
            }

            impl Loggable for $unit {
                fn log_to(&self, record: &mut LogRecord) {
                    record.write_fragment_fmt(format_args!("{}{}", self.0, $name));
                }
            }
        )*
    };
}

duration_units! {
    /// A count of hours.
    Hours => "hours", |n| Duration::from_secs(n.saturating_mul(3600));
    /// A count of minutes.
    Minutes => "minutes", |n| Duration::from_secs(n.saturating_mul(60));
    /// A count of seconds.
    Seconds => "seconds", Duration::from_secs;
    /// A count of milliseconds.
    Milliseconds => "milliseconds", Duration::from_millis;
    /// A count of microseconds.
    Microseconds => "microseconds", Duration::from_micros;
    /// A count of nanoseconds.
    Nanoseconds => "nanoseconds", Duration::from_nanos;
}

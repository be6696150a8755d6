//! Local wall-clock rendering for line headers and timestamp values.
//!
//! Times are shown in the local time zone with second precision and no
//! offset, e.g. `2024-05-17 09:41:07`.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};

/// `strftime` pattern shared by every rendered timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A timestamp that is formatted only when displayed.
pub type LocalTimestamp = DelayedFormat<StrftimeItems<'static>>;

/// Returns the current local time, ready to be displayed.
///
/// # Examples
///
/// ```
/// # use basic_logger::local_clock;
/// let stamp = local_clock::now().to_string();
/// assert_eq!(stamp.len(), "YYYY-MM-DD HH:MM:SS".len());
/// ```
pub fn now() -> LocalTimestamp {
    Local::now().format(TIMESTAMP_FORMAT)
}

/// Renders a `SystemTime` in local time.
///
/// Returns `None` for times outside the range `chrono` can represent; see
/// [`seconds_since_epoch`] for a rendering that always succeeds.
pub fn format_system_time(time: SystemTime) -> Option<LocalTimestamp> {
    let (secs, nanos) = split_since_epoch(time)?;
    let utc = DateTime::<Utc>::from_timestamp(secs, nanos)?;
    Some(utc.with_timezone(&Local).format(TIMESTAMP_FORMAT))
}

/// Whole seconds between the Unix epoch and `time`, negative before it.
pub fn seconds_since_epoch(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i128::from(after.as_secs()),
        Err(err) => {
            let before = err.duration();
            let whole = i128::from(before.as_secs());
            if before.subsec_nanos() > 0 {
                -whole - 1
            } else {
                -whole
            }
        }
    }
}

/// Seconds and non-negative nanoseconds since the epoch, as `chrono` takes them.
fn split_since_epoch(time: SystemTime) -> Option<(i64, u32)> {
    let nanos = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.subsec_nanos(),
        Err(err) => match err.duration().subsec_nanos() {
            0 => 0,
            n => 1_000_000_000 - n,
        },
    };
    let secs = i64::try_from(seconds_since_epoch(time)).ok()?;
    Some((secs, nanos))
}

/// Renders any `chrono` date-time in local time.
pub fn format_date_time<Tz: TimeZone>(time: &DateTime<Tz>) -> LocalTimestamp {
    time.with_timezone(&Local).format(TIMESTAMP_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_system_time_matches_chrono() {
        let now = SystemTime::now();
        let expected = DateTime::<Local>::from(now).format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(format_system_time(now).unwrap().to_string(), expected);
    }

    #[test]
    fn test_out_of_range_system_time_is_rejected() {
        let far = UNIX_EPOCH + std::time::Duration::from_secs(1 << 50);
        assert!(format_system_time(far).is_none());
        assert_eq!(seconds_since_epoch(far), 1 << 50);
    }

    #[test]
    fn test_seconds_before_epoch_round_down() {
        let time = UNIX_EPOCH - std::time::Duration::from_millis(1500);
        assert_eq!(seconds_since_epoch(time), -2);
        let expected = Utc
            .timestamp_opt(-2, 500_000_000)
            .unwrap()
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(format_system_time(time).unwrap().to_string(), expected);
    }

    #[test]
    fn test_date_time_is_shown_in_local_zone() {
        let utc = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2021, 3, 4)
                .unwrap()
                .and_hms_opt(5, 6, 7)
                .unwrap(),
        );
        let expected = utc.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
        assert_eq!(format_date_time(&utc).to_string(), expected);
    }
}

use std::sync::atomic::{AtomicU8, Ordering};

use crate::severity::Severity;

/// Process-wide minimum severity.
///
/// The gate is a single atomic byte, so readers never observe a torn value and
/// no lock is taken on the logging path. Every record consults a gate exactly
/// once, when it is created; changing the threshold afterwards does not affect
/// records that are already being built.
///
/// Most programs only use the [`global`] gate through [`set_threshold`] and
/// [`current_threshold`]. Tests that need isolation can build their own gate
/// and hand it to [`LogRecord::with_gate`](crate::LogRecord::with_gate).
///
/// # Examples
///
/// ```
/// # use basic_logger::{LevelGate, Severity};
/// let gate = LevelGate::new(Severity::Info);
/// assert!(!gate.is_enabled(Severity::Debug));
/// assert!(gate.is_enabled(Severity::Info));
///
/// gate.set_threshold(Severity::Error);
/// assert_eq!(gate.current_threshold(), Severity::Error);
/// ```
#[derive(Debug)]
pub struct LevelGate {
    threshold: AtomicU8,
}

impl LevelGate {
    /// Creates a gate with the given threshold.
    pub const fn new(threshold: Severity) -> Self {
        Self {
            threshold: AtomicU8::new(threshold as u8),
        }
    }

    /// Sets the minimum severity for records created from now on.
    #[inline]
    pub fn set_threshold(&self, level: Severity) {
        self.threshold.store(level as u8, Ordering::Release);
    }

    /// Returns the current minimum severity.
    #[inline]
    pub fn current_threshold(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Acquire))
    }

    /// Returns `true` when a record of `severity` would be written.
    ///
    /// The boundary is inclusive: a record at exactly the threshold is enabled.
    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.current_threshold()
    }

    /// Sets `level` and returns a guard that restores the previous threshold
    /// when dropped.
    ///
    /// The threshold is global state with no teardown, so a test harness that
    /// changes it should scope the change with this guard.
    ///
    /// # Examples
    ///
    /// ```
    /// # use basic_logger::{LevelGate, Severity};
    /// let gate = LevelGate::new(Severity::Debug);
    /// {
    ///     let _guard = gate.scoped_threshold(Severity::Fatal);
    ///     assert_eq!(gate.current_threshold(), Severity::Fatal);
    /// }
    /// assert_eq!(gate.current_threshold(), Severity::Debug);
    /// ```
    pub fn scoped_threshold(&self, level: Severity) -> ThresholdGuard<'_> {
        let previous = Severity::from_u8(self.threshold.swap(level as u8, Ordering::AcqRel));
        ThresholdGuard { gate: self, previous }
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(Severity::Debug)
    }
}

/// Restores a gate's previous threshold on drop. See [`LevelGate::scoped_threshold`].
#[must_use = "the previous threshold is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ThresholdGuard<'a> {
    gate: &'a LevelGate,
    previous: Severity,
}

impl ThresholdGuard<'_> {
    /// The threshold that will be restored.
    pub fn previous(&self) -> Severity {
        self.previous
    }
}

impl Drop for ThresholdGuard<'_> {
    fn drop(&mut self) {
        self.gate.set_threshold(self.previous);
    }
}

static GLOBAL_GATE: LevelGate = LevelGate::new(Severity::Debug);

/// The process-wide gate consulted by [`log!`](crate::log) and [`LogRecord::new`](crate::LogRecord::new).
#[inline]
pub fn global() -> &'static LevelGate {
    &GLOBAL_GATE
}

/// Sets the process-wide minimum severity. Defaults to [`Severity::Debug`].
pub fn set_threshold(level: Severity) {
    GLOBAL_GATE.set_threshold(level);
}

/// Returns the process-wide minimum severity.
pub fn current_threshold() -> Severity {
    GLOBAL_GATE.current_threshold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_threshold_is_debug() {
        let gate = LevelGate::default();
        assert_eq!(gate.current_threshold(), Severity::Debug);
        for severity in Severity::ALL {
            assert!(gate.is_enabled(severity));
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let gate = LevelGate::new(Severity::Warn);
        for severity in Severity::ALL {
            assert_eq!(gate.is_enabled(severity), severity >= Severity::Warn);
        }
    }

    #[test]
    fn test_scoped_threshold_restores() {
        let gate = LevelGate::new(Severity::Info);
        {
            let guard = gate.scoped_threshold(Severity::Error);
            assert_eq!(guard.previous(), Severity::Info);
            assert_eq!(gate.current_threshold(), Severity::Error);
        }
        assert_eq!(gate.current_threshold(), Severity::Info);
    }

    #[test]
    fn test_concurrent_set_and_read() {
        let gate = Arc::new(LevelGate::default());
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || {
                    for n in 0..1000 {
                        gate.set_threshold(Severity::ALL[(i + n) % Severity::ALL.len()]);
                    }
                })
            })
            .collect();

        for _ in 0..1000 {
            // Every observed value must be one of the five severities.
            assert!(Severity::ALL.contains(&gate.current_threshold()));
        }

        for writer in writers {
            writer.join().unwrap();
        }
    }
}

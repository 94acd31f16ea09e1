//! Core types shared by the debouncer and the countdown.

use crate::time::TimeDuration;

/// Timing information returned by service operations.
///
/// Indicates when a unit needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Deferred work is in flight. Service again at your desired poll rate.
    ///
    /// Returned while an asynchronous debounced callback has not settled yet.
    /// Typically you should sleep for 10-50ms between service calls.
    Continuous,

    /// A timer is armed. Service again after the specified delay.
    ///
    /// Sleep for exactly this duration before calling service again.
    Delay(D),

    /// No live timer.
    ///
    /// No further servicing is needed until the next debounced call or
    /// countdown start.
    Idle,
}

impl<D: TimeDuration> ServiceTiming<D> {
    /// Combines the timing hints of two units into the one that needs
    /// attention first.
    ///
    /// `Continuous` wins over everything, two delays yield the shorter one,
    /// and `Idle` never shortens the other hint.
    pub fn earliest(self, other: Self) -> Self {
        match (self, other) {
            (ServiceTiming::Continuous, _) | (_, ServiceTiming::Continuous) => {
                ServiceTiming::Continuous
            }
            (ServiceTiming::Delay(a), ServiceTiming::Delay(b)) => {
                if b.as_millis() < a.as_millis() {
                    ServiceTiming::Delay(b)
                } else {
                    ServiceTiming::Delay(a)
                }
            }
            (ServiceTiming::Delay(d), ServiceTiming::Idle)
            | (ServiceTiming::Idle, ServiceTiming::Delay(d)) => ServiceTiming::Delay(d),
            (ServiceTiming::Idle, ServiceTiming::Idle) => ServiceTiming::Idle,
        }
    }

    /// Returns true if no timer is armed.
    pub fn is_idle(&self) -> bool {
        matches!(self, ServiceTiming::Idle)
    }
}

/// Countdown configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Default countdown duration of zero seconds.
    ZeroDuration,

    /// Countdown template lacks the `{}` placeholder.
    MissingPlaceholder,

    /// Label exceeds the fixed label capacity.
    LabelTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroDuration => {
                write!(f, "default countdown duration must be at least one second")
            }
            ConfigError::MissingPlaceholder => {
                write!(f, "countdown template must contain a `{{}}` placeholder")
            }
            ConfigError::LabelTooLong => {
                write!(
                    f,
                    "label exceeds capacity of {} bytes",
                    crate::config::LABEL_CAPACITY
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

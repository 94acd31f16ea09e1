//! Clock seam between the host and the timing units.
//!
//! Both [`Debouncer`](crate::Debouncer) and [`Countdown`](crate::Countdown)
//! keep only instants they read from a [`TimeSource`]. The host supplies the
//! clock; the units never sleep or spawn timers.

/// Clock the units read their instants from.
///
/// Must be monotonic: an instant returned later never compares earlier.
pub trait TimeSource<I: TimeInstant> {
    /// Reads the clock.
    fn now(&self) -> I;
}

/// Span of time with millisecond resolution.
pub trait TimeDuration: Copy + PartialEq {
    /// The empty span.
    const ZERO: Self;

    /// Whole milliseconds in this span.
    fn as_millis(&self) -> u64;

    fn from_millis(millis: u64) -> Self;

    /// Clamps at [`TimeDuration::ZERO`].
    fn saturating_sub(self, other: Self) -> Self;
}

/// Point on a [`TimeSource`] clock.
pub trait TimeInstant: Copy {
    type Duration: TimeDuration;

    /// Span from `earlier` to `self`.
    ///
    /// `earlier` always comes from the same clock and was read before `self`.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Whole milliseconds from `earlier` to `self`.
    fn millis_since(&self, earlier: Self) -> u64 {
        self.duration_since(earlier).as_millis()
    }
}

#[cfg(feature = "std")]
pub use self::host::{StdDuration, StdInstant, StdTimeSource};

#[cfg(feature = "std")]
mod host {
    use super::{TimeDuration, TimeInstant, TimeSource};

    /// Newtype wrapper for `std::time::Duration`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct StdDuration(pub std::time::Duration);

    impl TimeDuration for StdDuration {
        const ZERO: Self = StdDuration(std::time::Duration::ZERO);

        fn as_millis(&self) -> u64 {
            u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
        }

        fn from_millis(millis: u64) -> Self {
            StdDuration(std::time::Duration::from_millis(millis))
        }

        fn saturating_sub(self, other: Self) -> Self {
            StdDuration(self.0.saturating_sub(other.0))
        }
    }

    /// Newtype wrapper for `std::time::Instant`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct StdInstant(pub std::time::Instant);

    impl TimeInstant for StdInstant {
        type Duration = StdDuration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            StdDuration(self.0.saturating_duration_since(earlier.0))
        }
    }

    /// Monotonic wall-clock time source for hosted targets.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct StdTimeSource;

    impl StdTimeSource {
        /// Creates a new std time source.
        pub fn new() -> Self {
            Self
        }
    }

    impl TimeSource<StdInstant> for StdTimeSource {
        fn now(&self) -> StdInstant {
            StdInstant(std::time::Instant::now())
        }
    }

}

//! Debounced invocation of side-effecting callbacks.
//!
//! Provides [`Debouncer`], which collapses bursts of calls into a single
//! deferred invocation once a quiet period has elapsed. The debouncer never
//! runs the callback from inside [`Debouncer::call`]; the host drives it by
//! calling [`Debouncer::service`] when the returned [`ServiceTiming`] says so.

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::outcome::{Outcome, Settled};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::ServiceTiming;
use core::task::{Context, Waker};
use heapless::Vec;

/// Maximum number of fired asynchronous outcomes polled at once.
///
/// Firing while this many are still unsettled drops the oldest, logs a
/// warning and counts it in [`Debouncer::dropped_outcomes`].
pub const MAX_IN_FLIGHT: usize = 8;

/// An invocation waiting for its quiet period to elapse.
#[derive(Debug)]
struct Pending<I, A> {
    args: A,
    scheduled_at: I,
}

/// Wraps a callback so rapid repeated calls collapse into one deferred call.
///
/// Each [`call`](Self::call) replaces any pending invocation and restarts the
/// quiet period; only the arguments of the most recent call ever reach the
/// callback. Failures of the callback, synchronous or asynchronous, are
/// routed to the diagnostic sink and never returned to the caller.
///
/// Arguments are passed as a single value `A`. Use a tuple for several
/// arguments, and include any context the callback needs in it.
///
/// Every fired asynchronous outcome is polled until it settles, even after
/// later calls have fired, so each rejection reaches the sink.
///
/// Dropping the debouncer drops any pending invocation with it.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `A` - Argument type of the callback
/// * `R` - Outcome type returned by the callback
/// * `F` - Callback type
/// * `S` - Diagnostic sink type
pub struct Debouncer<'t, I, T, A, R, F, S = LogSink>
where
    I: TimeInstant,
    T: TimeSource<I>,
    R: Outcome,
    F: FnMut(A) -> R,
    S: DiagnosticSink<R::Error>,
{
    callback: F,
    delay: I::Duration,
    time_source: &'t T,
    sink: S,
    pending: Option<Pending<I, A>>,
    in_flight: Vec<R, MAX_IN_FLIGHT>,
    invocations: u32,
    dropped: u32,
}

impl<'t, I, T, A, R, F> Debouncer<'t, I, T, A, R, F, LogSink>
where
    I: TimeInstant,
    T: TimeSource<I>,
    R: Outcome,
    R::Error: core::fmt::Debug,
    F: FnMut(A) -> R,
{
    /// Creates a debouncer reporting failures to a [`LogSink`].
    ///
    /// # Arguments
    /// * `callback` - The function to debounce
    /// * `delay_ms` - Quiet period in milliseconds; zero still defers the call
    ///   to the next service
    /// * `time_source` - Clock used to measure the quiet period
    pub fn new(callback: F, delay_ms: u64, time_source: &'t T) -> Self {
        Self::with_sink(callback, delay_ms, time_source, LogSink::new())
    }
}

impl<'t, I, T, A, R, F, S> Debouncer<'t, I, T, A, R, F, S>
where
    I: TimeInstant,
    T: TimeSource<I>,
    R: Outcome,
    F: FnMut(A) -> R,
    S: DiagnosticSink<R::Error>,
{
    /// Creates a debouncer reporting failures to the given sink.
    pub fn with_sink(callback: F, delay_ms: u64, time_source: &'t T, sink: S) -> Self {
        Self {
            callback,
            delay: I::Duration::from_millis(delay_ms),
            time_source,
            sink,
            pending: None,
            in_flight: Vec::new(),
            invocations: 0,
            dropped: 0,
        }
    }

    /// Schedules the callback with `args`, cancelling any pending invocation.
    ///
    /// Returns immediately. The callback runs on the first
    /// [`service`](Self::service) at least `delay` after this call, provided
    /// no further call arrives in between.
    pub fn call(&mut self, args: A) -> ServiceTiming<I::Duration> {
        if self.pending.is_some() {
            trace!("debounce: pending call replaced");
        }

        self.pending = Some(Pending {
            args,
            scheduled_at: self.time_source.now(),
        });

        trace!("debounce: call scheduled in {} ms", self.delay.as_millis());
        self.timing()
    }

    /// Services the debouncer, firing the pending invocation if it is due.
    ///
    /// Also advances every asynchronous outcome still in flight.
    ///
    /// # Returns
    /// - `ServiceTiming::Continuous` - Asynchronous outcomes are still in flight
    /// - `ServiceTiming::Delay(duration)` - A call is pending, service after this delay
    /// - `ServiceTiming::Idle` - Nothing pending
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        let due = match &self.pending {
            Some(pending) => {
                let elapsed_ms = self.time_source.now().millis_since(pending.scheduled_at);
                elapsed_ms >= self.delay.as_millis()
            }
            None => false,
        };

        self.poll_in_flight();
        if due {
            self.fire();
        }

        self.timing()
    }

    /// Fires the pending invocation now, skipping the rest of the quiet period.
    ///
    /// Does nothing if no call is pending.
    pub fn flush(&mut self) -> ServiceTiming<I::Duration> {
        if self.pending.is_some() {
            self.fire();
        }
        self.timing()
    }

    /// Cancels the pending invocation, if any.
    ///
    /// Call this when the host goes away before the quiet period ends.
    /// Asynchronous outcomes already in flight are dropped as well; they are
    /// logged and counted in [`dropped_outcomes`](Self::dropped_outcomes).
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            trace!("debounce: pending call cancelled");
        }

        let unsettled = self.in_flight.len();
        if unsettled > 0 {
            self.in_flight.clear();
            self.dropped = self.dropped.saturating_add(unsettled as u32);
            debug!("debounce: cancel dropped {} unsettled outcomes", unsettled as u32);
        }
    }

    /// Returns true if a call is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns true if an asynchronous outcome has not settled yet.
    pub fn is_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Returns how many asynchronous outcomes have not settled yet.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns how many unsettled outcomes were dropped, by `cancel` or
    /// because [`MAX_IN_FLIGHT`] was reached.
    pub fn dropped_outcomes(&self) -> u32 {
        self.dropped
    }

    /// Returns how many times the callback has been invoked.
    pub fn invocations(&self) -> u32 {
        self.invocations
    }

    /// Returns the quiet period.
    pub fn delay(&self) -> I::Duration {
        self.delay
    }

    /// Returns a reference to the diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the current timing hint without servicing.
    pub fn timing(&self) -> ServiceTiming<I::Duration> {
        if !self.in_flight.is_empty() {
            return ServiceTiming::Continuous;
        }

        match &self.pending {
            Some(pending) => {
                let elapsed = self.time_source.now().duration_since(pending.scheduled_at);
                ServiceTiming::Delay(self.delay.saturating_sub(elapsed))
            }
            None => ServiceTiming::Idle,
        }
    }

    fn fire(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        self.invocations = self.invocations.saturating_add(1);
        trace!("debounce: firing invocation {}", self.invocations);

        let outcome = (self.callback)(pending.args);
        self.settle(outcome);
    }

    fn poll_in_flight(&mut self) {
        for outcome in core::mem::take(&mut self.in_flight) {
            self.settle(outcome);
        }
    }

    fn track(&mut self, outcome: R) {
        if self.in_flight.is_full() {
            let _ = self.in_flight.remove(0);
            self.dropped = self.dropped.saturating_add(1);
            warn!(
                "debounce: {} outcomes in flight, oldest dropped",
                MAX_IN_FLIGHT as u32
            );
        }
        // Room was made above.
        let _ = self.in_flight.push(outcome);
    }

    fn settle(&mut self, outcome: R) {
        let mut cx = Context::from_waker(Waker::noop());
        match outcome.settle(&mut cx) {
            Settled::Done => {}
            Settled::Failed(err) => {
                warn!("debounce: callback failed, reporting to sink");
                self.sink.report(err);
            }
            Settled::Pending(rest) => self.track(rest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Deferred;
    use core::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct TestDuration(u64);

    impl TimeDuration for TestDuration {
        const ZERO: Self = TestDuration(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            TestDuration(millis)
        }

        fn saturating_sub(self, other: Self) -> Self {
            TestDuration(self.0.saturating_sub(other.0))
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct TestInstant(u64);

    impl TimeInstant for TestInstant {
        type Duration = TestDuration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            TestDuration(self.0 - earlier.0)
        }
    }

    struct MockTimeSource {
        current_time: Cell<TestInstant>,
    }

    impl MockTimeSource {
        fn new() -> Self {
            Self {
                current_time: Cell::new(TestInstant(0)),
            }
        }

        fn advance(&self, millis: u64) {
            let current = self.current_time.get();
            self.current_time.set(TestInstant(current.0 + millis));
        }
    }

    impl TimeSource<TestInstant> for MockTimeSource {
        fn now(&self) -> TestInstant {
            self.current_time.get()
        }
    }

    #[test]
    fn call_never_invokes_synchronously() {
        let timer = MockTimeSource::new();
        let hits = Cell::new(0u32);
        let mut debouncer = Debouncer::new(|_: ()| hits.set(hits.get() + 1), 0, &timer);

        let timing = debouncer.call(());
        assert_eq!(timing, ServiceTiming::Delay(TestDuration(0)));
        assert_eq!(hits.get(), 0);

        assert_eq!(debouncer.service(), ServiceTiming::Idle);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn service_reports_remaining_quiet_period() {
        let timer = MockTimeSource::new();
        let mut debouncer = Debouncer::new(|_: u8| {}, 300, &timer);

        assert_eq!(debouncer.service(), ServiceTiming::Idle);
        debouncer.call(1);
        timer.advance(120);
        assert_eq!(debouncer.service(), ServiceTiming::Delay(TestDuration(180)));
        assert!(debouncer.is_pending());
    }

    #[test]
    fn flush_fires_pending_call_immediately() {
        let timer = MockTimeSource::new();
        let last = Cell::new(0u8);
        let mut debouncer = Debouncer::new(|v: u8| last.set(v), 500, &timer);

        assert_eq!(debouncer.flush(), ServiceTiming::Idle);
        assert_eq!(debouncer.invocations(), 0);

        debouncer.call(7);
        assert_eq!(debouncer.flush(), ServiceTiming::Idle);
        assert_eq!(last.get(), 7);
        assert_eq!(debouncer.invocations(), 1);
    }

    #[test]
    fn full_in_flight_store_drops_oldest_and_counts_it() {
        let timer = MockTimeSource::new();
        let mut debouncer = Debouncer::new(
            |_: ()| Deferred(core::future::pending::<Result<(), u8>>()),
            0,
            &timer,
        );

        for _ in 0..MAX_IN_FLIGHT {
            debouncer.call(());
            assert_eq!(debouncer.service(), ServiceTiming::Continuous);
        }
        assert_eq!(debouncer.in_flight_count(), MAX_IN_FLIGHT);
        assert_eq!(debouncer.dropped_outcomes(), 0);

        debouncer.call(());
        debouncer.service();
        assert_eq!(debouncer.in_flight_count(), MAX_IN_FLIGHT);
        assert_eq!(debouncer.dropped_outcomes(), 1);

        debouncer.cancel();
        assert!(!debouncer.is_in_flight());
        assert_eq!(debouncer.dropped_outcomes(), 1 + MAX_IN_FLIGHT as u32);
        assert_eq!(debouncer.service(), ServiceTiming::Idle);
    }

    #[test]
    fn sync_error_goes_to_sink() {
        let timer = MockTimeSource::new();
        let mut debouncer = Debouncer::new(|code: u16| Err::<(), u16>(code), 10, &timer);

        debouncer.call(500);
        timer.advance(10);
        debouncer.service();
        assert_eq!(debouncer.sink().failures(), 1);
    }
}

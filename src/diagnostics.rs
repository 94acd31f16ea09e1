//! Diagnostic sinks receiving failures of debounced callbacks.

use core::fmt::Debug;

/// Receives failures raised by debounced callbacks.
///
/// Failures never reach the caller of the debounced function; they end up
/// here instead. Any `FnMut(E)` closure is a sink.
pub trait DiagnosticSink<E> {
    /// Reports one failure.
    fn report(&mut self, error: E);
}

impl<E, F: FnMut(E)> DiagnosticSink<E> for F {
    fn report(&mut self, error: E) {
        self(error)
    }
}

/// Default sink: counts failures and logs them when a logging feature is on.
///
/// With `log` the failure goes through `log::error!`, with `defmt` through
/// `defmt::error!`. Without either it is only counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogSink {
    failures: u32,
}

impl LogSink {
    /// Creates a sink with no recorded failures.
    pub const fn new() -> Self {
        Self { failures: 0 }
    }

    /// Returns how many failures were reported.
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl<E: Debug> DiagnosticSink<E> for LogSink {
    fn report(&mut self, error: E) {
        self.failures = self.failures.saturating_add(1);

        #[cfg(feature = "log")]
        log::error!("debounced callback failed: {:?}", error);

        #[cfg(feature = "defmt")]
        defmt::error!("debounced callback failed: {}", defmt::Debug2Format(&error));

        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = error;
    }
}

//! Resend-button cooldown with state management and timing control.
//!
//! Provides [`Countdown`] which disables a send button for a number of seconds,
//! ticking its label down once per second and re-enabling it at zero. Also
//! defines the [`SendButton`] trait for UI abstraction.

use crate::command::CountdownAction;
use crate::config::CountdownConfig;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::ServiceTiming;

const TICK_MILLIS: u64 = 1000;

/// Trait for abstracting the host's send button.
///
/// Implement this for your UI control (DOM element, widget handle, display
/// line, etc.) to allow the countdown to drive it. Handle any UI errors
/// internally - these methods cannot fail.
pub trait SendButton {
    /// Enables or disables the button.
    fn set_enabled(&mut self, enabled: bool);

    /// Replaces the button label.
    fn set_label(&mut self, label: &str);
}

/// The current state of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownState {
    /// No cooldown. Button enabled and showing the idle label.
    Idle,
    /// Cooldown active. Button disabled and showing the remaining seconds.
    CoolingDown,
}

/// Errors that can occur during countdown operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownError {
    /// A zero-second override was passed to `start`.
    ///
    /// The call is rejected and the countdown keeps its previous state.
    InvalidDuration,
}

impl core::fmt::Display for CountdownError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CountdownError::InvalidDuration => {
                write!(f, "countdown override must be at least one second")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CountdownError {}

/// The single armed tick timer.
#[derive(Debug, Clone, Copy)]
struct Tick<I> {
    started_at: I,
    secs: u32,
}

/// Drives a send button through a resend cooldown.
///
/// The countdown owns the button and updates it synchronously on `start`, on
/// every one-second boundary crossed during `service`, and when the cooldown
/// expires. Remaining time is derived from the start instant, so late service
/// calls never drift the schedule.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `B` - Button implementation type
/// * `T` - Time source implementation type
pub struct Countdown<'t, I: TimeInstant, B: SendButton, T: TimeSource<I>> {
    button: B,
    time_source: &'t T,
    config: CountdownConfig,
    state: CountdownState,
    remaining: u32,
    tick: Option<Tick<I>>,
}

impl<'t, I: TimeInstant, B: SendButton, T: TimeSource<I>> Countdown<'t, I, B, T> {
    /// Creates an idle countdown and shows the idle label on an enabled button.
    pub fn new(mut button: B, time_source: &'t T, config: CountdownConfig) -> Self {
        button.set_enabled(true);
        button.set_label(config.idle_label());

        Self {
            button,
            time_source,
            config,
            state: CountdownState::Idle,
            remaining: 0,
            tick: None,
        }
    }

    /// Handles a countdown action by dispatching to the appropriate method.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming)` - Timing after the action
    /// * `Err` - Operation rejected
    pub fn handle_action(
        &mut self,
        action: CountdownAction,
    ) -> Result<ServiceTiming<I::Duration>, CountdownError> {
        match action {
            CountdownAction::Start(secs) => self.start(secs),
            CountdownAction::Stop => {
                self.stop();
                Ok(ServiceTiming::Idle)
            }
        }
    }

    /// Starts or restarts the cooldown.
    ///
    /// Can be called from any state. Replaces any running tick timer, disables
    /// the button and shows the full duration before returning.
    ///
    /// # Arguments
    /// * `override_secs` - Cooldown length; `None` uses the configured default
    ///
    /// # Returns
    /// * `Ok(ServiceTiming::Delay(..))` - When the first tick is due
    /// * `Err(InvalidDuration)` - `Some(0)` was passed; nothing changed
    pub fn start(
        &mut self,
        override_secs: Option<u32>,
    ) -> Result<ServiceTiming<I::Duration>, CountdownError> {
        let secs = match override_secs {
            Some(0) => return Err(CountdownError::InvalidDuration),
            Some(secs) => secs,
            None => self.config.default_secs(),
        };

        if self.tick.is_some() {
            debug!("countdown: restarting at {} s from {} s", secs, self.remaining);
        } else {
            debug!("countdown: starting at {} s", secs);
        }

        self.tick = Some(Tick {
            started_at: self.time_source.now(),
            secs,
        });
        self.state = CountdownState::CoolingDown;
        self.remaining = secs;

        self.button.set_enabled(false);
        self.show_remaining();

        Ok(self.timing())
    }

    /// Services the countdown, updating the button if a tick has passed.
    ///
    /// Safe to call in any state; an idle countdown does nothing.
    ///
    /// # Returns
    /// - `ServiceTiming::Delay(duration)` - Cooling down, service at the next tick
    /// - `ServiceTiming::Idle` - Cooldown over or never started
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        let Some(tick) = self.tick else {
            return ServiceTiming::Idle;
        };

        let elapsed_ms = self.time_source.now().millis_since(tick.started_at);
        let elapsed_secs = u32::try_from(elapsed_ms / TICK_MILLIS).unwrap_or(u32::MAX);
        let remaining = tick.secs.saturating_sub(elapsed_secs);

        if remaining == 0 {
            self.finish();
            return ServiceTiming::Idle;
        }

        if remaining != self.remaining {
            trace!("countdown: {} s remaining", remaining);
            self.remaining = remaining;
            self.show_remaining();
        }

        ServiceTiming::Delay(I::Duration::from_millis(
            TICK_MILLIS - elapsed_ms % TICK_MILLIS,
        ))
    }

    /// Stops the cooldown and re-enables the button.
    ///
    /// Use this when the host is torn down mid-countdown; no tick can fire
    /// afterwards. Does nothing when idle.
    pub fn stop(&mut self) {
        if self.tick.is_some() {
            debug!("countdown: stopped at {} s", self.remaining);
            self.finish();
        }
    }

    /// Returns the current timing hint without servicing.
    pub fn timing(&self) -> ServiceTiming<I::Duration> {
        match self.tick {
            Some(tick) => {
                let elapsed_ms = self.time_source.now().millis_since(tick.started_at);
                ServiceTiming::Delay(I::Duration::from_millis(
                    TICK_MILLIS - elapsed_ms % TICK_MILLIS,
                ))
            }
            None => ServiceTiming::Idle,
        }
    }

    /// Returns the current state of the countdown.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Returns the seconds left before the button re-enables.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    /// Returns true if the button is enabled (no cooldown running).
    pub fn is_enabled(&self) -> bool {
        self.remaining == 0
    }

    /// Returns the cooldown used by `start(None)`.
    pub fn default_secs(&self) -> u32 {
        self.config.default_secs()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    /// Returns a reference to the button.
    pub fn button(&self) -> &B {
        &self.button
    }

    /// Returns a mutable reference to the button.
    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    /// Consumes the countdown and returns the button.
    pub fn into_button(self) -> B {
        self.button
    }

    fn finish(&mut self) {
        self.tick = None;
        self.state = CountdownState::Idle;
        self.remaining = 0;

        self.button.set_label(self.config.idle_label());
        self.button.set_enabled(true);
    }

    fn show_remaining(&mut self) {
        let label = self.config.countdown_label(self.remaining);
        self.button.set_label(&label);
    }
}

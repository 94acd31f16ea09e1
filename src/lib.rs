#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Debouncer`**: Collapses bursts of calls into one deferred callback invocation
//! - **`Outcome`**: What a debounced callback returns (`()`, `Result`, or `Deferred` future)
//! - **`DiagnosticSink`**: Receives callback failures instead of the caller
//! - **`Countdown`**: Drives a send button through a resend cooldown
//! - **`CountdownConfig`**: Default cooldown and button labels
//! - **`SendButton`**: Trait to implement for your UI control
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`ServiceTiming`**: When a unit needs to be serviced again
//! - **`CountdownAction`**: Commands that can be sent to control countdowns
//!
//! Nothing here spawns timers. Each unit owns at most one deadline and the
//! host calls `service()` when the returned [`ServiceTiming`] says so.

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod countdown;
pub mod debounce;
pub mod diagnostics;
pub mod outcome;
pub mod time;
pub mod types;

pub use command::{CountdownAction, CountdownCommand};
pub use config::{
    CountdownConfig, CountdownConfigBuilder, DEFAULT_COUNTDOWN_SECS, DEFAULT_COUNTDOWN_TEMPLATE,
    DEFAULT_IDLE_LABEL, LABEL_CAPACITY, RENDERED_LABEL_CAPACITY, RenderedLabel,
};
pub use countdown::{Countdown, CountdownError, CountdownState, SendButton};
pub use debounce::{Debouncer, MAX_IN_FLIGHT};
pub use diagnostics::{DiagnosticSink, LogSink};
pub use outcome::{Deferred, Outcome, Settled};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{ConfigError, ServiceTiming};

#[cfg(feature = "std")]
pub use time::{StdDuration, StdInstant, StdTimeSource};

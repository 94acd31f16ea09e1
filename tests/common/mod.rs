//! Shared test infrastructure for resend-guard integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::rc::Rc;

use resend_guard::{RenderedLabel, SendButton, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

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

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// A single update applied to the button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonEvent {
    Enabled(bool),
    Label(RenderedLabel),
}

/// Mock button that records all updates for testing
pub struct MockButton {
    enabled: bool,
    label: RenderedLabel,
    history: heapless::Vec<ButtonEvent, 128>,
}

impl MockButton {
    pub fn new() -> Self {
        Self {
            enabled: false,
            label: RenderedLabel::new(),
            history: heapless::Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn history(&self) -> &[ButtonEvent] {
        &self.history
    }

    /// Labels written so far, oldest first
    pub fn labels(&self) -> Vec<String> {
        self.history
            .iter()
            .filter_map(|event| match event {
                ButtonEvent::Label(label) => Some(label.as_str().to_string()),
                ButtonEvent::Enabled(_) => None,
            })
            .collect()
    }
}

impl SendButton for MockButton {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        let _ = self.history.push(ButtonEvent::Enabled(enabled));
    }

    fn set_label(&mut self, label: &str) {
        self.label.clear();
        let _ = self.label.push_str(label);
        let _ = self.history.push(ButtonEvent::Label(self.label.clone()));
    }
}

// ============================================================================
// Controllable Future
// ============================================================================

/// Handle resolving a [`GateFuture`] from the test body
#[derive(Clone, Default)]
pub struct Gate {
    slot: Rc<Cell<Option<Result<(), &'static str>>>>,
    polls: Rc<Cell<u32>>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a future that stays pending until `resolve` or `reject`
    pub fn future(&self) -> GateFuture {
        GateFuture { gate: self.clone() }
    }

    pub fn resolve(&self) {
        self.slot.set(Some(Ok(())));
    }

    pub fn reject(&self, reason: &'static str) {
        self.slot.set(Some(Err(reason)));
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

/// Future driven by a [`Gate`]
pub struct GateFuture {
    gate: Gate,
}

impl Future for GateFuture {
    type Output = Result<(), &'static str>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.gate.polls.set(self.gate.polls.get() + 1);
        match self.gate.slot.take() {
            Some(result) => Poll::Ready(result),
            None => Poll::Pending,
        }
    }
}

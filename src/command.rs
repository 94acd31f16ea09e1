//! Command-based control for countdowns.

/// Actions for controlling a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownAction {
    /// Start or restart the cooldown, optionally overriding its length in seconds.
    Start(Option<u32>),
    /// Stop the cooldown and re-enable the button.
    Stop,
}

/// Command targeting a specific countdown.
///
/// Useful when a host forwards actions to one of several widgets over a
/// channel, e.g. the resend buttons of a login form and a 2FA prompt.
#[derive(Debug, Clone, Copy)]
pub struct CountdownCommand<Id> {
    pub target: Id,
    pub action: CountdownAction,
}

impl<Id> CountdownCommand<Id> {
    /// Creates command.
    pub fn new(target: Id, action: CountdownAction) -> Self {
        Self { target, action }
    }
}

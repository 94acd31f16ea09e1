//! Countdown configuration and label rendering.

use crate::types::ConfigError;
use core::fmt::Write;
use heapless::String;

/// Maximum byte length of the idle label, and of the countdown template
/// without its placeholder.
pub const LABEL_CAPACITY: usize = 48;

/// Byte capacity of a rendered label (template text plus up to ten digits).
pub const RENDERED_LABEL_CAPACITY: usize = 64;

/// Default cooldown applied by `start(None)`.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 60;

/// Default label shown while the button is enabled.
pub const DEFAULT_IDLE_LABEL: &str = "Send code";

/// Default label template shown while cooling down.
pub const DEFAULT_COUNTDOWN_TEMPLATE: &str = "Resend in {}s";

const PLACEHOLDER: &str = "{}";

/// A label rendered for the button.
pub type RenderedLabel = String<RENDERED_LABEL_CAPACITY>;

/// Validated countdown configuration.
///
/// Holds the default cooldown duration and the two button labels. The
/// countdown template is split around its `{}` placeholder once at build time,
/// so rendering a tick never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownConfig {
    default_secs: u32,
    idle_label: String<LABEL_CAPACITY>,
    prefix: String<LABEL_CAPACITY>,
    suffix: String<LABEL_CAPACITY>,
}

impl CountdownConfig {
    /// Creates a new configuration builder.
    pub fn builder<'a>() -> CountdownConfigBuilder<'a> {
        CountdownConfigBuilder::new()
    }

    /// Returns the default cooldown in seconds.
    pub fn default_secs(&self) -> u32 {
        self.default_secs
    }

    /// Returns the label shown while the button is enabled.
    pub fn idle_label(&self) -> &str {
        &self.idle_label
    }

    /// Renders the cooldown label for the given remaining seconds.
    pub fn countdown_label(&self, remaining_secs: u32) -> RenderedLabel {
        let mut label = RenderedLabel::new();
        // Capacity covers both template halves and u32::MAX.
        let _ = write!(label, "{}{}{}", self.prefix, remaining_secs, self.suffix);
        label
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        let mut idle_label = String::new();
        let mut prefix = String::new();
        let mut suffix = String::new();
        let _ = idle_label.push_str(DEFAULT_IDLE_LABEL);
        let _ = prefix.push_str("Resend in ");
        let _ = suffix.push_str("s");

        Self {
            default_secs: DEFAULT_COUNTDOWN_SECS,
            idle_label,
            prefix,
            suffix,
        }
    }
}

/// Builder for constructing validated countdown configurations.
#[derive(Debug, Clone, Copy)]
pub struct CountdownConfigBuilder<'a> {
    default_secs: u32,
    idle_label: &'a str,
    countdown_template: &'a str,
}

impl<'a> CountdownConfigBuilder<'a> {
    /// Creates a builder holding the crate defaults.
    pub fn new() -> Self {
        Self {
            default_secs: DEFAULT_COUNTDOWN_SECS,
            idle_label: DEFAULT_IDLE_LABEL,
            countdown_template: DEFAULT_COUNTDOWN_TEMPLATE,
        }
    }

    /// Sets the cooldown used when `start` receives no override.
    ///
    /// Default is [`DEFAULT_COUNTDOWN_SECS`].
    pub fn default_secs(mut self, secs: u32) -> Self {
        self.default_secs = secs;
        self
    }

    /// Sets the label shown while the button is enabled.
    pub fn idle_label(mut self, label: &'a str) -> Self {
        self.idle_label = label;
        self
    }

    /// Sets the label shown while cooling down.
    ///
    /// The first `{}` is replaced by the remaining seconds, e.g.
    /// `"Resend in {}s"`.
    pub fn countdown_template(mut self, template: &'a str) -> Self {
        self.countdown_template = template;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroDuration` - The default duration is zero
    /// * `MissingPlaceholder` - The countdown template has no `{}`
    /// * `LabelTooLong` - A label does not fit [`LABEL_CAPACITY`]
    pub fn build(self) -> Result<CountdownConfig, ConfigError> {
        if self.default_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        let (head, tail) = self
            .countdown_template
            .split_once(PLACEHOLDER)
            .ok_or(ConfigError::MissingPlaceholder)?;

        if head.len() + tail.len() > LABEL_CAPACITY {
            return Err(ConfigError::LabelTooLong);
        }

        Ok(CountdownConfig {
            default_secs: self.default_secs,
            idle_label: bounded(self.idle_label)?,
            prefix: bounded(head)?,
            suffix: bounded(tail)?,
        })
    }
}

impl Default for CountdownConfigBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn bounded(text: &str) -> Result<String<LABEL_CAPACITY>, ConfigError> {
    let mut out = String::new();
    out.push_str(text).map_err(|_| ConfigError::LabelTooLong)?;
    Ok(out)
}

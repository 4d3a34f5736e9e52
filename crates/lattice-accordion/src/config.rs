//! Accordion configuration.
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```
//! use lattice_accordion::{AccordionConfig, ReentrancyPolicy};
//!
//! let config = AccordionConfig::from_toml_str(r#"
//!     reentrancy = "queue"
//!     expand_duration_ms = 200
//!     easing = "ease-out"
//! "#).unwrap();
//!
//! assert_eq!(config.reentrancy, ReentrancyPolicy::Queue);
//! assert_eq!(config.expand_timing().duration.as_millis(), 200);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// What to do when a row is toggled while its previous transition is still
/// running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReentrancyPolicy {
    /// Drop the new toggle.
    #[default]
    Ignore,
    /// Remember one toggle and replay it when the running transition ends.
    Queue,
    /// Abandon the running transition and start the new one, choosing its
    /// direction from expansion state membership.
    LastWriteWins,
}

/// Easing curves hosts may apply to the height and content animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the curve to a progress value in `0.0..=1.0`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Timing for one animation phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    /// Total length of the phase.
    pub duration: Duration,
    /// Curve applied to linear progress.
    pub easing: Easing,
}

impl AnimationTiming {
    /// Eased progress after `elapsed` time, in `0.0..=1.0`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let raw = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        self.easing.apply(raw)
    }

    /// Returns `true` once `elapsed` covers the whole phase.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Configuration for an [`AccordionController`](crate::AccordionController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    /// Policy for toggles that arrive mid-transition.
    pub reentrancy: ReentrancyPolicy,
    /// Whether row selection animates the toggle.
    pub animate_selection: bool,
    /// Whether the selection highlight is cleared with animation.
    pub deselect_animated: bool,
    /// Advisory length of the expand animation, in milliseconds.
    pub expand_duration_ms: u64,
    /// Advisory length of the collapse animation, in milliseconds.
    pub collapse_duration_ms: u64,
    /// Advisory easing curve for both directions.
    pub easing: Easing,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            reentrancy: ReentrancyPolicy::default(),
            animate_selection: true,
            deselect_animated: true,
            expand_duration_ms: 300,
            collapse_duration_ms: 250,
            easing: Easing::default(),
        }
    }
}

impl AccordionConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable together.
    pub fn validate(&self) -> Result<()> {
        if self.animate_selection {
            if self.expand_duration_ms == 0 {
                return Err(ConfigError::invalid_value(
                    "expand_duration_ms",
                    "must be non-zero when selection is animated",
                ));
            }
            if self.collapse_duration_ms == 0 {
                return Err(ConfigError::invalid_value(
                    "collapse_duration_ms",
                    "must be non-zero when selection is animated",
                ));
            }
        }
        Ok(())
    }

    /// Sets the reentrancy policy using builder pattern.
    pub fn with_reentrancy(mut self, policy: ReentrancyPolicy) -> Self {
        self.reentrancy = policy;
        self
    }

    /// Sets whether selection animates using builder pattern.
    pub fn with_animate_selection(mut self, animated: bool) -> Self {
        self.animate_selection = animated;
        self
    }

    /// Timing of the expand animation.
    pub fn expand_timing(&self) -> AnimationTiming {
        AnimationTiming {
            duration: Duration::from_millis(self.expand_duration_ms),
            easing: self.easing,
        }
    }

    /// Timing of the collapse animation.
    pub fn collapse_timing(&self) -> AnimationTiming {
        AnimationTiming {
            duration: Duration::from_millis(self.collapse_duration_ms),
            easing: self.easing,
        }
    }
}

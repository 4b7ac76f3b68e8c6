//! AquaScript Configuration
//!
//! Loaded from `aquascript.toml`; every section and field falls back to the
//! library defaults when omitted.

use std::path::Path;

use aqua_a11y::AQUA_CLASS_MARKER;
use aqua_motion::{
    AnimationOptions, RippleOptions, DEFAULT_DURATION_MS, DEFAULT_PULSE_MS, DEFAULT_RIPPLE_COLOR,
    DEFAULT_RIPPLE_MS, RIPPLE_CLASS,
};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Default config file name
pub const CONFIG_FILE: &str = "aquascript.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AquaConfig {
    pub animation: AnimationConfig,
    pub ripple: RippleConfig,
    pub classes: ClassConfig,
    pub alerts: AlertConfig,
}

/// Animation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration used by `animate` when none is given
    pub default_duration_ms: u64,
    /// Duration of timed class pulses
    pub pulse_duration_ms: u64,
}

/// Ripple appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub color: String,
    pub duration_ms: u64,
    pub class_name: String,
}

/// Class names the library keys on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Substring that marks library elements for reduced-motion suppression
    pub marker: String,
    /// Added to `<body>` once components are wired
    pub initialized: String,
}

/// Alert timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Auto-close delay when `data-autoclose` is not a number
    pub autoclose_fallback_ms: u64,
    /// Duration of the slide-out before an alert is removed
    pub dismiss_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION_MS,
            pulse_duration_ms: DEFAULT_PULSE_MS,
        }
    }
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_RIPPLE_COLOR.to_string(),
            duration_ms: DEFAULT_RIPPLE_MS,
            class_name: RIPPLE_CLASS.to_string(),
        }
    }
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            marker: AQUA_CLASS_MARKER.to_string(),
            initialized: "aqua-components-initialized".to_string(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            autoclose_fallback_ms: 5000,
            dismiss_duration_ms: 400,
        }
    }
}

impl AquaConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load from `aquascript.toml` in the current directory, or defaults
    pub fn load_or_default() -> Self {
        match Self::load(CONFIG_FILE) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!("Using default configuration: {}", err);
                Self::default()
            }
        }
    }

    /// Animation options with the configured default duration
    pub fn animation_options(&self) -> AnimationOptions {
        AnimationOptions::new().duration(self.animation.default_duration_ms)
    }

    /// Ripple options from the `[ripple]` section
    pub fn ripple_options(&self) -> RippleOptions {
        RippleOptions {
            color: self.ripple.color.clone(),
            duration_ms: self.ripple.duration_ms,
            class_name: self.ripple.class_name.clone(),
        }
    }
}

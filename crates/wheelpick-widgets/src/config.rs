#![forbid(unsafe_code)]

//! Per-selector configuration.
//!
//! Defaults match a plain selector: 100×100 items with no margin, nothing
//! selected up front, a 500 ms snap fail-safe, and a 200 ms full fade.
//!
//! With the `config-files` feature the config can be read from TOML or
//! JSON. Every field is optional in a file; missing fields take their
//! default.
//!
//! ```toml
//! item_height = 48.0
//! selected_index = 3
//!
//! [item_margin]
//! top = 2.0
//! bottom = 2.0
//! ```

#[cfg(feature = "config-files")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-files")]
use serde::{Deserialize, Serialize};
use wheelpick_core::geometry::Thickness;

use crate::error::ConfigError;
use crate::item::ItemLayout;

/// Accepted fail-safe range, in milliseconds.
pub const FAIL_SAFE_RANGE_MS: std::ops::RangeInclusive<u64> = 300..=500;

/// Longest accepted full-fade duration, in milliseconds.
pub const MAX_FADE_UNIT_MS: u64 = 2_000;

/// Sizing and timing for one selector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-files", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-files", serde(default))]
pub struct SelectorConfig {
    /// Height of each item.
    pub item_height: f64,
    /// Width of each item.
    pub item_width: f64,
    /// Spacing around each item.
    pub item_margin: Thickness,
    /// Item to select once items are present.
    pub selected_index: Option<usize>,
    /// Delay before a snap that never reported settling is finished anyway.
    pub fail_safe_delay_ms: u64,
    /// Duration of a full `0 → 1` opacity fade.
    pub fade_unit_ms: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item_height: 100.0,
            item_width: 100.0,
            item_margin: Thickness::default(),
            selected_index: None,
            fail_safe_delay_ms: 500,
            fade_unit_ms: 200,
        }
    }
}

impl SelectorConfig {
    #[must_use]
    pub fn item_size(mut self, width: f64, height: f64) -> Self {
        self.item_width = width;
        self.item_height = height;
        self
    }

    #[must_use]
    pub fn item_margin(mut self, margin: Thickness) -> Self {
        self.item_margin = margin;
        self
    }

    #[must_use]
    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = Some(index);
        self
    }

    #[must_use]
    pub fn fail_safe_delay(mut self, delay: Duration) -> Self {
        self.fail_safe_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn fade_unit(mut self, unit: Duration) -> Self {
        self.fade_unit_ms = u64::try_from(unit.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Layout every item is built with.
    #[must_use]
    pub fn item_layout(&self) -> ItemLayout {
        ItemLayout {
            height: self.item_height,
            width: self.item_width,
            margin: self.item_margin,
        }
    }

    #[must_use]
    pub fn fail_safe_duration(&self) -> Duration {
        Duration::from_millis(self.fail_safe_delay_ms)
    }

    #[must_use]
    pub fn fade_unit_duration(&self) -> Duration {
        Duration::from_millis(self.fade_unit_ms)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check every value is usable.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("item_height", self.item_height),
            ("item_width", self.item_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be finite and > 0, got {value}"));
            }
        }

        let margin = self.item_margin;
        for (side, value) in [
            ("left", margin.left),
            ("top", margin.top),
            ("right", margin.right),
            ("bottom", margin.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!(
                    "item_margin.{side} must be finite and >= 0, got {value}"
                ));
            }
        }

        if !FAIL_SAFE_RANGE_MS.contains(&self.fail_safe_delay_ms) {
            errors.push(format!(
                "fail_safe_delay_ms must be in {}..={}, got {}",
                FAIL_SAFE_RANGE_MS.start(),
                FAIL_SAFE_RANGE_MS.end(),
                self.fail_safe_delay_ms
            ));
        }

        if self.fade_unit_ms > MAX_FADE_UNIT_MS {
            errors.push(format!(
                "fade_unit_ms must be <= {MAX_FADE_UNIT_MS}, got {}",
                self.fade_unit_ms
            ));
        }

        errors
    }

    /// `self` if valid, otherwise every problem in one error.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid { errors })
        }
    }
}

//! Shared configuration types for the islet progress indicator.
//!
//! These types are serialized into the on-disk settings file and passed
//! across the core/host boundary, so they live in their own dependency-light
//! crate.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Color Type
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color as [r, g, b, a] bytes
pub type Color = [u8; 4];

/// Accent color tokens for the progress ring and glyphs
pub mod accent {
    use super::Color;

    /// Default brand accent (deep indigo)
    pub const BRAND: Color = [88, 86, 214, 255];
    pub const BLUE: Color = [10, 132, 255, 255];
    pub const GREEN: Color = [48, 209, 88, 255];
    pub const ORANGE: Color = [255, 159, 10, 255];
    pub const RED: Color = [255, 69, 58, 255];
    pub const WHITE: Color = [255, 255, 255, 255];

    /// Look up an accent token by its config key
    pub fn for_key(key: &str) -> Color {
        match key {
            "blue" => BLUE,
            "green" => GREEN,
            "orange" => ORANGE,
            "red" => RED,
            "white" => WHITE,
            _ => BRAND,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_title() -> String {
    "Your New File".to_string()
}
fn default_progress_glyph() -> String {
    "arrow.up".to_string()
}
fn default_completion_glyph() -> String {
    "clock.badge.checkmark.fill".to_string()
}
fn default_tint() -> Color {
    accent::BRAND
}
fn default_tick_ms() -> u64 {
    10
}
fn default_step_percent() -> f64 {
    0.4
}

// ─────────────────────────────────────────────────────────────────────────────
// Indicator Config
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable configuration supplied when an indicator is attached.
///
/// Glyph fields are icon identifiers resolved by the host's rendering layer;
/// the core never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Label shown in the expanded completion alert
    #[serde(default = "default_title")]
    pub title: String,
    /// Icon shown while progress is tracking
    #[serde(default = "default_progress_glyph")]
    pub progress_glyph: String,
    /// Icon shown in the completion alert
    #[serde(default = "default_completion_glyph")]
    pub completion_glyph: String,
    /// Accent color for the ring and progress glyph
    #[serde(default = "default_tint")]
    pub tint: Color,
    /// Rotate the progress glyph proportionally to progress
    #[serde(default)]
    pub rotation_enabled: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            progress_glyph: default_progress_glyph(),
            completion_glyph: default_completion_glyph(),
            tint: default_tint(),
            rotation_enabled: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted settings for the demo driver.
///
/// `tick_ms`/`step_percent` reproduce the host screen's sample producer: a
/// periodic timer adding `step_percent` percentage points per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub indicator: IndicatorConfig,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_step_percent")]
    pub step_percent: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            indicator: IndicatorConfig::default(),
            tick_ms: default_tick_ms(),
            step_percent: default_step_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_config_defaults_fill_missing_fields() {
        let config: IndicatorConfig = toml::from_str("title = \"Report.pdf\"").unwrap();
        assert_eq!(config.title, "Report.pdf");
        assert_eq!(config.progress_glyph, "arrow.up");
        assert_eq!(config.completion_glyph, "clock.badge.checkmark.fill");
        assert_eq!(config.tint, accent::BRAND);
        assert!(!config.rotation_enabled);
    }

    #[test]
    fn app_config_round_trips_through_toml() {
        let config = AppConfig {
            indicator: IndicatorConfig {
                tint: accent::GREEN,
                rotation_enabled: true,
                ..Default::default()
            },
            tick_ms: 25,
            step_percent: 1.0,
        };

        let text = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.indicator, config.indicator);
        assert_eq!(parsed.tick_ms, 25);
        assert_eq!(parsed.step_percent, 1.0);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.tick_ms, 10);
        assert_eq!(config.step_percent, 0.4);
        assert_eq!(config.indicator, IndicatorConfig::default());
    }

    #[test]
    fn accent_lookup_falls_back_to_brand() {
        assert_eq!(accent::for_key("green"), accent::GREEN);
        assert_eq!(accent::for_key("mauve"), accent::BRAND);
    }
}

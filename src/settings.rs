//! Session settings
//!
//! Everything the host decides once at startup: surface and sprite size,
//! colors, haptic pulse length, sensor rate and axis calibration. Missing
//! JSON fields fall back to the defaults.

use std::env::VarError;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::platform::input::{AxisMapping, SampleRate};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    /// Drawable surface width in pixels
    pub surface_width: u32,
    /// Drawable surface height in pixels
    pub surface_height: u32,
    /// Flat background color (ARGB)
    pub background_color: u32,

    // === Ball ===
    /// Sprite diameter in pixels
    pub sprite_diameter: u32,
    /// Sprite base color (ARGB)
    pub ball_color: u32,
    /// Sprite top-left corner at session start
    pub start_position: (f32, f32),

    // === Feedback ===
    /// Vibration length for a new border contact, in milliseconds
    pub haptic_pulse_ms: u64,

    // === Sensor ===
    pub sample_rate: SampleRate,
    /// Fixed calibration for how the sensor is mounted
    pub axis_mapping: AxisMapping,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            background_color: BACKGROUND_COLOR,

            sprite_diameter: SPRITE_DIAMETER,
            ball_color: BALL_COLOR,
            start_position: START_POSITION,

            haptic_pulse_ms: HAPTIC_PULSE.as_millis() as u64,

            sample_rate: SampleRate::Game,
            axis_mapping: AxisMapping::LANDSCAPE,
        }
    }
}

impl Settings {
    /// Environment variable holding a JSON settings override
    pub const ENV_VAR: &'static str = "METAL_BALL_SETTINGS";

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load the override from `METAL_BALL_SETTINGS`, or the defaults when unset
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_env_value(std::env::var(Self::ENV_VAR))
    }

    fn from_env_value(value: Result<String, VarError>) -> Result<Self, SettingsError> {
        match value {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", Self::ENV_VAR);
                Ok(settings)
            }
            Err(VarError::NotPresent) => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            Err(VarError::NotUnicode(_)) => Err(SettingsError::NotUnicode(Self::ENV_VAR)),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(SettingsError::Invalid {
                field: "surface",
                reason: "dimensions must be non-zero",
            });
        }
        if self.surface_width > MAX_SURFACE_SIDE || self.surface_height > MAX_SURFACE_SIDE {
            return Err(SettingsError::Invalid {
                field: "surface",
                reason: "dimensions must not exceed 16384",
            });
        }
        if self.sprite_diameter == 0 {
            return Err(SettingsError::Invalid {
                field: "sprite_diameter",
                reason: "must be non-zero",
            });
        }
        if self.sprite_diameter > MAX_SPRITE_DIAMETER {
            return Err(SettingsError::Invalid {
                field: "sprite_diameter",
                reason: "must not exceed 4096",
            });
        }
        if !self.start_position.0.is_finite() || !self.start_position.1.is_finite() {
            return Err(SettingsError::Invalid {
                field: "start_position",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.surface_width as f32, self.surface_height as f32)
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.start_position.0, self.start_position.1)
    }

    pub fn haptic_pulse(&self) -> Duration {
        Duration::from_millis(self.haptic_pulse_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_landscape_session() {
        let settings = Settings::default();
        assert_eq!(settings.start(), Vec2::new(10.0, 10.0));
        assert_eq!(settings.background_color, 0xFFAA_AAAA);
        assert_eq!(settings.haptic_pulse(), Duration::from_millis(100));
        assert_eq!(settings.sample_rate, SampleRate::Game);
        assert_eq!(settings.axis_mapping, AxisMapping::LANDSCAPE);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "surface_width": 1280, "axis_mapping": { "swap_axes": false, "invert_x": true, "invert_y": false } }"#,
        )
        .expect("valid json");
        assert_eq!(settings.surface_width, 1280);
        assert_eq!(settings.surface_height, SURFACE_HEIGHT);
        assert!(settings.axis_mapping.invert_x);
        assert!(!settings.axis_mapping.swap_axes);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            sample_rate: SampleRate::Ui,
            haptic_pulse_ms: 40,
            ..Default::default()
        };
        let json = settings.to_json().expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "surface_height": 0 }"#),
            Err(SettingsError::Invalid {
                field: "surface",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "surface_width": 100000 }"#),
            Err(SettingsError::Invalid {
                field: "surface",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "sprite_diameter": 70000 }"#),
            Err(SettingsError::Invalid {
                field: "sprite_diameter",
                ..
            })
        ));
        let largest = Settings::from_json(r#"{ "sprite_diameter": 4096, "surface_width": 16384 }"#)
            .expect("bounds are inclusive");
        assert_eq!(largest.sprite_diameter, MAX_SPRITE_DIAMETER);
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_env_value_handling() {
        assert_eq!(
            Settings::from_env_value(Err(VarError::NotPresent)).expect("defaults"),
            Settings::default()
        );
        let settings = Settings::from_env_value(Ok(r#"{ "haptic_pulse_ms": 25 }"#.into()))
            .expect("override");
        assert_eq!(settings.haptic_pulse(), Duration::from_millis(25));

        let garbled = Settings::from_env_value(Err(VarError::NotUnicode(
            std::ffi::OsString::from("{\"surface_width\": 1}"),
        )));
        assert!(matches!(
            garbled,
            Err(SettingsError::NotUnicode(var)) if var == Settings::ENV_VAR
        ));
        assert!(matches!(
            Settings::from_env_value(Ok(r#"{ "sprite_diameter": 0 }"#.into())),
            Err(SettingsError::Invalid { .. })
        ));
    }
}

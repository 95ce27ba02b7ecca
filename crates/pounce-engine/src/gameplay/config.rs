//! Tuning for the button course, loadable from JSON.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::router::InputSettings;
use super::jump::JumpConfig;
use super::locomotion::LocomotionConfig;
use super::trigger::ButtonConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse course config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    pub input: InputSettings,
    pub locomotion: LocomotionConfig,
    pub jump: JumpConfig,
    pub button: ButtonConfig,
    pub player_spawn: Vec3,
    pub button_position: Vec3,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            input: InputSettings::default(),
            locomotion: LocomotionConfig::default(),
            jump: JumpConfig::default(),
            button: ButtonConfig::default(),
            player_spawn: Vec3::new(0.0, 1.0, -3.0),
            button_position: Vec3::ZERO,
        }
    }
}

impl CourseConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the controllers cannot work with. An out-of-range
    /// `jump.jump_force` is clamped later rather than rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("locomotion.walking_speed", self.locomotion.walking_speed)?;
        non_negative("locomotion.running_speed", self.locomotion.running_speed)?;
        finite("jump.jump_force", self.jump.jump_force)?;
        non_negative("jump.grounded_velocity_threshold", self.jump.grounded_velocity_threshold)?;
        finite("button.power", self.button.power)?;
        finite("button.travel_distance", self.button.travel_distance)?;
        finite("button.travel_duration", self.button.travel_duration)?;
        non_negative("button.explosion_radius", self.button.explosion_radius)?;
        if !self.player_spawn.is_finite() {
            return Err(invalid("player_spawn", "must be finite"));
        }
        if !self.button_position.is_finite() {
            return Err(invalid("button_position", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = CourseConfig::from_json("{}").unwrap();
        assert_eq!(config, CourseConfig::default());
        assert_eq!(config.button.power, 2000.0);
        assert_eq!(config.jump.jump_force, 5.0);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = CourseConfig::from_json(
            r#"{ "input": { "invert_look_y": true }, "button": { "power": 500.0 } }"#,
        )
        .unwrap();
        assert!(config.input.invert_look_y);
        assert!(!config.input.invert_look_x);
        assert_eq!(config.button.power, 500.0);
        assert_eq!(config.button.travel_duration, 0.1);
    }

    #[test]
    fn rejects_negative_speed() {
        let err = CourseConfig::from_json(r#"{ "locomotion": { "walking_speed": -1.0 } }"#)
            .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "locomotion.walking_speed"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            CourseConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn survives_a_json_round_trip() {
        let mut config = CourseConfig::default();
        config.jump.jump_force = 7.5;
        let json = config.to_json().unwrap();
        assert_eq!(CourseConfig::from_json(&json).unwrap(), config);
    }
}

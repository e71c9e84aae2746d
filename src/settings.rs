//! Game settings and preferences
//!
//! Stored as JSON. Every field has a default, so a partial file (or `{}`)
//! is a valid settings file. Tuning values must be finite and non-negative.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::renderer::RenderMode;
use crate::tuning::{BallTuning, PhysicsTuning};

/// Output surface and pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Logical pixel buffer size
    pub width: u32,
    pub height: u32,
    /// Frame cap for the limiter
    pub target_fps: u32,
    pub render_mode: RenderMode,
    /// Text-mode presentation size (character cells)
    pub columns: usize,
    pub rows: usize,
    /// Log the measured frame rate
    pub show_fps: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
            target_fps: consts::TARGET_FPS,
            render_mode: RenderMode::Wireframe,
            columns: 80,
            rows: 30,
            show_fps: true,
        }
    }
}

/// Everything configurable, grouped by concern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsTuning,
    pub ball: BallTuning,
    pub display: DisplaySettings,
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// A tuning value that is negative or not finite
    Invalid { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::Invalid { field, value } => {
                write!(f, "{} must be finite and non-negative, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let physics = &self.physics;
        let ball = &self.ball;
        let fields = [
            ("physics.gravity", physics.gravity),
            ("physics.max_fall_speed", physics.max_fall_speed),
            ("physics.max_speed", physics.max_speed),
            ("physics.acceleration", physics.acceleration),
            ("physics.jump_speed", physics.jump_speed),
            ("ball.speed", ball.speed),
            ("ball.max_serve_angle", ball.max_serve_angle),
            ("ball.paddle_speed", ball.paddle_speed),
        ];
        match fields.into_iter().find(|&(_, v)| !v.is_finite() || v < 0.0) {
            Some((field, value)) => Err(SettingsError::Invalid { field, value }),
            None => Ok(()),
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.as_ref().display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pixel-arcade-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings =
            Settings::from_json(r#"{"physics": {"gravity": 10.0}, "display": {"render_mode": "Filled"}}"#)
                .unwrap();
        assert_eq!(settings.physics.gravity, 10.0);
        assert_eq!(settings.physics.max_speed, PhysicsTuning::default().max_speed);
        assert_eq!(settings.display.render_mode, RenderMode::Filled);
        assert_eq!(settings.ball, BallTuning::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(Settings::from_json("{nope"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_negative_tuning_rejected() {
        let err = Settings::from_json(r#"{"physics": {"max_speed": -5.0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "physics.max_speed", value } if value == -5.0));

        let err = Settings::from_json(r#"{"ball": {"paddle_speed": -1.0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "ball.paddle_speed", .. }));
    }

    #[test]
    fn test_non_finite_tuning_rejected() {
        let mut settings = Settings::default();
        settings.ball.max_serve_angle = f32::NAN;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "ball.max_serve_angle", .. })
        ));
        settings.ball.max_serve_angle = 0.5;
        settings.physics.gravity = f32::INFINITY;
        assert!(settings.validate().is_err());
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = temp_path("invalid");
        fs::write(&path, r#"{"physics": {"max_speed": -5.0}}"#).unwrap();
        let settings = Settings::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut settings = Settings::default();
        settings.ball.speed = 123.0;
        settings.display.columns = 40;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("missing");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let settings = Settings::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(settings, Settings::default());
    }
}

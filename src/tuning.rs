//! Data-driven game balance
//!
//! Units are world pixels and seconds; y grows downward, so gravity is
//! positive and a jump is a negative y velocity.

use serde::{Deserialize, Serialize};

/// Platformer movement constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration while airborne (px/s²)
    pub gravity: f32,
    /// Cap on downward velocity (px/s)
    pub max_fall_speed: f32,
    /// Cap on horizontal speed in either direction (px/s)
    pub max_speed: f32,
    /// Horizontal acceleration while a direction is held (px/s²)
    pub acceleration: f32,
    /// Initial upward speed of a jump (px/s)
    pub jump_speed: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            max_fall_speed: 900.0,
            max_speed: 240.0,
            acceleration: 1800.0,
            jump_speed: 620.0,
        }
    }
}

/// Ball-and-paddle constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Launch speed (px/s)
    pub speed: f32,
    /// Maximum launch angle away from straight up (radians)
    pub max_serve_angle: f32,
    /// Paddle tracking speed (px/s)
    pub paddle_speed: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            speed: 300.0,
            max_serve_angle: 0.6,
            paddle_speed: 420.0,
        }
    }
}

//! Pixel Arcade - software rasterizer and 2D arcade physics
//!
//! Core modules:
//! - `renderer`: Pixel buffers, Bresenham lines, wireframe mesh rendering
//! - `sim`: Rect collision, tile grids, per-axis motion resolution
//! - `platform`: Tick sources, frame timing, keyboard intent
//! - `settings`: JSON-backed configuration
//! - `tuning`: Data-driven game balance

pub mod math;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use math::{Axis, Vector2, Vector3};
pub use settings::{DisplaySettings, Settings, SettingsError};
pub use tuning::{BallTuning, PhysicsTuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Frame rate the limiter aims for
    pub const TARGET_FPS: u32 = 60;

    /// Default logical screen
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;

    /// Edge length of a square tile in world pixels
    pub const TILE_SIZE: i32 = 32;

    /// Platformer hero collider
    pub const HERO_WIDTH: f32 = 24.0;
    pub const HERO_HEIGHT: f32 = 30.0;

    /// Breakout pieces
    pub const BALL_SIZE: f32 = 8.0;
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    /// Distance from the bottom of the screen to the paddle's top edge
    pub const PADDLE_OFFSET: f32 = 40.0;
}

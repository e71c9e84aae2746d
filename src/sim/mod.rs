//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (row-major tile scans)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod resolve;
pub mod state;
pub mod tick;
pub mod tiles;

pub use collision::{CollisionMask, check_box_collision, check_collision};
pub use rect::AxisAlignedRect;
pub use resolve::{AxisReport, Contact, ObstacleSource, ResolvePolicy, resolve_axis_motion};
pub use state::{ActorIntent, MovingActor, Paddle};
pub use tick::{BallOutcome, BallReport, StepReport, step_ball, step_platformer};
pub use tiles::{Obstacle, Tile, TileCoord, TileGrid};

//! Fixed timestep simulation tick
//!
//! One call advances one mover by `dt`:
//! - [`step_platformer`]: input, jump, X pass, screen clamp, Y pass, gravity
//! - [`step_ball`]: reflective X and Y passes against bricks and the paddle

use super::resolve::{AxisReport, ResolvePolicy, resolve_axis_motion};
use super::state::{ActorIntent, MovingActor, Paddle};
use super::tiles::{Obstacle, Tile, TileCoord, TileGrid};
use crate::math::{Axis, Vector2};
use crate::tuning::PhysicsTuning;

/// Result of one platformer tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub x: AxisReport,
    pub y: AxisReport,
    /// Standing on something at the end of the tick
    pub grounded: bool,
    /// Pushed back inside the screen edges
    pub edge_clamped: bool,
    /// A jump started this tick
    pub jumped: bool,
}

/// Advance a platformer actor by one tick
///
/// Horizontal speed responds immediately: it accelerates while a direction
/// is held, stops dead when none is, and is clamped to `max_speed` every
/// tick. Gravity only accumulates while no floor was found this tick.
pub fn step_platformer(
    actor: &mut MovingActor,
    intent: &ActorIntent,
    grid: &TileGrid,
    tuning: &PhysicsTuning,
    screen_width: f32,
    dt: f32,
) -> StepReport {
    let mut report = StepReport::default();

    let direction = intent.direction();
    if direction == 0.0 {
        actor.vel.x = 0.0;
    } else {
        actor.vel.x += direction * tuning.acceleration * dt;
    }
    // A negative cap acts as its magnitude; NaN leaves the speed unclamped
    let max_speed = tuning.max_speed.abs();
    actor.vel.x = actor.vel.x.max(-max_speed).min(max_speed);

    if intent.jump && !actor.in_jump {
        actor.vel.y = -tuning.jump_speed;
        actor.in_jump = true;
        report.jumped = true;
    }

    report.x = resolve_axis_motion(actor, grid, Axis::X, ResolvePolicy::Stop, dt);

    let max_x = (screen_width - actor.size.x).max(0.0);
    if actor.pos.x < 0.0 || actor.pos.x > max_x {
        actor.pos.x = actor.pos.x.clamp(0.0, max_x);
        actor.vel.x = 0.0;
        report.edge_clamped = true;
    }

    report.y = resolve_axis_motion(actor, grid, Axis::Y, ResolvePolicy::Stop, dt);
    report.grounded = report.y.grounded;

    if !report.grounded {
        actor.vel.y = (actor.vel.y + tuning.gravity * dt).min(tuning.max_fall_speed);
        // Walking off a ledge counts as airborne too
        actor.in_jump = true;
    }

    report
}

/// Ball state after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallOutcome {
    #[default]
    InPlay,
    /// Fell past the bottom of the screen
    Lost,
}

/// Result of one ball tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallReport {
    /// Brick tiles struck this tick, in hit order, no duplicates
    pub bricks_hit: Vec<TileCoord>,
    pub paddle_hit: bool,
    pub wall_bounce: bool,
    pub outcome: BallOutcome,
}

/// Advance a ball by one tick
///
/// Bricks, solid tiles and the paddle all reflect. The left, right and top
/// screen edges reflect too; the bottom edge is open. Struck bricks are
/// reported, not removed; the caller owns scoring and brick removal.
pub fn step_ball(
    ball: &mut MovingActor,
    grid: &TileGrid,
    paddle: &Paddle,
    screen: Vector2<f32>,
    dt: f32,
) -> BallReport {
    let mut report = BallReport::default();
    let paddle_obstacle = [Obstacle::free(paddle.collider())];
    let obstacles = (grid, &paddle_obstacle[..]);

    let x = resolve_axis_motion(ball, &obstacles, Axis::X, ResolvePolicy::Reflect, dt);
    record_hits(&x, grid, &mut report);

    let max_x = (screen.x - ball.size.x).max(0.0);
    if ball.pos.x < 0.0 {
        ball.pos.x = 0.0;
        ball.vel.x = ball.vel.x.abs();
        report.wall_bounce = true;
    } else if ball.pos.x > max_x {
        ball.pos.x = max_x;
        ball.vel.x = -ball.vel.x.abs();
        report.wall_bounce = true;
    }

    let y = resolve_axis_motion(ball, &obstacles, Axis::Y, ResolvePolicy::Reflect, dt);
    record_hits(&y, grid, &mut report);

    if ball.pos.y < 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs();
        report.wall_bounce = true;
    }

    if ball.pos.y > screen.y {
        report.outcome = BallOutcome::Lost;
    }
    report
}

fn record_hits(pass: &AxisReport, grid: &TileGrid, report: &mut BallReport) {
    for contact in &pass.contacts {
        match contact.tile {
            Some(coord) if grid.get(coord) == Tile::Brick => {
                if !report.bricks_hit.contains(&coord) {
                    report.bricks_hit.push(coord);
                }
            }
            Some(_) => {}
            None => report.paddle_hit = true,
        }
    }
}

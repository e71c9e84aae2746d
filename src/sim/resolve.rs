//! Per-axis collision resolution
//!
//! A mover is advanced along one axis at a time. After each move the nearby
//! obstacles are gathered, tested with [`check_collision`], and any obstacle
//! struck on the face leading the motion pushes the mover back:
//! - [`ResolvePolicy::Stop`]: revert the move and zero that velocity component
//!   (landing snaps flush onto the obstacle instead)
//! - [`ResolvePolicy::Reflect`]: revert the move and negate that component
//!
//! Callers run X fully, then Y. Resolving axes one after the other avoids
//! diagonal ambiguity at the cost of occasionally sliding around a corner.

use super::collision::{CollisionMask, check_collision};
use super::rect::AxisAlignedRect;
use super::state::MovingActor;
use super::tiles::{Obstacle, TileCoord, TileGrid};
use crate::math::Axis;

/// What happens to velocity on impact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Platformer: halt against walls, land on floors
    Stop,
    /// Ball: bounce back
    Reflect,
}

/// Supplies candidate obstacles around a collider
pub trait ObstacleSource {
    fn gather(&self, collider: &AxisAlignedRect<f32>, out: &mut Vec<Obstacle>);
}

impl ObstacleSource for TileGrid {
    /// 3x3 tile neighborhood around the collider's center
    fn gather(&self, collider: &AxisAlignedRect<f32>, out: &mut Vec<Obstacle>) {
        self.neighborhood(collider.center(), out);
    }
}

impl ObstacleSource for [Obstacle] {
    fn gather(&self, _collider: &AxisAlignedRect<f32>, out: &mut Vec<Obstacle>) {
        out.extend_from_slice(self);
    }
}

impl<A, B> ObstacleSource for (&A, &B)
where
    A: ObstacleSource + ?Sized,
    B: ObstacleSource + ?Sized,
{
    fn gather(&self, collider: &AxisAlignedRect<f32>, out: &mut Vec<Obstacle>) {
        self.0.gather(collider, out);
        self.1.gather(collider, out);
    }
}

/// One obstacle that stopped or bounced the mover
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub rect: AxisAlignedRect<f32>,
    pub tile: Option<TileCoord>,
    pub mask: CollisionMask,
}

/// Outcome of a single axis pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisReport {
    /// Obstacles struck on the leading face
    pub contacts: Vec<Contact>,
    /// Landed on (or is resting on) an obstacle this pass
    pub grounded: bool,
}

impl AxisReport {
    pub fn blocked(&self) -> bool {
        !self.contacts.is_empty()
    }
}

/// Face of the mover that leads motion along `axis`
///
/// Under the stop policy a mover with zero vertical speed still checks its
/// bottom so a resting actor stays grounded.
fn leading_face(axis: Axis, velocity: f32, policy: ResolvePolicy) -> Option<CollisionMask> {
    match axis {
        Axis::X if velocity > 0.0 => Some(CollisionMask::RIGHT),
        Axis::X if velocity < 0.0 => Some(CollisionMask::LEFT),
        Axis::X => None,
        Axis::Y if velocity < 0.0 => Some(CollisionMask::TOP),
        Axis::Y if velocity > 0.0 => Some(CollisionMask::BOTTOM),
        Axis::Y => match policy {
            ResolvePolicy::Stop => Some(CollisionMask::BOTTOM),
            ResolvePolicy::Reflect => None,
        },
    }
}

/// Move `actor` along one axis by `vel[axis] * dt` and resolve collisions
pub fn resolve_axis_motion<S: ObstacleSource + ?Sized>(
    actor: &mut MovingActor,
    obstacles: &S,
    axis: Axis,
    policy: ResolvePolicy,
    dt: f32,
) -> AxisReport {
    let before = actor.pos.axis(axis);
    let velocity = actor.vel.axis(axis);
    *actor.pos.axis_mut(axis) = before + velocity * dt;

    let mut report = AxisReport::default();
    let Some(face) = leading_face(axis, velocity, policy) else {
        return report;
    };

    let collider = actor.collider();
    let mut candidates = Vec::with_capacity(9);
    obstacles.gather(&collider, &mut candidates);

    for obstacle in &candidates {
        let mask = check_collision(&collider, &obstacle.rect);
        if mask.contains(face) {
            report.contacts.push(Contact {
                rect: obstacle.rect,
                tile: obstacle.tile,
                mask,
            });
        }
    }
    if report.contacts.is_empty() {
        return report;
    }

    match policy {
        ResolvePolicy::Stop if face == CollisionMask::BOTTOM => {
            // Sit flush on the highest floor struck
            let floor = report
                .contacts
                .iter()
                .map(|c| c.rect.top())
                .fold(f32::INFINITY, f32::min);
            actor.pos.y = floor - actor.size.y;
            actor.vel.y = 0.0;
            actor.in_jump = false;
            report.grounded = true;
        }
        ResolvePolicy::Stop => {
            *actor.pos.axis_mut(axis) = before;
            *actor.vel.axis_mut(axis) = 0.0;
        }
        ResolvePolicy::Reflect => {
            *actor.pos.axis_mut(axis) = before;
            *actor.vel.axis_mut(axis) = -velocity;
        }
    }

    log::trace!(
        "{:?} pass on {:?}: {} contact(s), pos=({}, {})",
        policy,
        axis,
        report.contacts.len(),
        actor.pos.x,
        actor.pos.y
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    fn brick(x: f32, y: f32) -> Obstacle {
        Obstacle::free(AxisAlignedRect::new(x, y, 32.0, 16.0))
    }

    #[test]
    fn test_reflect_off_brick_to_the_right() {
        let bricks = [brick(110.0, 0.0)];
        let mut ball = MovingActor::new(Vector2::new(100.0, 4.0), Vector2::new(8.0, 8.0))
            .with_velocity(Vector2::new(5.0, 0.0));
        let before = ball.pos;

        let report = resolve_axis_motion(&mut ball, &bricks[..], Axis::X, ResolvePolicy::Reflect, 1.0);
        assert!(report.blocked());
        assert_eq!(ball.vel, Vector2::new(-5.0, 0.0));
        assert_eq!(ball.pos, before);

        let report = resolve_axis_motion(&mut ball, &bricks[..], Axis::Y, ResolvePolicy::Reflect, 1.0);
        assert!(!report.blocked());
        assert_eq!(ball.vel, Vector2::new(-5.0, 0.0));
    }

    #[test]
    fn test_stop_against_wall() {
        let wall = [Obstacle::free(AxisAlignedRect::new(50.0, 0.0, 32.0, 32.0))];
        let mut actor = MovingActor::new(Vector2::new(30.0, 10.0), Vector2::new(16.0, 16.0))
            .with_velocity(Vector2::new(100.0, 0.0));

        let report = resolve_axis_motion(&mut actor, &wall[..], Axis::X, ResolvePolicy::Stop, 0.1);
        assert!(report.blocked());
        assert_eq!(actor.pos.x, 30.0);
        assert_eq!(actor.vel.x, 0.0);
    }

    #[test]
    fn test_moving_away_from_touching_wall_is_free() {
        let wall = [Obstacle::free(AxisAlignedRect::new(50.0, 0.0, 32.0, 32.0))];
        let mut actor = MovingActor::new(Vector2::new(34.0, 10.0), Vector2::new(16.0, 16.0))
            .with_velocity(Vector2::new(-10.0, 0.0));

        let report = resolve_axis_motion(&mut actor, &wall[..], Axis::X, ResolvePolicy::Stop, 0.5);
        assert!(!report.blocked());
        assert_eq!(actor.pos.x, 29.0);
    }

    #[test]
    fn test_landing_snaps_flush() {
        let floor = [Obstacle::free(AxisAlignedRect::new(0.0, 100.0, 200.0, 32.0))];
        let mut actor = MovingActor::new(Vector2::new(20.0, 60.0), Vector2::new(16.0, 30.0))
            .with_velocity(Vector2::new(0.0, 300.0));
        actor.in_jump = true;

        let report = resolve_axis_motion(&mut actor, &floor[..], Axis::Y, ResolvePolicy::Stop, 0.05);
        assert!(report.grounded);
        assert_eq!(actor.pos.y, 70.0);
        assert_eq!(actor.vel.y, 0.0);
        assert!(!actor.in_jump);
    }

    #[test]
    fn test_head_bump_stops_rise() {
        let ceiling = [Obstacle::free(AxisAlignedRect::new(16.0, 0.0, 32.0, 32.0))];
        let mut actor = MovingActor::new(Vector2::new(20.0, 40.0), Vector2::new(16.0, 30.0))
            .with_velocity(Vector2::new(0.0, -400.0));

        let report = resolve_axis_motion(&mut actor, &ceiling[..], Axis::Y, ResolvePolicy::Stop, 0.05);
        assert!(report.blocked());
        assert!(!report.grounded);
        assert_eq!(actor.pos.y, 40.0);
        assert_eq!(actor.vel.y, 0.0);
    }

    #[test]
    fn test_grounded_actor_stable_with_zero_dt() {
        let floor = [Obstacle::free(AxisAlignedRect::new(0.0, 100.0, 200.0, 32.0))];
        let mut actor = MovingActor::new(Vector2::new(20.0, 70.0), Vector2::new(16.0, 30.0));

        for _ in 0..3 {
            let report = resolve_axis_motion(&mut actor, &floor[..], Axis::Y, ResolvePolicy::Stop, 0.0);
            assert!(report.grounded);
            assert_eq!(actor.pos, Vector2::new(20.0, 70.0));
            assert_eq!(actor.vel.y, 0.0);
        }
    }

    #[test]
    fn test_disabled_obstacle_ignored() {
        let obstacles = [Obstacle::free(AxisAlignedRect::EMPTY)];
        let mut actor = MovingActor::new(Vector2::ZERO, Vector2::new(10.0, 10.0))
            .with_velocity(Vector2::new(10.0, 10.0));
        let report = resolve_axis_motion(&mut actor, &obstacles[..], Axis::X, ResolvePolicy::Stop, 1.0);
        assert!(!report.blocked());
        assert_eq!(actor.pos.x, 10.0);
    }

    #[test]
    fn test_combined_sources() {
        let grid = TileGrid::from_rows(&["....", "..#.", "...."], 10);
        let extra = [brick(0.0, 10.0)];
        let mut out = Vec::new();
        let collider = AxisAlignedRect::new(12.0, 12.0, 4.0, 4.0);
        (&grid, &extra[..]).gather(&collider, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].tile, Some(TileCoord::new(2, 1)));
        assert_eq!(out[1].tile, None);
    }
}

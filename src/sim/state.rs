//! Simulation entities
//!
//! Positions are top-left corners in world pixels; colliders are rebuilt from
//! position every time they are needed, never stored.

use serde::{Deserialize, Serialize};

use super::rect::AxisAlignedRect;
use crate::math::Vector2;

/// Held-input state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorIntent {
    pub left: bool,
    pub right: bool,
    /// Jump requested this tick
    pub jump: bool,
}

impl ActorIntent {
    /// -1, 0 or 1; opposite directions cancel out
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Anything that moves and collides: the platformer hero, a ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingActor {
    pub pos: Vector2<f32>,
    pub vel: Vector2<f32>,
    /// Collider width/height
    pub size: Vector2<f32>,
    /// Set while airborne; cleared on landing so a new jump can start
    pub in_jump: bool,
}

impl MovingActor {
    pub fn new(pos: Vector2<f32>, size: Vector2<f32>) -> Self {
        Self {
            pos,
            vel: Vector2::ZERO,
            size,
            in_jump: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vector2<f32>) -> Self {
        self.vel = vel;
        self
    }

    /// Collider at the current position
    #[inline]
    pub fn collider(&self) -> AxisAlignedRect<f32> {
        AxisAlignedRect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vector2<f32> {
        self.pos + self.size * 0.5
    }
}

/// Horizontal paddle for the ball game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: AxisAlignedRect<f32>,
    /// Disabled paddles use a zero-area collider
    pub enabled: bool,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: AxisAlignedRect::new(x, y, width, height),
            enabled: true,
        }
    }

    /// Collider, or the zero-area sentinel while disabled
    pub fn collider(&self) -> AxisAlignedRect<f32> {
        if self.enabled {
            self.rect
        } else {
            AxisAlignedRect::EMPTY
        }
    }

    pub fn center_x(&self) -> f32 {
        self.rect.pos.x + self.rect.width() / 2.0
    }

    /// Slide toward `target_x` (paddle center) at up to `max_speed`, staying
    /// inside [0, screen_width]
    pub fn move_toward(&mut self, target_x: f32, dt: f32, max_speed: f32, screen_width: f32) {
        let delta = target_x - self.center_x();
        let max_delta = (max_speed * dt).abs();
        let clamped_delta = delta.max(-max_delta).min(max_delta);
        let max_x = (screen_width - self.rect.width()).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + clamped_delta).clamp(0.0, max_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_direction() {
        assert_eq!(ActorIntent::default().direction(), 0.0);
        let left = ActorIntent { left: true, ..Default::default() };
        assert_eq!(left.direction(), -1.0);
        let both = ActorIntent { left: true, right: true, ..Default::default() };
        assert_eq!(both.direction(), 0.0);
    }

    #[test]
    fn test_collider_follows_position() {
        let mut actor = MovingActor::new(Vector2::new(10.0, 20.0), Vector2::new(8.0, 16.0));
        assert_eq!(actor.collider().bottom(), 36.0);
        actor.pos.x = 50.0;
        assert_eq!(actor.collider().left(), 50.0);
        assert_eq!(actor.center(), Vector2::new(54.0, 28.0));
    }

    #[test]
    fn test_disabled_paddle_is_sentinel() {
        let mut paddle = Paddle::new(0.0, 100.0, 60.0, 10.0);
        assert!(!paddle.collider().is_empty());
        paddle.enabled = false;
        assert!(paddle.collider().is_empty());
    }

    #[test]
    fn test_paddle_move_toward_clamps() {
        let mut paddle = Paddle::new(100.0, 400.0, 60.0, 10.0);
        paddle.move_toward(1000.0, 0.1, 200.0, 640.0);
        assert!((paddle.rect.pos.x - 120.0).abs() < 1e-4);
        paddle.move_toward(10_000.0, 10.0, 10_000.0, 640.0);
        assert_eq!(paddle.rect.pos.x, 580.0);
        paddle.move_toward(-10_000.0, 10.0, 10_000.0, 640.0);
        assert_eq!(paddle.rect.pos.x, 0.0);
    }

    #[test]
    fn test_paddle_move_toward_tolerates_bad_speed() {
        let mut paddle = Paddle::new(20.0, 90.0, 10.0, 4.0);
        paddle.move_toward(50.0, 0.5, -4.0, 100.0);
        assert_eq!(paddle.rect.pos.x, 22.0);
        paddle.move_toward(50.0, 0.5, f32::NAN, 100.0);
        assert!(paddle.rect.pos.x.is_finite());
        assert!((0.0..=90.0).contains(&paddle.rect.pos.x));
    }
}

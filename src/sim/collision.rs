//! Rectangle overlap tests
//!
//! Two predicates with different granularity:
//! - [`check_collision`] reports which face of the moving rect made contact
//! - [`check_box_collision`] is a plain separating-axis overlap test

use bitflags::bitflags;

use super::rect::AxisAlignedRect;
use crate::math::Scalar;

bitflags! {
    /// Face of the moving rect that touched the obstacle
    ///
    /// `BOTTOM` means the mover's bottom met the obstacle's top (landing),
    /// `RIGHT` means the mover ran into the obstacle's left side, and so on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionMask: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// Overlap test with side classification
///
/// Rects overlap when their centers are within the half-extent sums on both
/// axes (touching counts). The side comes from comparing
/// `wy = half_width_sum * dy` against `hx = half_height_sum * dx`, which
/// picks the axis with the smaller relative penetration. Exact diagonal ties
/// resolve to `LEFT`/`RIGHT` below the obstacle's center and `BOTTOM` above it.
///
/// This is not a swept test: a fast mover that ends deep inside a corner may
/// be classified on the wrong side.
pub fn check_collision<T: Scalar>(a: &AxisAlignedRect<T>, b: &AxisAlignedRect<T>) -> CollisionMask {
    if a.is_empty() || b.is_empty() {
        return CollisionMask::empty();
    }

    // Everything is doubled so integer rects stay exact
    let w = a.width + b.width;
    let h = a.height + b.height;
    let ca = a.center2();
    let cb = b.center2();
    let dx = ca.x - cb.x;
    let dy = ca.y - cb.y;

    if dx.abs() > w || dy.abs() > h {
        return CollisionMask::empty();
    }

    let wy = w * dy;
    let hx = h * dx;

    if wy > hx {
        if wy > -hx {
            // Mover is below the obstacle
            CollisionMask::TOP
        } else {
            // Mover is left of the obstacle
            CollisionMask::RIGHT
        }
    } else if wy > -hx {
        CollisionMask::LEFT
    } else {
        CollisionMask::BOTTOM
    }
}

/// Separating-axis overlap test, no side information
///
/// Rects that merely share an edge do not overlap.
pub fn check_box_collision<T: Scalar>(a: &AxisAlignedRect<T>, b: &AxisAlignedRect<T>) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    !(a.bottom() <= b.top() || a.top() >= b.bottom() || a.right() <= b.left() || a.left() >= b.right())
}

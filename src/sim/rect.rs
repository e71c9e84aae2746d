//! Axis-aligned rectangles
//!
//! A rect is a top-left position plus a width and height. Width and height
//! are never negative; a rect with zero area is the "disabled" sentinel and
//! never collides with anything.

use serde::{Deserialize, Serialize};

use crate::math::{Scalar, Vector2};

/// Axis-aligned bounding box, y grows downward
///
/// Extents are only set through [`AxisAlignedRect::new`], deserialization
/// included, so they are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RectFields<T>", bound(deserialize = "T: Scalar + Deserialize<'de>"))]
pub struct AxisAlignedRect<T> {
    /// Top-left corner
    pub pos: Vector2<T>,
    pub(crate) width: T,
    pub(crate) height: T,
}

/// Serialized form, clamped on the way in
#[derive(Deserialize)]
struct RectFields<T> {
    pos: Vector2<T>,
    width: T,
    height: T,
}

impl<T: Scalar> From<RectFields<T>> for AxisAlignedRect<T> {
    fn from(fields: RectFields<T>) -> Self {
        Self::new(fields.pos.x, fields.pos.y, fields.width, fields.height)
    }
}

impl<T: Scalar> AxisAlignedRect<T> {
    /// Zero-area rect that never collides
    pub const EMPTY: Self = Self {
        pos: Vector2::ZERO,
        width: T::ZERO,
        height: T::ZERO,
    };

    /// Negative extents are clamped to zero
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        let clamp = |v: T| if v < T::ZERO { T::ZERO } else { v };
        Self {
            pos: Vector2::new(x, y),
            width: clamp(width),
            height: clamp(height),
        }
    }

    pub fn from_pos_size(pos: Vector2<T>, size: Vector2<T>) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> T {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> T {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> T {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> T {
        self.pos.y + self.height
    }

    #[inline]
    pub fn width(&self) -> T {
        self.width
    }

    #[inline]
    pub fn height(&self) -> T {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vector2<T> {
        Vector2::new(self.width, self.height)
    }

    /// True for the zero-area sentinel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= T::ZERO || self.height <= T::ZERO
    }

    /// Center scaled by two (exact for integer rects)
    #[inline]
    pub(crate) fn center2(&self) -> Vector2<T> {
        Vector2::new(
            self.pos.x + self.pos.x + self.width,
            self.pos.y + self.pos.y + self.height,
        )
    }
}

impl AxisAlignedRect<f32> {
    pub fn center(&self) -> Vector2<f32> {
        self.center2() * 0.5
    }
}

impl AxisAlignedRect<i32> {
    pub fn as_f32(&self) -> AxisAlignedRect<f32> {
        AxisAlignedRect {
            pos: self.pos.as_f32(),
            width: self.width as f32,
            height: self.height as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = AxisAlignedRect::new(10, 20, 5, 7);
        assert_eq!((r.left(), r.right(), r.top(), r.bottom()), (10, 15, 20, 27));
        assert_eq!(r.center2(), Vector2::new(25, 47));
    }

    #[test]
    fn test_negative_extent_clamped() {
        let r = AxisAlignedRect::new(0.0, 0.0, -3.0, 4.0);
        assert_eq!(r.width(), 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_deserialize_clamps_negative_extent() {
        let r: AxisAlignedRect<f32> =
            serde_json::from_str(r#"{"pos": {"x": 1.0, "y": 2.0}, "width": -4.0, "height": 3.0}"#).unwrap();
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 3.0);
        assert!(r.is_empty());

        let back: AxisAlignedRect<f32> = serde_json::from_str(&serde_json::to_string(&r).unwrap()).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(AxisAlignedRect::<f32>::EMPTY.is_empty());
        assert!(!AxisAlignedRect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_center_and_conversion() {
        let r = AxisAlignedRect::new(2, 4, 6, 8).as_f32();
        assert_eq!(r.center(), Vector2::new(5.0, 8.0));
    }
}

//! Generic 2D/3D vectors shared by the rasterizer and the resolver
//!
//! One vector type for every scalar kind:
//! - `Vector2<i32>` for screen pixels and tile coordinates
//! - `Vector2<f32>` for physics positions and velocities
//! - `Vector3<f32>` for mesh vertices
//!
//! Conversions between integer and float vectors are always explicit
//! (`as_f32`, `floor_to_i32`, `trunc_to_i32`), so nothing silently shifts a
//! pixel endpoint.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Numeric component type of a vector
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn abs(self) -> Self;
}

/// Scalars with a square root
pub trait Real: Scalar {
    fn sqrt(self) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty => $zero:expr, $one:expr);* $(;)?) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = $zero;
                const ONE: Self = $one;

                #[inline]
                fn abs(self) -> Self {
                    <$t>::abs(self)
                }
            }
        )*
    };
}

impl_scalar! {
    i32 => 0, 1;
    i64 => 0, 1;
    f32 => 0.0, 1.0;
    f64 => 0.0, 1.0;
}

impl Real for f32 {
    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }
}

impl Real for f64 {
    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
}

/// 2D vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

/// 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Vector2<T> {
    pub const ZERO: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
    };

    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Component-wise product
    #[inline]
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    #[inline]
    pub fn axis(self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[inline]
    pub fn axis_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl<T: Real> Vector2<T> {
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Unit vector, or zero for a zero-length input
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len == T::ZERO {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }
}

impl<T: Scalar> Vector3<T> {
    pub const ZERO: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
        z: T::ZERO,
    };

    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise product
    #[inline]
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Drop the z component
    #[inline]
    pub fn xy(self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }
}

impl<T: Real> Vector3<T> {
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Unit vector, or zero for a zero-length input
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len == T::ZERO {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len, self.z / len)
    }
}

/// Axis selector for per-axis resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

macro_rules! impl_vector_ops {
    ($name:ident { $($field:ident),+ }) => {
        impl<T: Scalar> Add for $name<T> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl<T: Scalar> Sub for $name<T> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl<T: Scalar> Mul<T> for $name<T> {
            type Output = Self;
            #[inline]
            fn mul(self, s: T) -> Self {
                Self { $($field: self.$field * s),+ }
            }
        }

        impl<T: Scalar> Neg for $name<T> {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl<T: Scalar> AddAssign for $name<T> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<T: Scalar> SubAssign for $name<T> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }
    };
}

impl_vector_ops!(Vector2 { x, y });
impl_vector_ops!(Vector3 { x, y, z });

// Boundary conversions between pixel space and physics space

impl Vector2<i32> {
    #[inline]
    pub fn as_f32(self) -> Vector2<f32> {
        Vector2::new(self.x as f32, self.y as f32)
    }
}

impl Vector2<f32> {
    /// Round toward negative infinity (world -> tile/pixel cell)
    #[inline]
    pub fn floor_to_i32(self) -> Vector2<i32> {
        Vector2::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Round toward zero
    #[inline]
    pub fn trunc_to_i32(self) -> Vector2<i32> {
        Vector2::new(self.x as i32, self.y as i32)
    }
}

impl From<Vector2<f32>> for glam::Vec2 {
    fn from(v: Vector2<f32>) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

impl From<glam::Vec2> for Vector2<f32> {
    fn from(v: glam::Vec2) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Vector3<f32>> for glam::Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<glam::Vec3> for Vector3<f32> {
    fn from(v: glam::Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_arithmetic() {
        let a = Vector2::new(3, -4);
        let b = Vector2::new(1, 2);
        assert_eq!(a + b, Vector2::new(4, -2));
        assert_eq!(a - b, Vector2::new(2, -6));
        assert_eq!(a * 2, Vector2::new(6, -8));
        assert_eq!(-a, Vector2::new(-3, 4));
        assert_eq!(a.mul_elem(b), Vector2::new(3, -8));
        assert_eq!(a.dot(b), -5);
        assert_eq!(a.length_squared(), 25);
        assert_eq!(a.abs(), Vector2::new(3, 4));
    }

    #[test]
    fn test_vector2_length_and_normalize() {
        let v = Vector2::new(3.0_f32, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
        let n = v.normalize_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert_eq!(Vector2::<f32>::ZERO.normalize_or_zero(), Vector2::ZERO);
    }

    #[test]
    fn test_vector3_cross_and_dot() {
        let x = Vector3::new(1.0_f32, 0.0, 0.0);
        let y = Vector3::new(0.0_f32, 1.0, 0.0);
        assert_eq!(x.cross(y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(y), 0.0);

        let a = Vector3::new(1, 2, 3);
        let b = Vector3::new(4, 5, 6);
        assert_eq!(a.dot(b), 32);
        assert_eq!(a.cross(b), Vector3::new(-3, 6, -3));
    }

    #[test]
    fn test_explicit_conversions() {
        let v = Vector2::new(-0.5_f32, 2.9);
        assert_eq!(v.floor_to_i32(), Vector2::new(-1, 2));
        assert_eq!(v.trunc_to_i32(), Vector2::new(0, 2));
        assert_eq!(Vector2::new(7, -3).as_f32(), Vector2::new(7.0, -3.0));
    }

    #[test]
    fn test_axis_access() {
        let mut v = Vector2::new(1.0_f32, 2.0);
        assert_eq!(v.axis(Axis::Y), 2.0);
        *v.axis_mut(Axis::X) = 5.0;
        assert_eq!(v.x, 5.0);
    }

    #[test]
    fn test_glam_roundtrip() {
        let v = Vector3::new(1.0_f32, -2.0, 0.5);
        let g: glam::Vec3 = v.into();
        assert_eq!(Vector3::from(g), v);
    }
}

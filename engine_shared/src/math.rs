//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! The only rotation primitive is a yaw about the vertical axis; the walker
//! never pitches or rolls.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// How far [`Line::extend`] pushes each endpoint, in multiples of the segment.
const EXTEND_FACTOR: f64 = 100.0;

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Componentwise product.
    pub fn mul_elements(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn len_sq(self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f64 {
        self.len_sq().sqrt()
    }

    /// Unit vector in the same direction, or [`Vec3::ZERO`] for the zero vector.
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Unit vector in the same direction; fails on a zero (or non-finite) length.
    pub fn try_normalize(self) -> Result<Self, GeometryError> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            return Err(GeometryError::ZeroLength);
        }
        Ok(self.scale(1.0 / mag))
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Rotates the point about the vertical axis through `pivot` by `yaw_deg`.
    ///
    /// `y` is left untouched, so distances from the pivot in the x/z plane
    /// are preserved.
    pub fn rotate_around(self, pivot: Self, yaw_deg: f64) -> Self {
        let (s, c) = yaw_deg.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dz = self.z - pivot.z;
        Self::new(
            dx * c - dz * s + pivot.x,
            self.y,
            dx * s + dz * c + pivot.z,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

/// A segment between two points, treated as an infinite line by [`Line::intersect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: Vec3,
    pub b: Vec3,
}

impl Line {
    pub const fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Stretches both endpoints far outward along the segment direction.
    pub fn extend(self) -> Self {
        let change = (self.a - self.b).scale(EXTEND_FACTOR);
        Self::new(self.a + change, self.b - change)
    }

    /// Intersection of the two lines in the x/z plane, as `(x, z)`.
    ///
    /// Uses the determinant form; parallel or degenerate lines have a zero
    /// denominator and are reported as [`GeometryError::ParallelLines`].
    pub fn intersect(&self, other: &Line) -> Result<(f64, f64), GeometryError> {
        fn det(a: (f64, f64), b: (f64, f64)) -> f64 {
            a.0 * b.1 - a.1 * b.0
        }

        let xdiff = (self.a.x - self.b.x, other.a.x - other.b.x);
        let zdiff = (self.a.z - self.b.z, other.a.z - other.b.z);

        let div = det(xdiff, zdiff);
        if div == 0.0 || !div.is_finite() {
            return Err(GeometryError::ParallelLines);
        }

        let d = (
            det((self.a.x, self.a.z), (self.b.x, self.b.z)),
            det((other.a.x, other.a.z), (other.b.x, other.b.z)),
        );
        Ok((det(d, xdiff) / div, det(d, zdiff) / div))
    }
}

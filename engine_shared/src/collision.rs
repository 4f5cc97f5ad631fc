//! Sphere-vs-shape overlap.
//!
//! Every query is a probe [`Sphere`] against one [`Collider`]. The answer is a
//! signed penetration depth: positive means overlapping by that much, zero or
//! negative means touching or apart.
//!
//! Plane, slope and wall footprints are rectangles in the shape's own frame.
//! `position` is a corner of the footprint, and `yaw` turns the footprint
//! about that corner. A probe is brought into the local frame by rotating its
//! center by `-yaw` about the corner.

use serde::{Deserialize, Serialize};

use crate::{error::GeometryError, math::Vec3};

/// Probe or solid ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f64,
}

impl Sphere {
    pub const fn new(position: Vec3, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Signed penetration depth against `shape`.
    pub fn overlap(&self, shape: &Collider) -> f64 {
        let r = self.radius;
        match *shape {
            Collider::Sphere(other) => (r + other.radius) - self.position.distance(other.position),
            Collider::Plane {
                position,
                yaw,
                extent_x,
                extent_z,
            } => {
                let p = self.position.rotate_around(position, -yaw);
                if strictly_within(p.x, position.x, extent_x)
                    && strictly_within(p.z, position.z, extent_z)
                {
                    return r - (p.y - position.y).abs();
                }
                let nearest = Vec3::new(
                    clamp_to(p.x, position.x, extent_x),
                    position.y,
                    clamp_to(p.z, position.z, extent_z),
                );
                r - p.distance(nearest)
            }
            Collider::Slope {
                position,
                yaw,
                extent_x,
                extent_z,
                slope,
            } => {
                let p = self.position.rotate_around(position, -yaw);
                let surface = |z: f64| position.y + slope * (z - position.z);
                if strictly_within(p.x, position.x, extent_x)
                    && strictly_within(p.z, position.z, extent_z)
                {
                    return r - (p.y - surface(p.z)).abs();
                }
                let z = clamp_to(p.z, position.z, extent_z);
                let nearest = Vec3::new(clamp_to(p.x, position.x, extent_x), surface(z), z);
                r - p.distance(nearest)
            }
            Collider::Wall {
                position,
                yaw,
                extent_x,
                extent_y,
            } => {
                let p = self.position.rotate_around(position, -yaw);
                if strictly_within(p.x, position.x, extent_x)
                    && strictly_within(p.y, position.y, extent_y)
                {
                    return r - (p.z - position.z).abs();
                }
                let nearest = Vec3::new(
                    clamp_to(p.x, position.x, extent_x),
                    clamp_to(p.y, position.y, extent_y),
                    position.z,
                );
                r - p.distance(nearest)
            }
        }
    }

    /// First shape in `shapes` this probe penetrates.
    ///
    /// Order matters: callers sort by descending overlap beforehand so the
    /// deepest candidate is checked first.
    pub fn is_colliding<'a>(&self, shapes: &'a [Collider]) -> Option<Contact<'a>> {
        shapes.iter().find_map(|shape| {
            let depth = self.overlap(shape);
            (depth > 0.0).then_some(Contact {
                collider: shape,
                depth,
            })
        })
    }

    /// Stable sort of `shapes` by descending overlap against this probe.
    ///
    /// Equal overlaps keep their existing relative order.
    pub fn sort_by_overlap(&self, shapes: &mut [Collider]) {
        shapes.sort_by(|a, b| self.overlap(b).total_cmp(&self.overlap(a)));
    }
}

/// A positive-overlap hit returned by [`Sphere::is_colliding`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact<'a> {
    pub collider: &'a Collider,
    pub depth: f64,
}

/// Solid shape in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Collider {
    Sphere(Sphere),
    /// Horizontal rectangle at `position.y`.
    Plane {
        position: Vec3,
        yaw: f64,
        extent_x: f64,
        extent_z: f64,
    },
    /// Rectangle whose height rises by `slope` per unit of local z.
    Slope {
        position: Vec3,
        yaw: f64,
        extent_x: f64,
        extent_z: f64,
        slope: f64,
    },
    /// Vertical rectangle in the local constant-z plane.
    Wall {
        position: Vec3,
        yaw: f64,
        extent_x: f64,
        extent_y: f64,
    },
}

impl Collider {
    pub fn is_wall(&self) -> bool {
        matches!(self, Collider::Wall { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Collider::Sphere(_) => "sphere",
            Collider::Plane { .. } => "plane",
            Collider::Slope { .. } => "slope",
            Collider::Wall { .. } => "wall",
        }
    }

    /// World-space unit normal of a wall's face (its local +z axis).
    pub fn wall_normal(&self) -> Option<Vec3> {
        match *self {
            Collider::Wall { yaw, .. } => Some(Vec3::FORWARD.rotate_around(Vec3::ZERO, yaw)),
            _ => None,
        }
    }

    /// Which side of a wall `point` lies on: `1.0` for the +z side, `-1.0` otherwise.
    pub fn wall_side(&self, point: Vec3) -> Option<f64> {
        match *self {
            Collider::Wall { position, yaw, .. } => {
                let local = point.rotate_around(position, -yaw);
                Some(if local.z > position.z { 1.0 } else { -1.0 })
            }
            _ => None,
        }
    }

    /// Rejects shapes that would feed NaNs or empty footprints into the physics step.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let (position, yaw, dims) = match *self {
            Collider::Sphere(s) => (s.position, 0.0, [s.radius, s.radius]),
            Collider::Plane {
                position,
                yaw,
                extent_x,
                extent_z,
            } => (position, yaw, [extent_x, extent_z]),
            Collider::Slope {
                position,
                yaw,
                extent_x,
                extent_z,
                slope,
            } => {
                if !slope.is_finite() {
                    return Err(GeometryError::DegenerateCollider {
                        reason: "slope is not finite",
                    });
                }
                (position, yaw, [extent_x, extent_z])
            }
            Collider::Wall {
                position,
                yaw,
                extent_x,
                extent_y,
            } => (position, yaw, [extent_x, extent_y]),
        };
        if !position.is_finite() || !yaw.is_finite() {
            return Err(GeometryError::DegenerateCollider {
                reason: "position or yaw is not finite",
            });
        }
        if dims.iter().any(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(GeometryError::DegenerateCollider {
                reason: "extent or radius must be positive",
            });
        }
        Ok(())
    }
}

fn strictly_within(v: f64, start: f64, extent: f64) -> bool {
    start < v && v < start + extent
}

fn clamp_to(v: f64, start: f64, extent: f64) -> f64 {
    v.clamp(start, start + extent)
}

//! Near-plane clipping of camera-space polygon rings.
//!
//! Each vertex of the input ring is classified against its two neighbors in
//! the *input* ring, and the result is appended to a fresh output ring:
//!
//! | vertex      | prev visible | next visible | output                               |
//! |-------------|--------------|--------------|--------------------------------------|
//! | `z > near`  | any          | any          | the vertex                           |
//! | `z <= near` | yes          | yes          | two points: toward prev, toward next |
//! | `z <= near` | no           | yes          | one point toward next                |
//! | `z <= near` | yes          | no           | one point toward prev                |
//! | `z <= near` | no           | no           | nothing                              |
//!
//! A point "toward" a neighbor lies on the edge to that neighbor at depth
//! `near`. Its x comes from intersecting the extended edge with the clip line
//! in the x/z plane; its y is interpolated along the edge.

use crate::{
    error::GeometryError,
    math::{Line, Vec3},
};

/// Half-width of the clip line segment before it is extended.
const CLIP_LINE_HALF_WIDTH: f64 = 20.0;

/// Output of [`clip_near`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClippedRing {
    pub points: Vec<Vec3>,
    /// True when at least one input vertex was in front of the near plane.
    pub visible: bool,
}

impl ClippedRing {
    pub fn is_drawable(&self) -> bool {
        self.visible && !self.points.is_empty()
    }
}

/// Clips a camera-space ring against the plane `z = near`.
pub fn clip_near(ring: &[Vec3], near: f64) -> Result<ClippedRing, GeometryError> {
    let n = ring.len();
    let mut out = ClippedRing {
        points: Vec::with_capacity(n + 2),
        visible: false,
    };

    for i in 0..n {
        let cur = ring[i];
        let prev = ring[(i + n - 1) % n];
        let next = ring[(i + 1) % n];

        if cur.z > near {
            out.visible = true;
            out.points.push(cur);
            continue;
        }

        match (prev.z > near, next.z > near) {
            (true, true) => {
                out.points.push(toward(cur, prev, near)?);
                out.points.push(toward(cur, next, near)?);
            }
            (false, true) => out.points.push(toward(cur, next, near)?),
            (true, false) => out.points.push(toward(cur, prev, near)?),
            (false, false) => {}
        }
    }

    Ok(out)
}

/// Point on the edge `cur -> neighbor` at depth `near`.
fn toward(cur: Vec3, neighbor: Vec3, near: f64) -> Result<Vec3, GeometryError> {
    let on_plane = Vec3::new(cur.x, cur.y, near);
    let clip_line = Line::new(
        on_plane + Vec3::new(CLIP_LINE_HALF_WIDTH, 0.0, 0.0),
        on_plane - Vec3::new(CLIP_LINE_HALF_WIDTH, 0.0, 0.0),
    )
    .extend();
    let edge = Line::new(cur, neighbor).extend();
    let (x, _) = clip_line.intersect(&edge)?;

    let t = (near - cur.z) / (neighbor.z - cur.z);
    if !t.is_finite() {
        return Err(GeometryError::ParallelLines);
    }
    Ok(Vec3::new(x, cur.y + (neighbor.y - cur.y) * t, near))
}

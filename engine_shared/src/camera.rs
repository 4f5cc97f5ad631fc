//! The player camera.
//!
//! The camera is the only entity that changes from frame to frame. It also
//! carries the movement smoothing state so the physics step needs no globals.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Heading in degrees about the vertical axis.
    pub yaw: f64,
    /// Half-width of the visible window in projected units.
    pub zoom: f64,
    /// Smoothed (forward, strafe, vertical) motion per frame.
    pub acceleration: Vec3,
    /// Smoothed yaw change per frame, in degrees.
    pub angular_velocity: f64,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f64, zoom: f64) -> Self {
        Self {
            position,
            yaw,
            zoom,
            acceleration: Vec3::ZERO,
            angular_velocity: 0.0,
        }
    }

    /// Unit heading vector in the x/z plane.
    pub fn forward(&self) -> Vec3 {
        Vec3::FORWARD.rotate_around(Vec3::ZERO, self.yaw)
    }

    /// Strafe axis: forward turned a quarter turn.
    pub fn right(&self) -> Vec3 {
        self.forward().rotate_around(Vec3::ZERO, 90.0)
    }

    /// World point in camera space, where `z` is depth in front of the eye.
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        world.rotate_around(self.position, -self.yaw) - self.position
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 1.0)
    }
}

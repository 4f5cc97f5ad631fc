//! Configuration system.
//!
//! Loads engine configuration from JSON strings/files. Every field has a
//! default, so `{}` is a complete config.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{camera::Camera, math::Vec3, physics::PhysicsConfig, render::RenderConfig};

/// Root configuration for the walker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed frame rate.
    #[serde(default = "default_frame_hz")]
    pub frame_hz: u32,
    /// Directory holding `<name>.obj` scene files.
    #[serde(default = "default_objects_dir")]
    pub objects_dir: String,
    /// Directory holding `<name>.tur` sprite scripts.
    #[serde(default = "default_sprites_dir")]
    pub sprites_dir: String,
    /// Root scene name, resolved against `objects_dir`.
    #[serde(default = "default_scene")]
    pub scene: String,
    /// Objects the place buttons drop at the camera, in button order.
    #[serde(default = "default_placeables")]
    pub placeables: Vec<String>,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_frame_hz() -> u32 {
    50
}

fn default_objects_dir() -> String {
    "Objects".to_string()
}

fn default_sprites_dir() -> String {
    "Sprites".to_string()
}

fn default_scene() -> String {
    "map1".to_string()
}

fn default_placeables() -> Vec<String> {
    vec!["cube".to_string(), "ramp".to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_hz: default_frame_hz(),
            objects_dir: default_objects_dir(),
            sprites_dir: default_sprites_dir(),
            scene: default_scene(),
            placeables: default_placeables(),
            camera: CameraConfig::default(),
            physics: PhysicsConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse config {}", path.display()))
    }
}

/// Starting camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Degrees.
    pub yaw: f64,
    pub zoom: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 7.0, -3.0),
            yaw: -89.0,
            zoom: 1.0,
        }
    }
}

impl CameraConfig {
    pub fn build(&self) -> Camera {
        Camera::new(self.position, self.yaw, self.zoom)
    }
}

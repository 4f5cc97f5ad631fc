//! `engine_shared`
//!
//! Core libraries for the first-person walker.
//!
//! Design goals:
//! - Deterministic: the same scene, config and button sequence produce the
//!   same frames.
//! - Clear separation of concerns (math, scene, collision, physics, render).
//! - Traits at the seams: drawing surface, scene source, physics backend.
//! - No `unsafe`.

pub mod camera;
pub mod clip;
pub mod collision;
pub mod config;
pub mod error;
pub mod input;
pub mod loader;
pub mod math;
pub mod physics;
pub mod render;
pub mod scene;
pub mod sprite;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::camera::Camera;
    pub use crate::collision::{Collider, Sphere};
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::input::Buttons;
    pub use crate::loader::{load_scene, DirSource, MemorySource, SceneLoader, SceneSource};
    pub use crate::math::*;
    pub use crate::physics::{backend_for, MovementMode, PhysicsBackend, PhysicsConfig, StepReport};
    pub use crate::render::{Canvas, FrameStats, NullCanvas, RecordingCanvas, RenderConfig, Renderer};
    pub use crate::scene::{Polygon, Rgb, Scene, SceneItem, Sprite};
}

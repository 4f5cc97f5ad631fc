//! Player movement.
//!
//! One call to [`PhysicsBackend::step`] per frame turns the held buttons into
//! a new camera position and heading. Walking keeps a ground probe sphere
//! above the floor and a wall probe sphere outside walls; flying ignores both.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    camera::Camera,
    collision::{Collider, Sphere},
    input::Buttons,
    math::Vec3,
};

/// Movement style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    #[default]
    Walk,
    Fly,
}

/// Physics parameters. All rates are per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub mode: MovementMode,
    /// Added to the vertical motion every airborne frame.
    pub gravity: f64,
    pub move_step: f64,
    /// Degrees per frame.
    pub turn_step: f64,
    pub run_multiplier: f64,
    pub move_smoothing: f64,
    pub turn_smoothing: f64,
    pub fly_smoothing: f64,
    /// Flight moves toward `fly_gain` times the walking step.
    pub fly_gain: f64,
    pub ground_probe_offset: Vec3,
    pub ground_probe_radius: f64,
    pub wall_probe_offset: Vec3,
    pub wall_probe_radius: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mode: MovementMode::Walk,
            gravity: -0.01,
            move_step: 0.1,
            turn_step: 4.0,
            run_multiplier: 1.5,
            move_smoothing: 0.15,
            turn_smoothing: 0.2,
            fly_smoothing: 1.0,
            fly_gain: 2.0,
            ground_probe_offset: Vec3::new(0.0, -1.5, 0.0),
            ground_probe_radius: 0.4,
            wall_probe_offset: Vec3::new(0.0, -1.3, 0.0),
            wall_probe_radius: 0.5,
        }
    }
}

/// Low-pass filter shared by every smoothed axis: `(prev + target*k) / (1+k)`.
pub fn smooth(prev: f64, target: f64, k: f64) -> f64 {
    (prev + target * k) / (1.0 + k)
}

/// Raw per-frame intents decoded from the held buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    pub forward: f64,
    pub strafe: f64,
    pub vertical: f64,
    pub turn: f64,
    pub speed: f64,
}

impl MoveIntent {
    pub fn from_buttons(buttons: Buttons, cfg: &PhysicsConfig) -> Self {
        Self {
            forward: cfg.move_step * buttons.axis(Buttons::FORWARD, Buttons::BACK),
            strafe: cfg.move_step * buttons.axis(Buttons::STRAFE_LEFT, Buttons::STRAFE_RIGHT),
            vertical: cfg.move_step * buttons.axis(Buttons::UP, Buttons::DOWN),
            turn: cfg.turn_step * buttons.axis(Buttons::TURN_LEFT, Buttons::TURN_RIGHT),
            speed: if buttons.contains(Buttons::RUN) {
                cfg.run_multiplier
            } else {
                1.0
            },
        }
    }
}

/// Ground probe hit that held the walker up this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub kind: &'static str,
    pub depth: f64,
}

/// What a physics step observed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    pub ground: Option<GroundContact>,
    pub wall_push: Option<Vec3>,
}

impl StepReport {
    pub fn grounded(&self) -> bool {
        self.ground.is_some()
    }
}

/// Physics stepper trait.
pub trait PhysicsBackend: Send + Sync {
    /// Advances `camera` by one frame. May reorder `colliders`.
    fn step(&mut self, camera: &mut Camera, buttons: Buttons, colliders: &mut [Collider])
        -> StepReport;
}

/// Builds the backend for `cfg.mode`.
pub fn backend_for(cfg: PhysicsConfig) -> Box<dyn PhysicsBackend> {
    match cfg.mode {
        MovementMode::Walk => Box::new(WalkPhysics::new(cfg)),
        MovementMode::Fly => Box::new(FlyPhysics::new(cfg)),
    }
}

/// Walking with gravity, ground snapping and wall push-out.
#[derive(Debug, Clone, Default)]
pub struct WalkPhysics {
    pub config: PhysicsConfig,
}

impl WalkPhysics {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }
}

impl PhysicsBackend for WalkPhysics {
    fn step(
        &mut self,
        camera: &mut Camera,
        buttons: Buttons,
        colliders: &mut [Collider],
    ) -> StepReport {
        let cfg = &self.config;
        let intent = MoveIntent::from_buttons(buttons, cfg);
        let mut report = StepReport::default();

        // Both probes sit where the camera is before this frame's move.
        let ground = Sphere::new(
            camera.position + cfg.ground_probe_offset,
            cfg.ground_probe_radius,
        );
        let wall_probe = Sphere::new(camera.position + cfg.wall_probe_offset, cfg.wall_probe_radius);
        ground.sort_by_overlap(colliders);

        let mut vertical = camera.acceleration.z;
        match ground.is_colliding(colliders) {
            None => vertical += cfg.gravity,
            Some(hit) if !hit.collider.is_wall() => {
                // Damped snap: climb out by half the penetration each frame.
                vertical = hit.depth / 2.0;
                report.ground = Some(GroundContact {
                    kind: hit.collider.kind(),
                    depth: hit.depth,
                });
            }
            Some(_) => {}
        }

        // The vertical target is the post-contact value itself, so only the
        // planar axes and the heading are filtered.
        camera.acceleration = Vec3::new(
            smooth(camera.acceleration.x, intent.forward, cfg.move_smoothing),
            smooth(camera.acceleration.y, intent.strafe, cfg.move_smoothing),
            vertical,
        );
        camera.angular_velocity = smooth(camera.angular_velocity, intent.turn, cfg.turn_smoothing);

        integrate(camera, intent.speed);

        if let Some(hit) = wall_probe.is_colliding(colliders) {
            if let (Some(normal), Some(side)) = (
                hit.collider.wall_normal(),
                hit.collider.wall_side(wall_probe.position),
            ) {
                let push = normal.scale(side * hit.depth);
                camera.position += push;
                report.wall_push = Some(push);
            }
        }

        trace!(
            position = ?camera.position,
            yaw = camera.yaw,
            grounded = report.grounded(),
            pushed = report.wall_push.is_some(),
            "walk step"
        );
        report
    }
}

/// Free flight without gravity or collision.
#[derive(Debug, Clone, Default)]
pub struct FlyPhysics {
    pub config: PhysicsConfig,
}

impl FlyPhysics {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }
}

impl PhysicsBackend for FlyPhysics {
    fn step(
        &mut self,
        camera: &mut Camera,
        buttons: Buttons,
        _colliders: &mut [Collider],
    ) -> StepReport {
        let cfg = &self.config;
        let intent = MoveIntent::from_buttons(buttons, cfg);
        let (k, gain) = (cfg.fly_smoothing, cfg.fly_gain);

        camera.acceleration = Vec3::new(
            smooth(camera.acceleration.x, intent.forward * gain, k),
            smooth(camera.acceleration.y, intent.strafe * gain, k),
            smooth(camera.acceleration.z, intent.vertical * gain, k),
        );
        camera.angular_velocity = smooth(camera.angular_velocity, intent.turn, cfg.turn_smoothing);

        integrate(camera, intent.speed);
        StepReport::default()
    }
}

fn integrate(camera: &mut Camera, speed: f64) {
    let a = camera.acceleration;
    let motion = camera.forward().scale(a.x) + camera.right().scale(a.y) + Vec3::UP.scale(a.z);
    camera.position += motion.scale(speed);
    camera.yaw += camera.angular_velocity;
}

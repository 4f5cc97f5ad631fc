//! Client implementation.
//!
//! The client owns everything a frame needs:
//! - The loaded scene (render items plus the collider list)
//! - The camera
//! - The physics backend for the configured movement mode
//! - The renderer
//!
//! One call to [`WalkerClient::frame`] runs `input -> physics -> render`.
//! Pressing a place button drops a copy of a configured object at the camera.

use anyhow::Context;
use engine_shared::{
    camera::Camera,
    config::EngineConfig,
    input::Buttons,
    loader::{load_scene, DirSource, Placement, SceneLoader, SceneSource},
    math::Vec3,
    physics::{backend_for, MovementMode, PhysicsBackend, StepReport},
    render::{Canvas, FrameStats, Renderer},
    scene::Scene,
};
use tracing::{debug, info, warn};

/// Client run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Frames are being produced.
    Running,
    /// Cancel was pressed; no more frames.
    Quit,
}

/// High-level walker client.
pub struct WalkerClient {
    pub state: ClientState,
    pub camera: Camera,
    pub scene: Scene,
    pub mode: MovementMode,

    physics: Box<dyn PhysicsBackend>,
    renderer: Renderer,
    source: Option<Box<dyn SceneSource>>,
    placeables: Vec<String>,
    held: Buttons,
    frame: u64,
    last_step: StepReport,
}

impl WalkerClient {
    /// Loads the configured root scene from disk.
    pub fn load(cfg: &EngineConfig) -> anyhow::Result<Self> {
        info!(
            scene = %cfg.scene,
            objects_dir = %cfg.objects_dir,
            sprites_dir = %cfg.sprites_dir,
            "Loading scene"
        );
        let source = DirSource::new(&cfg.objects_dir, &cfg.sprites_dir);
        let scene =
            load_scene(&source, &cfg.scene).with_context(|| format!("load scene {}", cfg.scene))?;
        Ok(Self::from_scene(cfg, scene).with_source(source))
    }

    /// Builds a client around an already loaded scene.
    pub fn from_scene(cfg: &EngineConfig, scene: Scene) -> Self {
        info!(
            polygons = scene.polygon_count(),
            sprites = scene.sprite_count(),
            colliders = scene.colliders.len(),
            mode = ?cfg.physics.mode,
            "Client ready"
        );
        Self {
            state: ClientState::Running,
            camera: cfg.camera.build(),
            scene,
            mode: cfg.physics.mode,
            physics: backend_for(cfg.physics),
            renderer: Renderer::new(cfg.render),
            source: None,
            placeables: cfg.placeables.clone(),
            held: Buttons::empty(),
            frame: 0,
            last_step: StepReport::default(),
        }
    }

    /// Sets where placed objects are read from.
    pub fn with_source(mut self, source: impl SceneSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Loads `name` at the camera's position and heading and adds it to the scene.
    pub fn place(&mut self, name: &str) -> anyhow::Result<()> {
        let Some(source) = self.source.as_deref() else {
            anyhow::bail!("no object source to place {name} from");
        };
        let placement = Placement {
            position: self.camera.position,
            yaw: self.camera.yaw,
            scale: Vec3::new(1.0, 1.0, 1.0),
        };
        let placed = SceneLoader::new(source)
            .load_at(name, placement)
            .with_context(|| format!("place {name}"))?;
        info!(
            object = %name,
            position = ?placement.position,
            yaw = placement.yaw,
            polygons = placed.polygon_count(),
            colliders = placed.colliders.len(),
            "Placed object"
        );
        self.scene.extend(placed);
        Ok(())
    }

    /// Places the configured objects for place buttons pressed this frame.
    fn place_pressed(&mut self, buttons: Buttons) {
        let pressed = buttons.difference(self.held);
        self.held = buttons;
        for slot in pressed.place_slots() {
            let Some(name) = self.placeables.get(slot).cloned() else {
                debug!(slot, "No object configured for place button");
                continue;
            };
            if let Err(e) = self.place(&name) {
                warn!(error = %format!("{e:#}"), "Placement failed");
            }
        }
    }

    /// Runs one frame. Returns `None` once the client has quit.
    pub fn frame<C: Canvas + ?Sized>(
        &mut self,
        buttons: Buttons,
        canvas: &mut C,
    ) -> Option<FrameStats> {
        if self.state == ClientState::Quit {
            return None;
        }
        if buttons.contains(Buttons::CANCEL) {
            info!(frame = self.frame, "Cancel pressed, quitting");
            self.state = ClientState::Quit;
            return None;
        }
        self.place_pressed(buttons);

        self.last_step = self
            .physics
            .step(&mut self.camera, buttons, &mut self.scene.colliders);
        let stats = self
            .renderer
            .render(&self.camera, &self.scene.items, canvas);
        self.frame += 1;

        if self.frame % 50 == 0 {
            debug!(
                frame = self.frame,
                position = ?self.camera.position,
                yaw = self.camera.yaw,
                grounded = self.last_step.grounded(),
                "Frame"
            );
        }
        Some(stats)
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// What the last physics step observed.
    pub fn last_step(&self) -> StepReport {
        self.last_step
    }

    pub fn is_running(&self) -> bool {
        self.state == ClientState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use engine_shared::{
        collision::Collider, config::CameraConfig, loader::MemorySource, render::NullCanvas,
    };

    const ROOM: &str = "\
pcol -10 0 -10 0 20 20
wcol -10 0 5 0 20 4
c 0.2 0.6 0.2
v -1 0 8
v -1 2 8
v 1 2 8
v 1 0 8
";

    const CUBE: &str = "\
v 0 0 1
v 0 1 1
v 1 1 1
scol 0 0 1 0.5
";

    fn config(y: f64) -> EngineConfig {
        EngineConfig {
            camera: CameraConfig {
                position: Vec3::new(0.0, y, 0.0),
                yaw: 0.0,
                zoom: 1.0,
            },
            ..EngineConfig::default()
        }
    }

    fn client_at(y: f64) -> WalkerClient {
        let src = MemorySource::new()
            .with_object("room", ROOM)
            .with_object("cube", CUBE);
        let scene = load_scene(&src, "room").unwrap();
        WalkerClient::from_scene(&config(y), scene).with_source(src)
    }

    fn client() -> WalkerClient {
        client_at(1.9)
    }

    #[test]
    fn idle_frame_falls_then_settles() {
        let mut c = client_at(2.0);
        let stats = c.frame(Buttons::empty(), &mut NullCanvas).unwrap();
        assert_eq!(c.frames(), 1);
        assert_eq!(stats.polygons_drawn + stats.polygons_culled, 1);
        // A tenth above the floor contact, so the first frame is a fall.
        assert!(!c.last_step().grounded());
        assert_abs_diff_eq!(c.camera.position.y, 1.99, epsilon = 1e-9);
        for _ in 0..20 {
            c.frame(Buttons::empty(), &mut NullCanvas).unwrap();
        }
        assert!(c.last_step().grounded());
        assert!(c.camera.position.y > 1.8 && c.camera.position.y < 2.0);
    }

    #[test]
    fn walking_forward_stops_at_the_wall() {
        let mut c = client();
        for _ in 0..200 {
            c.frame(Buttons::FORWARD | Buttons::RUN, &mut NullCanvas);
        }
        // Wall plane at z = 5, wall probe radius 0.5. Contact is measured
        // before the move, so one frame of run speed can overshoot.
        assert!(c.camera.position.z > 3.0);
        assert!(c.camera.position.z <= 4.7);
        assert!(c.camera.position.y > 1.8);
    }

    #[test]
    fn place_drops_an_object_at_the_camera() {
        let mut c = client();
        c.camera.position = Vec3::new(2.0, 1.9, 1.0);
        c.camera.yaw = 90.0;
        c.place("cube").unwrap();

        assert_eq!(c.scene.polygon_count(), 2);
        assert_eq!(c.scene.colliders.len(), 3);
        match c.scene.colliders[2] {
            Collider::Sphere(s) => {
                // Local +z turned by the camera yaw.
                assert_abs_diff_eq!(s.position.x, 1.0, epsilon = 1e-9);
                assert_abs_diff_eq!(s.position.y, 1.9, epsilon = 1e-9);
                assert_abs_diff_eq!(s.position.z, 1.0, epsilon = 1e-9);
            }
            other => panic!("expected sphere, got {other:?}"),
        }
        let err = c.place("ramp").unwrap_err();
        assert!(format!("{err:#}").contains("ramp"));
        assert_eq!(c.scene.polygon_count(), 2);
    }

    #[test]
    fn place_button_acts_on_the_press_only() {
        let mut c = client();
        for _ in 0..5 {
            c.frame(Buttons::PLACE_1 | Buttons::FORWARD, &mut NullCanvas);
        }
        assert_eq!(c.scene.polygon_count(), 2);
        c.frame(Buttons::empty(), &mut NullCanvas);
        c.frame(Buttons::PLACE_1, &mut NullCanvas);
        assert_eq!(c.scene.polygon_count(), 3);
        // "ramp" is missing from the source; the frame still runs.
        assert!(c.frame(Buttons::PLACE_2, &mut NullCanvas).is_some());
        assert_eq!(c.scene.polygon_count(), 3);
    }

    #[test]
    fn place_without_a_source_fails() {
        let src = MemorySource::new().with_object("room", ROOM);
        let scene = load_scene(&src, "room").unwrap();
        let mut c = WalkerClient::from_scene(&config(1.9), scene);
        assert!(c.place("cube").is_err());
    }

    #[test]
    fn cancel_quits_for_good() {
        let mut c = client();
        assert!(c.is_running());
        assert!(c.frame(Buttons::CANCEL, &mut NullCanvas).is_none());
        assert_eq!(c.state, ClientState::Quit);
        assert!(c.frame(Buttons::empty(), &mut NullCanvas).is_none());
        assert_eq!(c.frames(), 0);
    }

    #[test]
    fn load_reports_missing_scene() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = EngineConfig {
            objects_dir: dir.path().display().to_string(),
            sprites_dir: dir.path().display().to_string(),
            scene: "absent".to_string(),
            ..EngineConfig::default()
        };
        let err = WalkerClient::load(&cfg).err().expect("missing scene");
        assert!(format!("{err:#}").contains("absent"));
    }
}

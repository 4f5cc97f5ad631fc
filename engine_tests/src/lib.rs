//! Shared fixtures for the integration tests.

use std::path::PathBuf;

use anyhow::Context;
use engine_shared::{config::CameraConfig, config::EngineConfig, math::Vec3};
use tempfile::TempDir;
use tracing::debug;

/// A unit floor tile with a matching walkable collider.
pub const TILE: &str = "\
c 0.3 0.6 0.3
v 0 0 0
v 0 0 1
v 1 0 1
v 1 0 0
end
pcol 0 0 0 0 1 1
";

/// A 20x20 yard with a solid wall across z = 6 and a painted panel behind it.
pub const COURTYARD: &str = "\
# floor
file tile -10 0 -10 0 20 1 20

# back wall
wcol -10 0 6 0 20 4
c 0.7 0.7 0.9
v -2 0 10
v -2 3 10
v 2 3 10
v 2 0 10

sprite tree 3 0 8 2
";

/// A placeable wedge, one unit wide, rising along local +z.
pub const RAMP: &str = "\
c 0.6 0.4 0.2
v 0 0 1
v 0 1 3
v 1 1 3
v 1 0 1
rcol 0 0 1 0 1 2 0.5
";

pub const TREE: &str = "\
f_c 0.1 0.5 0.1
f_b
d
c 1
f_e
u
";

/// Scene directories laid out the way the walker expects them on disk.
pub struct SceneDir {
    pub dir: TempDir,
}

impl SceneDir {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        std::fs::create_dir_all(dir.path().join("Objects")).context("create Objects")?;
        std::fs::create_dir_all(dir.path().join("Sprites")).context("create Sprites")?;
        Ok(Self { dir })
    }

    /// The courtyard scene with its tile, sprite and a placeable ramp.
    pub fn courtyard() -> anyhow::Result<Self> {
        let scene = Self::new()?;
        scene.object("courtyard", COURTYARD)?;
        scene.object("tile", TILE)?;
        scene.object("ramp", RAMP)?;
        scene.sprite("tree", TREE)?;
        Ok(scene)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.dir.path().join("Objects")
    }

    pub fn sprites_dir(&self) -> PathBuf {
        self.dir.path().join("Sprites")
    }

    pub fn object(&self, name: &str, text: &str) -> anyhow::Result<()> {
        let path = self.objects_dir().join(format!("{name}.obj"));
        debug!(path = %path.display(), "Writing object fixture");
        std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))
    }

    pub fn sprite(&self, name: &str, text: &str) -> anyhow::Result<()> {
        let path = self.sprites_dir().join(format!("{name}.tur"));
        std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))
    }

    /// Config pointing at this directory, standing at the yard's center
    /// and facing +z.
    pub fn config(&self, scene: &str) -> EngineConfig {
        EngineConfig {
            objects_dir: self.objects_dir().display().to_string(),
            sprites_dir: self.sprites_dir().display().to_string(),
            scene: scene.to_string(),
            camera: CameraConfig {
                position: Vec3::new(0.0, 1.9, 0.0),
                yaw: 0.0,
                zoom: 1.0,
            },
            ..EngineConfig::default()
        }
    }
}

/// Installs a test-friendly subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

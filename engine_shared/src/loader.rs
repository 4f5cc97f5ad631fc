//! Scene loading.
//!
//! A scene is a tree of object files. Each file lists polygon vertices,
//! colliders, sprites and placed copies of other files:
//!
//! ```text
//! # a red floor tile with a walkable collider
//! c 0.8 0.2 0.2
//! v 0 0 0
//! v 0 0 4
//! v 4 0 4
//! v 4 0 0
//! end
//! pcol 0 0 0 0 4 4
//! sprite lamp 2 3 2 1.5
//! file crate 1 0 1 45 1 1 1
//! ```
//!
//! Every point in a file is expressed in that file's local frame and moved
//! into the world by the [`Placement`] it was included with.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info};

use crate::{
    collision::{Collider, Sphere},
    error::{GeometryError, SceneLoadError},
    math::Vec3,
    scene::{Polygon, Rgb, Scene, SceneItem, Sprite},
    sprite::SpriteScript,
};

/// Where object files and sprite scripts come from.
pub trait SceneSource {
    fn read_object(&self, name: &str) -> Result<String, SceneLoadError>;
    fn read_sprite(&self, name: &str) -> Result<String, SceneLoadError>;
}

/// Reads `<objects_dir>/<name>.obj` and `<sprites_dir>/<name>.tur`.
#[derive(Debug, Clone)]
pub struct DirSource {
    pub objects_dir: PathBuf,
    pub sprites_dir: PathBuf,
}

impl DirSource {
    pub fn new(objects_dir: impl Into<PathBuf>, sprites_dir: impl Into<PathBuf>) -> Self {
        Self {
            objects_dir: objects_dir.into(),
            sprites_dir: sprites_dir.into(),
        }
    }

    fn read(kind: &'static str, path: &Path, name: &str) -> Result<String, SceneLoadError> {
        std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SceneLoadError::NotFound {
                    kind,
                    name: name.to_string(),
                }
            } else {
                SceneLoadError::Io {
                    name: path.display().to_string(),
                    source,
                }
            }
        })
    }
}

impl SceneSource for DirSource {
    fn read_object(&self, name: &str) -> Result<String, SceneLoadError> {
        Self::read("object", &self.objects_dir.join(format!("{name}.obj")), name)
    }

    fn read_sprite(&self, name: &str) -> Result<String, SceneLoadError> {
        Self::read("sprite", &self.sprites_dir.join(format!("{name}.tur")), name)
    }
}

/// In-memory source, handy for tests and generated scenes.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    objects: HashMap<String, String>,
    sprites: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, name: &str, text: &str) -> Self {
        self.objects.insert(name.to_string(), text.to_string());
        self
    }

    pub fn with_sprite(mut self, name: &str, text: &str) -> Self {
        self.sprites.insert(name.to_string(), text.to_string());
        self
    }
}

impl SceneSource for MemorySource {
    fn read_object(&self, name: &str) -> Result<String, SceneLoadError> {
        self.objects
            .get(name)
            .cloned()
            .ok_or_else(|| SceneLoadError::NotFound {
                kind: "object",
                name: name.to_string(),
            })
    }

    fn read_sprite(&self, name: &str) -> Result<String, SceneLoadError> {
        self.sprites
            .get(name)
            .cloned()
            .ok_or_else(|| SceneLoadError::NotFound {
                kind: "sprite",
                name: name.to_string(),
            })
    }
}

/// Local-to-world transform of an included file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Degrees about +y through `position`.
    pub yaw: f64,
    /// Per-axis scale, applied before the rotation.
    pub scale: Vec3,
}

impl Placement {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        yaw: 0.0,
        scale: Vec3::new(1.0, 1.0, 1.0),
    };

    /// Moves a local point into the parent frame.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        (self.position + self.scale.mul_elements(local)).rotate_around(self.position, self.yaw)
    }

    /// Placement of a child included at `position` with `yaw` and `scale`.
    pub fn nest(&self, position: Vec3, yaw: f64, scale: Vec3) -> Self {
        Self {
            position: self.apply(position),
            yaw: self.yaw + yaw,
            scale: self.scale.mul_elements(scale),
        }
    }

    /// Length of a unit local axis, turned by `yaw`, after scaling.
    fn axis_scale(&self, axis: Vec3, yaw: f64) -> f64 {
        self.scale
            .mul_elements(axis.rotate_around(Vec3::ZERO, yaw))
            .magnitude()
    }

    fn collider(&self, local: Collider) -> Collider {
        const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
        const Z: Vec3 = Vec3::FORWARD;
        match local {
            Collider::Sphere(s) => Collider::Sphere(Sphere::new(self.apply(s.position), s.radius)),
            Collider::Plane {
                position,
                yaw,
                extent_x,
                extent_z,
            } => Collider::Plane {
                position: self.apply(position),
                yaw: self.yaw + yaw,
                extent_x: extent_x * self.axis_scale(X, yaw),
                extent_z: extent_z * self.axis_scale(Z, yaw),
            },
            Collider::Slope {
                position,
                yaw,
                extent_x,
                extent_z,
                slope,
            } => {
                let z_scale = self.axis_scale(Z, yaw);
                Collider::Slope {
                    position: self.apply(position),
                    yaw: self.yaw + yaw,
                    extent_x: extent_x * self.axis_scale(X, yaw),
                    extent_z: extent_z * z_scale,
                    slope: slope * self.scale.y / z_scale,
                }
            }
            Collider::Wall {
                position,
                yaw,
                extent_x,
                extent_y,
            } => Collider::Wall {
                position: self.apply(position),
                yaw: self.yaw + yaw,
                extent_x: extent_x * self.axis_scale(X, yaw),
                extent_y: extent_y * self.scale.y,
            },
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One tokenized line of an object file.
struct Record<'a> {
    file: &'a str,
    line: usize,
    op: &'a str,
    args: &'a [&'a str],
}

impl Record<'_> {
    fn malformed(&self, message: String) -> SceneLoadError {
        SceneLoadError::Malformed {
            file: self.file.to_string(),
            line: self.line,
            message,
        }
    }

    fn word(&self, i: usize) -> Result<&str, SceneLoadError> {
        self.args
            .get(i)
            .copied()
            .ok_or_else(|| self.malformed(format!("'{}' is missing operand {}", self.op, i + 1)))
    }

    fn num(&self, i: usize) -> Result<f64, SceneLoadError> {
        let tok = self.word(i)?;
        match tok.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.malformed(format!("'{}': '{tok}' is not a number", self.op))),
        }
    }

    /// `N` numbers starting at operand `from`.
    fn nums<const N: usize>(&self, from: usize) -> Result<[f64; N], SceneLoadError> {
        let mut out = [0.0; N];
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = self.num(from + k)?;
        }
        Ok(out)
    }

    fn degenerate(&self, source: GeometryError) -> SceneLoadError {
        SceneLoadError::Degenerate {
            file: self.file.to_string(),
            line: self.line,
            source,
        }
    }
}

/// Resolves a root object and everything it includes into a [`Scene`].
pub struct SceneLoader<'a, S: SceneSource + ?Sized> {
    source: &'a S,
    sprites: HashMap<String, Arc<SpriteScript>>,
    stack: Vec<String>,
}

impl<'a, S: SceneSource + ?Sized> SceneLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            sprites: HashMap::new(),
            stack: Vec::new(),
        }
    }

    /// Loads `root` at the identity placement.
    pub fn load(&mut self, root: &str) -> Result<Scene, SceneLoadError> {
        self.load_at(root, Placement::IDENTITY)
    }

    /// Loads `root` moved into the world by `placement`.
    pub fn load_at(&mut self, root: &str, placement: Placement) -> Result<Scene, SceneLoadError> {
        self.stack.clear();
        let mut scene = Scene::default();
        self.load_into(root, placement, &mut scene)?;
        info!(
            root = %root,
            position = ?placement.position,
            polygons = scene.polygon_count(),
            sprites = scene.sprite_count(),
            colliders = scene.colliders.len(),
            "Scene loaded"
        );
        Ok(scene)
    }

    /// Number of distinct sprite scripts parsed so far.
    pub fn cached_sprites(&self) -> usize {
        self.sprites.len()
    }

    fn load_into(
        &mut self,
        name: &str,
        placement: Placement,
        scene: &mut Scene,
    ) -> Result<(), SceneLoadError> {
        if self.stack.iter().any(|open| open == name) {
            let mut chain = self.stack.clone();
            chain.push(name.to_string());
            return Err(SceneLoadError::IncludeCycle { chain });
        }
        let text = self.source.read_object(name)?;
        debug!(object = %name, depth = self.stack.len(), "Loading object");

        self.stack.push(name.to_string());
        let result = self.parse_object(name, &text, placement, scene);
        self.stack.pop();
        result
    }

    fn parse_object(
        &mut self,
        name: &str,
        text: &str,
        placement: Placement,
        scene: &mut Scene,
    ) -> Result<(), SceneLoadError> {
        let mut color = Rgb::WHITE;
        let mut pending: Vec<Vec3> = Vec::new();
        let mut last_line = 0;

        for (idx, raw) in text.lines().enumerate() {
            last_line = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some((&op, args)) = tokens.split_first() else {
                close_polygon(name, last_line, &mut pending, color, scene)?;
                continue;
            };
            let rec = Record {
                file: name,
                line: last_line,
                op,
                args,
            };

            match op {
                "v" => {
                    let [x, y, z] = rec.nums::<3>(0)?;
                    pending.push(placement.apply(Vec3::new(x, y, z)));
                }
                "c" => {
                    let [r, g, b] = rec.nums::<3>(0)?;
                    color = Rgb::new(r, g, b);
                }
                "end" => close_polygon(name, last_line, &mut pending, color, scene)?,
                "pcol" => {
                    let [x, y, z, yaw, ex, ez] = rec.nums::<6>(0)?;
                    self.push_collider(
                        &rec,
                        placement,
                        Collider::Plane {
                            position: Vec3::new(x, y, z),
                            yaw,
                            extent_x: ex,
                            extent_z: ez,
                        },
                        scene,
                    )?;
                }
                "rcol" => {
                    let [x, y, z, yaw, ex, ez, slope] = rec.nums::<7>(0)?;
                    self.push_collider(
                        &rec,
                        placement,
                        Collider::Slope {
                            position: Vec3::new(x, y, z),
                            yaw,
                            extent_x: ex,
                            extent_z: ez,
                            slope,
                        },
                        scene,
                    )?;
                }
                "wcol" => {
                    let [x, y, z, yaw, ex, ey] = rec.nums::<6>(0)?;
                    self.push_collider(
                        &rec,
                        placement,
                        Collider::Wall {
                            position: Vec3::new(x, y, z),
                            yaw,
                            extent_x: ex,
                            extent_y: ey,
                        },
                        scene,
                    )?;
                }
                "scol" => {
                    let [x, y, z, r] = rec.nums::<4>(0)?;
                    self.push_collider(
                        &rec,
                        placement,
                        Collider::Sphere(Sphere::new(Vec3::new(x, y, z), r)),
                        scene,
                    )?;
                }
                "sprite" => {
                    let sprite_name = rec.word(0)?;
                    let [x, y, z, scale] = rec.nums::<4>(1)?;
                    let script = self.sprite_script(sprite_name)?;
                    scene.items.push(SceneItem::Sprite(Sprite {
                        anchor: placement.apply(Vec3::new(x, y, z)),
                        name: sprite_name.to_string(),
                        script,
                        scale: scale * placement.scale.y,
                    }));
                }
                "file" => {
                    let child = rec.word(0)?;
                    let [x, y, z, yaw, sx, sy, sz] = rec.nums::<7>(1)?;
                    let nested = placement.nest(Vec3::new(x, y, z), yaw, Vec3::new(sx, sy, sz));
                    self.load_into(child, nested, scene)?;
                }
                other => return Err(rec.malformed(format!("unknown record '{other}'"))),
            }
        }

        close_polygon(name, last_line, &mut pending, color, scene)
    }

    fn push_collider(
        &self,
        rec: &Record<'_>,
        placement: Placement,
        local: Collider,
        scene: &mut Scene,
    ) -> Result<(), SceneLoadError> {
        let collider = placement.collider(local);
        collider.validate().map_err(|e| rec.degenerate(e))?;
        scene.colliders.push(collider);
        Ok(())
    }

    fn sprite_script(&mut self, name: &str) -> Result<Arc<SpriteScript>, SceneLoadError> {
        if let Some(script) = self.sprites.get(name) {
            return Ok(Arc::clone(script));
        }
        let text = self.source.read_sprite(name)?;
        let script = Arc::new(SpriteScript::parse(name, &text)?);
        debug!(sprite = %name, commands = script.commands.len(), "Parsed sprite script");
        self.sprites.insert(name.to_string(), Arc::clone(&script));
        Ok(script)
    }
}

/// Turns the pending vertices into a polygon, if there are any.
fn close_polygon(
    file: &str,
    line: usize,
    pending: &mut Vec<Vec3>,
    color: Rgb,
    scene: &mut Scene,
) -> Result<(), SceneLoadError> {
    if pending.is_empty() {
        return Ok(());
    }
    let vertices = std::mem::take(pending);
    if vertices.len() < 3 {
        return Err(SceneLoadError::Malformed {
            file: file.to_string(),
            line,
            message: format!("polygon closed with {} vertices", vertices.len()),
        });
    }
    let polygon = Polygon::new(vertices, color).map_err(|source| SceneLoadError::Degenerate {
        file: file.to_string(),
        line,
        source,
    })?;
    scene.items.push(polygon.into());
    Ok(())
}

/// Loads `root` from a [`SceneSource`] in one call.
pub fn load_scene<S: SceneSource + ?Sized>(source: &S, root: &str) -> Result<Scene, SceneLoadError> {
    SceneLoader::new(source).load(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TILE: &str = "\
# floor tile
c 0.5 0.5 0.5
v 0 0 0
v 0 0 1
v 1 0 1
v 1 0 0

v 0 1 0
v 0 2 0
v 1 2 0
end
pcol 0 0 0 0 1 1
";

    fn polygons(scene: &Scene) -> Vec<&Polygon> {
        scene
            .items
            .iter()
            .filter_map(|item| match item {
                SceneItem::Polygon(p) => Some(p),
                SceneItem::Sprite(_) => None,
            })
            .collect()
    }

    fn sprites(scene: &Scene) -> Vec<&Sprite> {
        scene
            .items
            .iter()
            .filter_map(|item| match item {
                SceneItem::Sprite(s) => Some(s),
                SceneItem::Polygon(_) => None,
            })
            .collect()
    }

    #[test]
    fn blank_line_and_end_close_polygons() {
        let src = MemorySource::new().with_object("tile", TILE);
        let scene = load_scene(&src, "tile").unwrap();
        assert_eq!(scene.polygon_count(), 2);
        assert_eq!(scene.colliders.len(), 1);
        let polys = polygons(&scene);
        assert_eq!(polys[0].vertices().len(), 4);
        assert_eq!(polys[1].vertices().len(), 3);
    }

    #[test]
    fn pending_vertices_flush_at_end_of_file() {
        let src = MemorySource::new().with_object("tri", "v 0 0 0\nv 0 1 0\nv 1 0 0");
        let scene = load_scene(&src, "tri").unwrap();
        assert_eq!(scene.polygon_count(), 1);
    }

    #[test]
    fn short_polygon_is_malformed() {
        let src = MemorySource::new().with_object("bad", "v 0 0 0\nv 1 0 0\n\nv 2 0 0");
        match load_scene(&src, "bad").unwrap_err() {
            SceneLoadError::Malformed { file, line, .. } => {
                assert_eq!(file, "bad");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_operands_and_unknown_records_are_malformed() {
        for text in ["v 0 zero 0", "pcol 0 0 0 0 1", "frobnicate 1 2", "c 1 nan 1"] {
            let src = MemorySource::new().with_object("bad", text);
            assert!(
                matches!(load_scene(&src, "bad"), Err(SceneLoadError::Malformed { .. })),
                "{text} should be malformed"
            );
        }
    }

    #[test]
    fn collinear_polygon_and_flat_collider_are_degenerate() {
        let src = MemorySource::new()
            .with_object("line", "v 0 0 0\nv 1 0 0\nv 2 0 0\n")
            .with_object("flat", "wcol 0 0 0 0 0 2\n");
        assert!(matches!(
            load_scene(&src, "line"),
            Err(SceneLoadError::Degenerate { line: 3, .. })
        ));
        assert!(matches!(
            load_scene(&src, "flat"),
            Err(SceneLoadError::Degenerate { line: 1, .. })
        ));
    }

    #[test]
    fn placement_rotates_about_its_origin() {
        let src = MemorySource::new()
            .with_object("root", "file tri 10 0 0 90 1 1 1\n")
            .with_object("tri", "v 1 0 0\nv 1 1 0\nv 2 0 0\n");
        let scene = load_scene(&src, "root").unwrap();
        let v = polygons(&scene)[0].vertices()[0];
        assert_abs_diff_eq!(v.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn collider_extents_follow_scaled_axes() {
        let src = MemorySource::new()
            .with_object("root", "file floor 10 0 0 90 2 4 3\n")
            .with_object(
                "floor",
                "pcol 0 0 0 0 1 1\nrcol 0 0 0 0 1 2 0.5\nwcol 0 0 0 90 1 1\nscol 1 0 0 0.5\n",
            );
        let scene = load_scene(&src, "root").unwrap();
        assert_eq!(scene.colliders.len(), 4);

        match scene.colliders[0] {
            Collider::Plane {
                position,
                yaw,
                extent_x,
                extent_z,
            } => {
                assert_eq!(position, Vec3::new(10.0, 0.0, 0.0));
                assert_eq!(yaw, 90.0);
                assert_abs_diff_eq!(extent_x, 2.0, epsilon = 1e-9);
                assert_abs_diff_eq!(extent_z, 3.0, epsilon = 1e-9);
            }
            other => panic!("expected plane, got {other:?}"),
        }
        match scene.colliders[1] {
            Collider::Slope {
                extent_z, slope, ..
            } => {
                assert_abs_diff_eq!(extent_z, 6.0, epsilon = 1e-9);
                assert_abs_diff_eq!(slope, 0.5 * 4.0 / 3.0, epsilon = 1e-9);
            }
            other => panic!("expected slope, got {other:?}"),
        }
        match scene.colliders[2] {
            Collider::Wall {
                yaw,
                extent_x,
                extent_y,
                ..
            } => {
                assert_eq!(yaw, 180.0);
                // The wall's local x runs along the parent's z axis.
                assert_abs_diff_eq!(extent_x, 3.0, epsilon = 1e-9);
                assert_abs_diff_eq!(extent_y, 4.0, epsilon = 1e-9);
            }
            other => panic!("expected wall, got {other:?}"),
        }
        match scene.colliders[3] {
            Collider::Sphere(s) => {
                assert_abs_diff_eq!(s.position.x, 10.0, epsilon = 1e-9);
                assert_abs_diff_eq!(s.position.z, 2.0, epsilon = 1e-9);
                assert_eq!(s.radius, 0.5);
            }
            other => panic!("expected sphere, got {other:?}"),
        }
    }

    #[test]
    fn load_at_places_the_root_object() {
        let src = MemorySource::new().with_object("marker", "v 1 0 0\nv 1 1 0\nv 2 0 0\nscol 0 0 1 0.5\n");
        let placement = Placement {
            position: Vec3::new(3.0, 1.0, 0.0),
            yaw: 90.0,
            scale: Vec3::new(1.0, 1.0, 1.0),
        };
        let scene = SceneLoader::new(&src).load_at("marker", placement).unwrap();
        let v = polygons(&scene)[0].vertices()[0];
        assert_abs_diff_eq!(v.x, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.z, 1.0, epsilon = 1e-9);
        match scene.colliders[0] {
            Collider::Sphere(s) => {
                assert_abs_diff_eq!(s.position.x, 2.0, epsilon = 1e-9);
                assert_abs_diff_eq!(s.position.z, 0.0, epsilon = 1e-9);
            }
            other => panic!("expected sphere, got {other:?}"),
        }
    }

    #[test]
    fn nested_placements_compose() {
        let src = MemorySource::new()
            .with_object("root", "file a 0 0 5 0 2 2 2\n")
            .with_object("a", "file b 1 0 0 0 1 1 1\n")
            .with_object("b", "sprite dot 0 0 0 1\n")
            .with_sprite("dot", "d\nc 1\n");
        let scene = load_scene(&src, "root").unwrap();
        let s = sprites(&scene)[0];
        assert_eq!(s.anchor, Vec3::new(2.0, 0.0, 5.0));
        assert_eq!(s.scale, 2.0);
        assert_eq!(s.script.commands.len(), 2);
    }

    #[test]
    fn sprite_scripts_are_parsed_once_and_shared() {
        let src = MemorySource::new()
            .with_object("root", "sprite tree 0 0 0 1\nsprite tree 5 0 0 1\nsprite rock 1 0 0 1\n")
            .with_sprite("tree", "f 1\n")
            .with_sprite("rock", "c 1\n");
        let mut loader = SceneLoader::new(&src);
        let scene = loader.load("root").unwrap();
        assert_eq!(loader.cached_sprites(), 2);
        let s = sprites(&scene);
        assert!(Arc::ptr_eq(&s[0].script, &s[1].script));
        assert!(!Arc::ptr_eq(&s[0].script, &s[2].script));
    }

    #[test]
    fn include_cycle_reports_chain() {
        let src = MemorySource::new()
            .with_object("a", "file b 0 0 0 0 1 1 1\n")
            .with_object("b", "file a 0 0 0 0 1 1 1\n");
        match load_scene(&src, "a").unwrap_err() {
            SceneLoadError::IncludeCycle { chain } => assert_eq!(chain, ["a", "b", "a"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn repeated_include_is_not_a_cycle() {
        let src = MemorySource::new()
            .with_object("root", "file tile 0 0 0 0 1 1 1\nfile tile 1 0 0 0 1 1 1\n")
            .with_object("tile", TILE);
        let scene = load_scene(&src, "root").unwrap();
        assert_eq!(scene.polygon_count(), 4);
        assert_eq!(scene.colliders.len(), 2);
    }

    #[test]
    fn missing_names_are_not_found() {
        let src = MemorySource::new().with_object("root", "sprite ghost 0 0 0 1\n");
        assert!(matches!(
            load_scene(&src, "nowhere"),
            Err(SceneLoadError::NotFound { kind: "object", .. })
        ));
        assert!(matches!(
            load_scene(&src, "root"),
            Err(SceneLoadError::NotFound { kind: "sprite", .. })
        ));
    }

    #[test]
    fn dir_source_reads_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let objects = dir.path().join("Objects");
        let sprites = dir.path().join("Sprites");
        std::fs::create_dir_all(&objects).unwrap();
        std::fs::create_dir_all(&sprites).unwrap();
        std::fs::write(objects.join("map.obj"), "sprite sun 0 9 0 2\n").unwrap();
        std::fs::write(sprites.join("sun.tur"), "d\nc 3\n").unwrap();

        let src = DirSource::new(&objects, &sprites);
        let scene = load_scene(&src, "map").unwrap();
        assert_eq!(scene.sprite_count(), 1);
        assert!(matches!(
            src.read_object("absent"),
            Err(SceneLoadError::NotFound { .. })
        ));
    }
}

//! Scene entities.
//!
//! Everything here is built once at load time and is read-only while frames
//! run. The only mutable piece of a loaded [`Scene`] is the order of its
//! collider list, which the movement step re-sorts every frame.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{collision::Collider, error::GeometryError, math::Vec3, sprite::SpriteScript};

/// Fill color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Static shade factor for a face pointing along `facing`.
///
/// Faces pointing up come out darkest; faces towards +x and +z lighten.
pub fn shade_factor(facing: Vec3) -> f64 {
    0.25 - (facing.y + 1.0) / 8.0 + (facing.x + 1.0) / 10.0 + (facing.z + 1.0) / 20.0 + 0.5
}

/// Flat-shaded world-space polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec3>,
    centroid: Vec3,
    color: Rgb,
}

impl Polygon {
    /// Builds a polygon and bakes its shade into `base_color`.
    ///
    /// Fails when there are fewer than 3 vertices or the first corner spans
    /// no area, since such a face has no normal.
    pub fn new(vertices: Vec<Vec3>, base_color: Rgb) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        let facing = face_normal(&vertices).try_normalize()?;

        let n = vertices.len() as f64;
        let sum = vertices.iter().fold(Vec3::ZERO, |acc, v| acc + *v);
        let centroid = sum.scale(1.0 / n);

        Ok(Self {
            vertices,
            centroid,
            color: base_color.scale(shade_factor(facing)),
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Unweighted mean of the vertices.
    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// Fill color with shading already applied.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Unit face normal from the winding of the first, second and last vertex.
    pub fn facing(&self) -> Vec3 {
        face_normal(&self.vertices).normalize()
    }
}

fn face_normal(vertices: &[Vec3]) -> Vec3 {
    let first = vertices[0];
    let second = vertices[1];
    let last = vertices[vertices.len() - 1];
    (first - second).cross(first - last)
}

/// Camera-facing billboard drawn from a sprite script.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub anchor: Vec3,
    pub name: String,
    pub script: Arc<SpriteScript>,
    pub scale: f64,
}

/// Anything the renderer draws.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    Polygon(Polygon),
    Sprite(Sprite),
}

impl SceneItem {
    /// Point used for depth sorting.
    pub fn anchor(&self) -> Vec3 {
        match self {
            SceneItem::Polygon(p) => p.centroid(),
            SceneItem::Sprite(s) => s.anchor,
        }
    }
}

impl From<Polygon> for SceneItem {
    fn from(p: Polygon) -> Self {
        SceneItem::Polygon(p)
    }
}

impl From<Sprite> for SceneItem {
    fn from(s: Sprite) -> Self {
        SceneItem::Sprite(s)
    }
}

/// Loaded world: drawables plus solid shapes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub items: Vec<SceneItem>,
    pub colliders: Vec<Collider>,
}

impl Scene {
    pub fn polygon_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, SceneItem::Polygon(_)))
            .count()
    }

    pub fn sprite_count(&self) -> usize {
        self.items.len() - self.polygon_count()
    }

    /// Appends another scene's contents, keeping order.
    pub fn extend(&mut self, other: Scene) {
        self.items.extend(other.items);
        self.colliders.extend(other.colliders);
    }
}

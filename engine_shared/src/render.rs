//! Render pipeline.
//!
//! This crate intentionally does not depend on a graphics backend. Frames
//! are emitted as draw calls on a [`Canvas`], a stateful vector surface in
//! the style of a turtle: a current point, a heading, a pen, and fill
//! brackets.
//!
//! Per frame the [`Renderer`]:
//! 1. sorts items back to front by distance to the camera,
//! 2. drops polygons beyond the render distance or facing away,
//! 3. moves vertices into camera space,
//! 4. clips against the near plane,
//! 5. projects with a perspective divide and fills the ring,
//! 6. replays sprite scripts at their projected anchors, scaled by depth.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    camera::Camera,
    clip::clip_near,
    error::GeometryError,
    scene::{Polygon, Rgb, SceneItem, Sprite},
};

/// The drawing surface the renderer talks to.
pub trait Canvas: Send + Sync {
    fn begin_frame(&mut self, zoom: f64);
    fn end_frame(&mut self);
    fn set_fill_color(&mut self, color: Rgb);
    /// Jumps to a point without drawing.
    fn move_to(&mut self, x: f64, y: f64);
    /// Draws (and extends the open fill path) to a point.
    fn line_to(&mut self, x: f64, y: f64);
    fn begin_fill(&mut self);
    fn end_fill(&mut self);
    fn pen_up(&mut self);
    fn pen_down(&mut self);
    /// Absolute heading in degrees, 0 along +x, counter-clockwise.
    fn set_heading(&mut self, degrees: f64);
    fn forward(&mut self, len: f64);
    /// Clockwise turn in degrees.
    fn turn(&mut self, degrees: f64);
    /// Arc with its center `radius` to the left; a full circle by default.
    fn arc(&mut self, radius: f64, extent: Option<f64>, steps: Option<u32>);
}

/// A no-op canvas useful for headless runs.
#[derive(Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn begin_frame(&mut self, _zoom: f64) {}
    fn end_frame(&mut self) {}
    fn set_fill_color(&mut self, _color: Rgb) {}
    fn move_to(&mut self, _x: f64, _y: f64) {}
    fn line_to(&mut self, _x: f64, _y: f64) {}
    fn begin_fill(&mut self) {}
    fn end_fill(&mut self) {}
    fn pen_up(&mut self) {}
    fn pen_down(&mut self) {}
    fn set_heading(&mut self, _degrees: f64) {}
    fn forward(&mut self, _len: f64) {}
    fn turn(&mut self, _degrees: f64) {}
    fn arc(&mut self, _radius: f64, _extent: Option<f64>, _steps: Option<u32>) {}
}

/// One recorded canvas call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    BeginFrame(f64),
    EndFrame,
    FillColor(Rgb),
    MoveTo(f64, f64),
    LineTo(f64, f64),
    BeginFill,
    EndFill,
    PenUp,
    PenDown,
    Heading(f64),
    Forward(f64),
    Turn(f64),
    Arc {
        radius: f64,
        extent: Option<f64>,
        steps: Option<u32>,
    },
}

/// Canvas that keeps every call, for inspection.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Fill brackets closed so far.
    pub fn fill_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::EndFill).count()
    }
}

impl Canvas for RecordingCanvas {
    fn begin_frame(&mut self, zoom: f64) {
        self.ops.clear();
        self.ops.push(DrawOp::BeginFrame(zoom));
    }
    fn end_frame(&mut self) {
        self.ops.push(DrawOp::EndFrame);
    }
    fn set_fill_color(&mut self, color: Rgb) {
        self.ops.push(DrawOp::FillColor(color));
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }
    fn begin_fill(&mut self) {
        self.ops.push(DrawOp::BeginFill);
    }
    fn end_fill(&mut self) {
        self.ops.push(DrawOp::EndFill);
    }
    fn pen_up(&mut self) {
        self.ops.push(DrawOp::PenUp);
    }
    fn pen_down(&mut self) {
        self.ops.push(DrawOp::PenDown);
    }
    fn set_heading(&mut self, degrees: f64) {
        self.ops.push(DrawOp::Heading(degrees));
    }
    fn forward(&mut self, len: f64) {
        self.ops.push(DrawOp::Forward(len));
    }
    fn turn(&mut self, degrees: f64) {
        self.ops.push(DrawOp::Turn(degrees));
    }
    fn arc(&mut self, radius: f64, extent: Option<f64>, steps: Option<u32>) {
        self.ops.push(DrawOp::Arc {
            radius,
            extent,
            steps,
        });
    }
}

/// Render parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Polygons whose centroid is this far or farther are skipped.
    pub render_distance: f64,
    /// Near clip depth. Must stay above zero.
    pub near_clip: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_distance: 40.0,
            near_clip: 0.25,
        }
    }
}

/// Per-frame counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub polygons_drawn: usize,
    pub polygons_culled: usize,
    pub polygons_clipped_away: usize,
    pub geometry_errors: usize,
    pub sprites_drawn: usize,
    pub sprites_skipped: usize,
}

/// Painter's-algorithm renderer.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Draws one frame of `items` as seen from `camera`.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        camera: &Camera,
        items: &[SceneItem],
        canvas: &mut C,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        let mut ordered: Vec<(f64, &SceneItem)> = items
            .iter()
            .map(|item| (item.anchor().distance(camera.position), item))
            .collect();
        ordered.sort_by(|a, b| b.0.total_cmp(&a.0));

        canvas.begin_frame(camera.zoom);
        for (distance, item) in ordered {
            match item {
                SceneItem::Polygon(poly) => {
                    if !self.faces_camera(poly, distance, camera) {
                        stats.polygons_culled += 1;
                        continue;
                    }
                    match self.draw_polygon(poly, camera, canvas) {
                        Ok(true) => stats.polygons_drawn += 1,
                        Ok(false) => stats.polygons_clipped_away += 1,
                        Err(e) => {
                            warn!(error = %e, centroid = ?poly.centroid(), "Skipping polygon");
                            stats.geometry_errors += 1;
                        }
                    }
                }
                SceneItem::Sprite(sprite) => {
                    if self.draw_sprite(sprite, camera, canvas) {
                        stats.sprites_drawn += 1;
                    } else {
                        stats.sprites_skipped += 1;
                    }
                }
            }
        }
        canvas.end_frame();

        debug!(
            drawn = stats.polygons_drawn,
            culled = stats.polygons_culled,
            clipped = stats.polygons_clipped_away,
            errors = stats.geometry_errors,
            sprites = stats.sprites_drawn,
            "Frame rendered"
        );
        stats
    }

    /// Distance and back-face test.
    fn faces_camera(&self, poly: &Polygon, distance: f64, camera: &Camera) -> bool {
        if distance >= self.config.render_distance {
            return false;
        }
        let to_camera = (camera.position - poly.centroid()).normalize();
        poly.facing().dot(to_camera) > 0.0
    }

    /// Returns `Ok(false)` when nothing survived the near clip.
    fn draw_polygon<C: Canvas + ?Sized>(
        &self,
        poly: &Polygon,
        camera: &Camera,
        canvas: &mut C,
    ) -> Result<bool, GeometryError> {
        let view: Vec<_> = poly.vertices().iter().map(|v| camera.to_view(*v)).collect();
        let ring = clip_near(&view, self.config.near_clip)?;
        if !ring.is_drawable() {
            return Ok(false);
        }

        let projected: Vec<(f64, f64)> = ring.points.iter().map(|p| (p.x / p.z, p.y / p.z)).collect();
        if projected.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(GeometryError::NonFiniteProjection);
        }

        canvas.set_fill_color(poly.color());
        canvas.pen_up();
        let (x0, y0) = projected[0];
        canvas.move_to(x0, y0);
        canvas.pen_down();
        canvas.begin_fill();
        for &(x, y) in projected.iter().skip(1).chain(std::iter::once(&projected[0])) {
            canvas.line_to(x, y);
        }
        canvas.end_fill();
        canvas.pen_up();
        Ok(true)
    }

    /// Returns false when the anchor is at or behind the near plane.
    fn draw_sprite<C: Canvas + ?Sized>(&self, sprite: &Sprite, camera: &Camera, canvas: &mut C) -> bool {
        let p = camera.to_view(sprite.anchor);
        if p.z <= self.config.near_clip {
            return false;
        }
        canvas.pen_up();
        canvas.move_to(p.x / p.z, p.y / p.z);
        canvas.set_heading(0.0);
        sprite.script.replay(canvas, sprite.scale / p.z);
        true
    }
}

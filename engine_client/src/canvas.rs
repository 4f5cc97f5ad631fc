//! SVG turtle canvas.
//!
//! Keeps turtle state (position, heading, pen, open fill path) and turns
//! every frame into an SVG document. The view covers `[-zoom, zoom]` on both
//! axes with +y up, matching the projected coordinates the renderer emits.

use std::{fmt::Write as _, path::Path};

use anyhow::Context;
use engine_shared::{render::Canvas, scene::Rgb};

type Point = (f64, f64);

#[derive(Debug, Clone)]
pub struct SvgCanvas {
    zoom: f64,
    pos: Point,
    /// Degrees, 0 along +x, counter-clockwise.
    heading: f64,
    pen: bool,
    fill_color: Rgb,
    fill_path: Option<Vec<Point>>,
    stroke: Vec<Point>,
    elements: Vec<String>,
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pos: (0.0, 0.0),
            heading: 0.0,
            pen: true,
            fill_color: Rgb::WHITE,
            fill_path: None,
            stroke: Vec::new(),
            elements: Vec::new(),
        }
    }
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Shapes emitted since the frame began.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Serializes the current frame.
    pub fn to_svg(&self) -> String {
        let z = self.zoom;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            fmt(-z),
            fmt(-z),
            fmt(2.0 * z),
            fmt(2.0 * z)
        );
        let _ = writeln!(
            out,
            r#"<g transform="scale(1,-1)" stroke-width="{}">"#,
            fmt(z / 500.0)
        );
        for el in &self.elements {
            out.push_str(el);
            out.push('\n');
        }
        out.push_str("</g>\n</svg>\n");
        out
    }

    /// Writes the current frame to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg()).with_context(|| format!("write svg {}", path.display()))
    }

    /// Moves to `to`, drawing if the pen is down and recording fill points.
    fn travel(&mut self, to: Point, draw: bool) {
        if draw && self.pen {
            if self.stroke.is_empty() {
                self.stroke.push(self.pos);
            }
            self.stroke.push(to);
        } else {
            self.flush_stroke();
        }
        if let Some(path) = self.fill_path.as_mut() {
            path.push(to);
        }
        self.pos = to;
    }

    fn take_stroke(&mut self) -> Option<String> {
        if self.stroke.len() < 2 {
            self.stroke.clear();
            return None;
        }
        let points = points_attr(&self.stroke);
        self.stroke.clear();
        Some(format!(
            r#"<polyline points="{points}" fill="none" stroke="{}"/>"#,
            rgb_attr(self.fill_color)
        ))
    }

    fn flush_stroke(&mut self) {
        if let Some(el) = self.take_stroke() {
            self.elements.push(el);
        }
    }
}

impl Canvas for SvgCanvas {
    fn begin_frame(&mut self, zoom: f64) {
        *self = Self {
            zoom,
            ..Self::default()
        };
    }

    fn end_frame(&mut self) {
        self.flush_stroke();
    }

    fn set_fill_color(&mut self, color: Rgb) {
        // A stroke keeps the color it was started with.
        if self.fill_path.is_none() {
            self.flush_stroke();
        }
        self.fill_color = color;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.travel((x, y), false);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.travel((x, y), true);
    }

    fn begin_fill(&mut self) {
        self.fill_path = Some(vec![self.pos]);
    }

    fn end_fill(&mut self) {
        let Some(path) = self.fill_path.take() else {
            return;
        };
        let stroke = self.take_stroke();
        if path.len() >= 3 {
            self.elements.push(format!(
                r#"<polygon points="{}" fill="{}" stroke="none"/>"#,
                points_attr(&path),
                rgb_attr(self.fill_color)
            ));
        }
        // Outline goes over the fill it was traced with.
        if let Some(el) = stroke {
            self.elements.push(el);
        }
    }

    fn pen_up(&mut self) {
        self.flush_stroke();
        self.pen = false;
    }

    fn pen_down(&mut self) {
        self.pen = true;
    }

    fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees;
    }

    fn forward(&mut self, len: f64) {
        let (s, c) = self.heading.to_radians().sin_cos();
        let to = (self.pos.0 + len * c, self.pos.1 + len * s);
        self.travel(to, true);
    }

    fn turn(&mut self, degrees: f64) {
        self.heading -= degrees;
    }

    fn arc(&mut self, radius: f64, extent: Option<f64>, steps: Option<u32>) {
        let extent = extent.unwrap_or(360.0);
        let steps = steps.unwrap_or_else(|| {
            let frac = extent.abs() / 360.0;
            1 + ((11.0 + radius.abs() / 6.0).min(59.0) * frac) as u32
        });
        let mut w = extent / f64::from(steps);
        let mut w2 = 0.5 * w;
        let mut l = 2.0 * radius * w2.to_radians().sin();
        if radius < 0.0 {
            (l, w, w2) = (-l, -w, -w2);
        }
        self.heading += w2;
        for _ in 0..steps {
            self.forward(l);
            self.heading += w;
        }
        self.heading -= w2;
    }
}

fn fmt(v: f64) -> String {
    format!("{v:.4}")
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", fmt(*x), fmt(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn rgb_attr(c: Rgb) -> String {
    let ch = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({},{},{})", ch(c.r), ch(c.g), ch(c.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn filled_square_becomes_polygon_then_outline() {
        let mut canvas = SvgCanvas::new();
        canvas.begin_frame(2.0);
        canvas.set_fill_color(Rgb::new(1.0, 0.5, 0.0));
        canvas.pen_up();
        canvas.move_to(0.0, 0.0);
        canvas.pen_down();
        canvas.begin_fill();
        for (x, y) in [(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)] {
            canvas.line_to(x, y);
        }
        canvas.end_fill();
        canvas.pen_up();
        canvas.end_frame();

        assert_eq!(canvas.element_count(), 2);
        let svg = canvas.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="-2.0000 -2.0000 4.0000 4.0000""#));
        let polygon = svg.find("<polygon").unwrap();
        let outline = svg.find("<polyline").unwrap();
        assert!(polygon < outline);
        assert!(svg.contains(r#"fill="rgb(255,128,0)""#));
        assert!(svg.contains(r#"stroke="rgb(255,128,0)""#));
        assert!(!svg.contains("black"));
    }

    #[test]
    fn color_change_splits_the_outline() {
        let mut canvas = SvgCanvas::new();
        canvas.set_fill_color(Rgb::new(0.0, 0.0, 1.0));
        canvas.forward(1.0);
        canvas.set_fill_color(Rgb::new(1.0, 0.0, 0.0));
        canvas.forward(1.0);
        canvas.end_frame();

        assert_eq!(canvas.element_count(), 2);
        let svg = canvas.to_svg();
        let blue = svg.find(r#"stroke="rgb(0,0,255)""#).unwrap();
        let red = svg.find(r#"stroke="rgb(255,0,0)""#).unwrap();
        assert!(blue < red);
    }

    #[test]
    fn turn_is_clockwise() {
        let mut canvas = SvgCanvas::new();
        canvas.set_heading(0.0);
        canvas.turn(90.0);
        canvas.forward(2.0);
        let (x, y) = canvas.position();
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn full_circle_returns_to_start() {
        let mut canvas = SvgCanvas::new();
        canvas.move_to(3.0, 4.0);
        canvas.set_heading(30.0);
        canvas.arc(5.0, None, None);
        let (x, y) = canvas.position();
        assert_abs_diff_eq!(x, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(canvas.heading(), 390.0, epsilon = 1e-9);
    }

    #[test]
    fn half_circle_lands_on_the_far_side() {
        let mut canvas = SvgCanvas::new();
        canvas.arc(1.0, Some(180.0), Some(4));
        let (x, y) = canvas.position();
        // Center sits to the left of the heading, at (0, 1).
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(canvas.heading(), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn pen_up_moves_leave_no_marks() {
        let mut canvas = SvgCanvas::new();
        canvas.pen_up();
        canvas.forward(1.0);
        canvas.line_to(4.0, 4.0);
        canvas.end_frame();
        assert_eq!(canvas.element_count(), 0);
    }
}

//! Transform, cull, clip and projection through the public API.

use approx::assert_abs_diff_eq;
use engine_shared::{
    camera::Camera,
    loader::{load_scene, MemorySource},
    math::Vec3,
    render::{DrawOp, RecordingCanvas, RenderConfig, Renderer},
    scene::{Polygon, Rgb, SceneItem},
};

fn projected_points(canvas: &RecordingCanvas) -> Vec<(f64, f64)> {
    canvas
        .ops
        .iter()
        .filter_map(|op| match *op {
            DrawOp::MoveTo(x, y) | DrawOp::LineTo(x, y) => Some((x, y)),
            _ => None,
        })
        .collect()
}

#[test]
fn square_seen_from_a_turned_camera() -> anyhow::Result<()> {
    // Yaw 90 looks down -x; the square sits 5 units away facing +x.
    let camera = Camera::new(Vec3::ZERO, 90.0, 1.0);
    let square = Polygon::new(
        vec![
            Vec3::new(-5.0, -0.5, -0.5),
            Vec3::new(-5.0, 0.5, -0.5),
            Vec3::new(-5.0, 0.5, 0.5),
            Vec3::new(-5.0, -0.5, 0.5),
        ],
        Rgb::WHITE,
    )?;
    let items = [SceneItem::from(square)];

    let mut canvas = RecordingCanvas::default();
    let stats = Renderer::default().render(&camera, &items, &mut canvas);
    assert_eq!(stats.polygons_drawn, 1);
    assert_eq!(stats.polygons_culled, 0);

    let points = projected_points(&canvas);
    assert_eq!(points.len(), 5);
    for (x, y) in &points {
        assert!(x.is_finite() && y.is_finite());
        assert_abs_diff_eq!(x.abs(), 0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(y.abs(), 0.1, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn floor_under_the_camera_is_clipped_not_dropped() -> anyhow::Result<()> {
    let src = MemorySource::new().with_object(
        "floor",
        "v -10 0 -10\nv -10 0 10\nv 10 0 10\nv 10 0 -10\n",
    );
    let scene = load_scene(&src, "floor")?;
    let camera = Camera::new(Vec3::new(0.0, 1.9, 0.0), 0.0, 1.0);

    let mut canvas = RecordingCanvas::default();
    let stats = Renderer::default().render(&camera, &scene.items, &mut canvas);
    assert_eq!(stats.polygons_drawn, 1);

    let points = projected_points(&canvas);
    // Two vertices behind the eye become two points on the near plane.
    assert_eq!(points.len(), 5);
    assert!(points.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
    // Everything on the floor projects below the horizon.
    assert!(points.iter().all(|(_, y)| *y < 0.0));
    Ok(())
}

#[test]
fn render_distance_is_configurable() -> anyhow::Result<()> {
    let square = Polygon::new(
        vec![
            Vec3::new(-0.5, -0.5, 12.0),
            Vec3::new(-0.5, 0.5, 12.0),
            Vec3::new(0.5, 0.5, 12.0),
            Vec3::new(0.5, -0.5, 12.0),
        ],
        Rgb::WHITE,
    )?;
    let items = [SceneItem::from(square)];
    let near_sighted = Renderer::new(RenderConfig {
        render_distance: 10.0,
        ..RenderConfig::default()
    });

    let mut canvas = RecordingCanvas::default();
    let stats = near_sighted.render(&Camera::default(), &items, &mut canvas);
    assert_eq!(stats.polygons_culled, 1);
    let stats = Renderer::default().render(&Camera::default(), &items, &mut canvas);
    assert_eq!(stats.polygons_drawn, 1);
    Ok(())
}

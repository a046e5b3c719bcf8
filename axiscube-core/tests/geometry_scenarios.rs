//! End-to-end geometry scenarios
//!
//! Builds, normalizes, views and projects complete structures through the
//! public API.

use approx::assert_relative_eq;
use axiscube_core::{
    build, catalog, normalize, project, rebuild_camera, rebuild_structure, sort_by_distance,
    AxisInfo, Camera, CameraSettings, Dimension, Message, Model, PerspectiveParams, Viewpoint,
    VIEW_RADIUS,
};
use nalgebra::{Point3, Vector3};

fn axes(n: usize) -> Vec<AxisInfo> {
    (0..n)
        .map(|i| AxisInfo::new(format!("ax{i}"), format!("Axis {i}"), 0.25 * (i % 5) as f32, 0.0, 1.0))
        .collect()
}

#[test]
fn golden_box_has_expected_corners() {
    let distances = [1.0, 1.618, 2.618];
    let dims: Vec<Dimension> = catalog(&axes(3))
        .into_iter()
        .zip(distances)
        .map(|(d, r)| d.with_distance(r))
        .collect();

    let skeleton = build(&dims);
    assert_eq!(skeleton.points.len(), 8);
    assert_eq!(skeleton.lines.len(), 12);

    let a = Vector3::new(1.0, 0.0, 0.0);
    let b = Vector3::new(0.0, 0.0, -1.618);
    let c = Vector3::new(0.0, 2.618, 0.0);
    for mask in 0..8u32 {
        let mut corner = Point3::origin();
        if mask & 1 != 0 {
            corner += a;
        }
        if mask & 2 != 0 {
            corner += b;
        }
        if mask & 4 != 0 {
            corner += c;
        }
        let hits = skeleton
            .points
            .iter()
            .filter(|v| (v.position - corner).norm() < 1e-5)
            .count();
        assert_eq!(hits, 1, "corner {:?}", corner);
    }

    // Every edge is parallel to exactly one box side and as long as it
    for edge in &skeleton.lines {
        let length = edge.segment.delta().norm();
        assert_relative_eq!(length, distances[edge.origin_dimension], epsilon = 1e-5);
    }
}

#[test]
fn perspective_camera_centers_the_origin() {
    let camera = Camera::perspective(PerspectiveParams {
        viewpoint: Viewpoint::look_at(
            Point3::new(10.0, 0.0, 0.0),
            Point3::origin(),
            Vector3::new(0.0, 0.0, 1.0),
        ),
        screen_width: 800.0,
        screen_height: 600.0,
        vertical_fov: 30f32.to_radians(),
        near: 0.1,
        far: 100.0,
    });
    let p = project(&camera, &Point3::origin());
    assert_relative_eq!(p.x, 400.0, epsilon = 1e-3);
    assert_relative_eq!(p.y, 300.0, epsilon = 1e-3);
}

#[test]
fn normalized_structures_fit_the_view_radius() {
    for n in 0..=9 {
        let dims: Vec<Dimension> = catalog(&axes(n))
            .into_iter()
            .enumerate()
            .map(|(i, d)| d.with_distance(0.5 + i as f32 * 0.75))
            .collect();
        let structure = normalize(build(&dims), &dims);
        let radius = structure
            .points
            .iter()
            .map(|v| nalgebra::distance(&structure.focal_point, &v.position))
            .fold(0.0_f32, f32::max);
        assert!(radius <= VIEW_RADIUS + 1e-5, "n = {}, radius = {}", n, radius);
        assert_eq!(structure.coordinates.len(), n);
    }
}

#[test]
fn orbiting_model_keeps_focal_point_centered() {
    let mut model = Model::new(axes(5));
    let settings = CameraSettings::default();
    for step in 0..12 {
        model = axiscube_core::update(
            &model,
            Message::Drag {
                dx: 37.0,
                dy: -11.0 * step as f32,
                sensitivity: 0.01,
            },
        )
        .unwrap();
        let structure = rebuild_structure(&model);
        let camera = rebuild_camera(&model, &settings, 640.0, 480.0);
        let p = project(&camera, &structure.focal_point);
        assert_relative_eq!(p.x, 320.0, epsilon = 1e-2);
        assert_relative_eq!(p.y, 240.0, epsilon = 1e-2);
    }
}

#[test]
fn depth_order_is_back_to_front_from_any_eye() {
    let model = Model::new(axes(4));
    let structure = rebuild_structure(&model);
    let eyes = [
        Point3::new(5.0, 0.0, 0.0),
        Point3::new(-2.0, 3.0, 1.0),
        Point3::new(0.0, 0.0, -7.0),
    ];
    for eye in eyes {
        let sorted = sort_by_distance(&eye, &structure.lines);
        assert_eq!(sorted.len(), structure.lines.len());
        let distances: Vec<f32> = sorted
            .iter()
            .map(|e| nalgebra::distance(&eye, &e.segment.midpoint()))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] >= w[1]));
    }
}

//! Projection of 3D primitives to screen space
//!
//! Screen coordinates have their origin at the bottom-left corner with `y`
//! growing upwards; renderers with a top-left origin flip `y` themselves.
//! Nothing is clipped. Points at or behind the eye (`w <= 0` in clip space)
//! come out unbounded or mirrored and should be treated as undefined.

use nalgebra::{Point2, Point3};

use crate::camera::Camera;
use crate::hypercube::Segment;

/// A 2D line segment in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSegment {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
}

/// Project a world-space point to pixel coordinates.
pub fn project(camera: &Camera, point: &Point3<f32>) -> Point2<f32> {
    let clip = camera.view_projection() * point.to_homogeneous();
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;

    let half_width = camera.half_width();
    let half_height = camera.half_height();
    Point2::new(
        half_width + half_width * ndc_x,
        half_height + half_height * ndc_y,
    )
}

/// Project both endpoints of a segment
pub fn project_segment(camera: &Camera, segment: &Segment) -> ScreenSegment {
    ScreenSegment {
        start: project(camera, &segment.start),
        end: project(camera, &segment.end),
    }
}

pub fn project_triangle(camera: &Camera, triangle: &[Point3<f32>; 3]) -> [Point2<f32>; 3] {
    (*triangle).map(|p| project(camera, &p))
}

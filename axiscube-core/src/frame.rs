//! Frame assembly: the ordered 2D primitives handed to a renderer
//!
//! Primitives are listed in draw order for a renderer without a depth buffer:
//! dashed axis indicators, skeleton edges farthest first, skeleton vertices and
//! finally the current value vertex.

use nalgebra::Point2;

use crate::camera::Camera;
use crate::catalog::Color;
use crate::depth::sort_by_distance;
use crate::normalize::Structure;
use crate::projection::{project, project_segment};

/// Stroke and radius hints for a given number of active axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub stroke_width: f32,
    pub point_radius: f32,
}

impl Style {
    /// Thinner lines and smaller points as the skeleton gets denser
    pub fn for_dimension_count(n: usize) -> Self {
        let n = n as f32;
        Self {
            stroke_width: (8.0 - n).max(1.0),
            point_radius: (10.0 - n).max(1.0),
        }
    }
}

/// A screen-space drawing primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Line {
        start: Point2<f32>,
        end: Point2<f32>,
        color: Color,
        stroke_width: f32,
        dashed: bool,
        axis: usize,
    },
    Point {
        center: Point2<f32>,
        radius: f32,
        fill: Color,
        stroke: Color,
        /// `None` for the current value vertex
        axis: Option<usize>,
    },
}

/// One frame worth of primitives for a `width` by `height` screen
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub style: Style,
    pub primitives: Vec<Primitive>,
}

impl Frame {
    pub fn draw_order(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    pub fn line_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
            .count()
    }

    pub fn point_count(&self) -> usize {
        self.primitives.len() - self.line_count()
    }
}

/// Project `structure` through `camera` and order the result for drawing.
///
/// Projected coordinates are scaled by `display_scale` about the screen
/// centre, so the structure keeps its on-screen size as the eye moves.
pub fn assemble(structure: &Structure, camera: &Camera, display_scale: f32) -> Frame {
    let style = Style::for_dimension_count(structure.dimension_count());
    let center = Point2::new(camera.half_width(), camera.half_height());
    let to_screen = |p: Point2<f32>| center + (p - center) * display_scale;

    let capacity = structure.coordinates.len() + structure.lines.len() + structure.points.len() + 1;
    let mut primitives = Vec::with_capacity(capacity);

    for coordinate in &structure.coordinates {
        let segment = project_segment(camera, &coordinate.segment);
        primitives.push(Primitive::Line {
            start: to_screen(segment.start),
            end: to_screen(segment.end),
            color: coordinate.color,
            stroke_width: style.stroke_width,
            dashed: true,
            axis: coordinate.origin_dimension,
        });
    }

    for edge in sort_by_distance(&camera.viewpoint.eye, &structure.lines) {
        let segment = project_segment(camera, &edge.segment);
        primitives.push(Primitive::Line {
            start: to_screen(segment.start),
            end: to_screen(segment.end),
            color: edge.color,
            stroke_width: style.stroke_width,
            dashed: false,
            axis: edge.origin_dimension,
        });
    }

    for vertex in &structure.points {
        primitives.push(Primitive::Point {
            center: to_screen(project(camera, &vertex.position)),
            radius: style.point_radius,
            fill: vertex.color,
            stroke: vertex.color,
            axis: Some(vertex.origin_dimension),
        });
    }

    primitives.push(Primitive::Point {
        center: to_screen(project(camera, &structure.value)),
        radius: style.point_radius,
        fill: Color::WHITE,
        stroke: Color::BLACK,
        axis: None,
    });

    Frame {
        width: camera.screen_width,
        height: camera.screen_height,
        style,
        primitives,
    }
}

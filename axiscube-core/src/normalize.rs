//! Centering and scaling of a skeleton into the view volume

use log::debug;
use nalgebra::Point3;

use crate::catalog::Dimension;
use crate::hypercube::{Edge, Segment, Skeleton, Vertex};

/// Radius of the sphere, around the focal point, the structure is fitted into.
pub const VIEW_RADIUS: f32 = 0.45;

/// Model-space geometry for one build, ready to be viewed
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub points: Vec<Vertex>,
    pub lines: Vec<Edge>,
    /// One indicator per active axis, ending on `value`
    pub coordinates: Vec<Edge>,
    /// The current combination of all axis values
    pub value: Point3<f32>,
    pub focal_point: Point3<f32>,
}

impl Structure {
    pub fn dimension_count(&self) -> usize {
        self.coordinates.len()
    }
}

/// Midpoint of the main diagonal; depends on distances only, not on values.
pub fn focal_point(dimensions: &[Dimension]) -> Point3<f32> {
    dimensions
        .iter()
        .fold(Point3::origin(), |p, d| p + d.offset() * 0.5)
}

/// The point where every axis sits at its current value
pub fn current_value(dimensions: &[Dimension]) -> Point3<f32> {
    dimensions
        .iter()
        .fold(Point3::origin(), |p, d| p + d.value_offset())
}

/// Uniform scale that fits `points` within [`VIEW_RADIUS`] of `focal`.
/// Never magnifies.
pub fn scale_factor(focal: &Point3<f32>, points: &[Vertex]) -> f32 {
    let max_distance = points
        .iter()
        .map(|v| nalgebra::distance(focal, &v.position))
        .fold(0.0_f32, f32::max);

    if max_distance > VIEW_RADIUS {
        VIEW_RADIUS / max_distance
    } else {
        1.0
    }
}

/// Scale `p` by `scale` about `focal`
pub fn scale_about(focal: &Point3<f32>, scale: f32, p: &Point3<f32>) -> Point3<f32> {
    focal + (p - focal) * scale
}

/// Center and scale a skeleton, and derive the value point and axis indicators.
pub fn normalize(skeleton: Skeleton, dimensions: &[Dimension]) -> Structure {
    let focal = focal_point(dimensions);
    let scale = scale_factor(&focal, &skeleton.points);
    let value = current_value(dimensions);
    let to_view = |p: &Point3<f32>| scale_about(&focal, scale, p);

    debug!(
        "normalizing {} dimensions: focal {:?}, scale {}",
        dimensions.len(),
        focal,
        scale
    );

    let points = skeleton
        .points
        .into_iter()
        .map(|v| Vertex {
            position: to_view(&v.position),
            ..v
        })
        .collect();

    let lines = skeleton
        .lines
        .into_iter()
        .map(|e| Edge {
            segment: e.segment.map(to_view),
            ..e
        })
        .collect();

    let coordinates = dimensions
        .iter()
        .map(|d| {
            let segment = Segment::new(value - d.value_offset(), value);
            Edge::new(d.index, d.color, segment.map(to_view))
        })
        .collect();

    Structure {
        points,
        lines,
        coordinates,
        value: to_view(&value),
        focal_point: focal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, AxisInfo};
    use crate::hypercube::build;

    fn dimensions(values: &[f32]) -> Vec<Dimension> {
        let axes: Vec<AxisInfo> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| AxisInfo::new(format!("ax{i}"), format!("Axis {i}"), v, 0.0, 1.0))
            .collect();
        catalog(&axes)
    }

    fn radius(structure: &Structure) -> f32 {
        structure
            .points
            .iter()
            .map(|v| nalgebra::distance(&structure.focal_point, &v.position))
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_focal_point_is_half_diagonal() {
        let dims = dimensions(&[0.2, 0.9]);
        let focal = focal_point(&dims);
        assert!((focal - Point3::new(0.5, 0.0, -0.5)).norm() < 1e-6);
    }

    #[test]
    fn test_empty_structure() {
        let structure = normalize(build(&[]), &[]);
        assert_eq!(structure.points.len(), 1);
        assert_eq!(structure.focal_point, Point3::origin());
        assert_eq!(structure.value, Point3::origin());
        assert!(structure.coordinates.is_empty());
    }

    #[test]
    fn test_large_structure_fits_view_radius() {
        for n in 1..=8 {
            let dims: Vec<Dimension> = dimensions(&vec![0.5; n])
                .into_iter()
                .map(|d| d.with_distance(3.0))
                .collect();
            let structure = normalize(build(&dims), &dims);
            assert!((radius(&structure) - VIEW_RADIUS).abs() < 1e-5, "n = {}", n);
        }
    }

    #[test]
    fn test_small_structure_is_not_magnified() {
        let dims: Vec<Dimension> = dimensions(&[0.5, 0.5])
            .into_iter()
            .map(|d| d.with_distance(0.1))
            .collect();
        let skeleton = build(&dims);
        let structure = normalize(skeleton.clone(), &dims);
        assert_eq!(scale_factor(&structure.focal_point, &skeleton.points), 1.0);
        for (a, b) in structure.points.iter().zip(&skeleton.points) {
            assert!((a.position - b.position).norm() < 1e-6);
        }
    }

    #[test]
    fn test_structure_on_view_radius_keeps_unit_scale() {
        // A single edge of 0.9 reaches exactly VIEW_RADIUS from its midpoint
        let dims: Vec<Dimension> = dimensions(&[0.5])
            .into_iter()
            .map(|d| d.with_distance(0.9))
            .collect();
        let skeleton = build(&dims);
        let focal = focal_point(&dims);
        assert_eq!(scale_factor(&focal, &skeleton.points), 1.0);
        let structure = normalize(skeleton.clone(), &dims);
        assert_eq!(structure.points, skeleton.points);

        // Anything longer is shrunk
        let longer: Vec<Dimension> = dims.into_iter().map(|d| d.with_distance(1.0)).collect();
        let scale = scale_factor(&focal_point(&longer), &build(&longer).points);
        assert!((scale - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_coordinates_end_on_value() {
        let dims = dimensions(&[0.25, 1.0, 0.5]);
        let structure = normalize(build(&dims), &dims);
        assert_eq!(structure.coordinates.len(), 3);
        for (coordinate, dim) in structure.coordinates.iter().zip(&dims) {
            assert_eq!(coordinate.origin_dimension, dim.index);
            assert!((coordinate.segment.end - structure.value).norm() < 1e-6);
        }
    }

    #[test]
    fn test_coordinate_runs_along_its_axis() {
        let dims = dimensions(&[0.25, 1.0, 0.5]);
        let structure = normalize(build(&dims), &dims);
        let scale = scale_factor(&structure.focal_point, &build(&dims).points);
        for (coordinate, dim) in structure.coordinates.iter().zip(&dims) {
            let expected = dim.value_offset() * scale;
            assert!((coordinate.segment.delta() - expected).norm() < 1e-5);
        }
    }

    #[test]
    fn test_value_lies_inside_the_cube() {
        let dims = dimensions(&[0.0, 0.0, 0.0]);
        let structure = normalize(build(&dims), &dims);
        // All values at min: the value point is the scaled origin vertex
        let origin = structure.points.last().map(|v| v.position);
        assert_eq!(origin, Some(structure.value));
    }
}

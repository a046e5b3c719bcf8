//! Hypercube skeleton construction
//!
//! The n-cube is built by repeated doubling: each dimension translates a copy
//! of the current skeleton along its edge vector and bridges every original
//! vertex to its copy.

use nalgebra::{Point3, Vector3};

use crate::catalog::{color_for, Color, Dimension};

/// A skeleton vertex tagged with the axis that introduced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub origin_dimension: usize,
    pub color: Color,
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(origin_dimension: usize, color: Color, position: Point3<f32>) -> Self {
        Self {
            origin_dimension,
            color,
            position,
        }
    }

    /// The seed vertex every build starts from, tagged with axis 0
    pub fn seed() -> Self {
        Self::new(0, color_for(0), Point3::origin())
    }
}

/// A 3D line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl Segment {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> Point3<f32> {
        nalgebra::center(&self.start, &self.end)
    }

    pub fn translated(&self, offset: &Vector3<f32>) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Vector from `start` to `end`
    pub fn delta(&self) -> Vector3<f32> {
        self.end - self.start
    }

    pub fn map(&self, f: impl Fn(&Point3<f32>) -> Point3<f32>) -> Self {
        Self::new(f(&self.start), f(&self.end))
    }
}

/// A skeleton edge tagged with the axis that introduced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub origin_dimension: usize,
    pub color: Color,
    pub segment: Segment,
}

impl Edge {
    pub fn new(origin_dimension: usize, color: Color, segment: Segment) -> Self {
        Self {
            origin_dimension,
            color,
            segment,
        }
    }

    pub fn translated(&self, offset: &Vector3<f32>) -> Self {
        Self {
            segment: self.segment.translated(offset),
            ..*self
        }
    }
}

/// Vertices and edges of an n-cube embedded in 3D
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub points: Vec<Vertex>,
    pub lines: Vec<Edge>,
}

impl Skeleton {
    /// The 0-cube: a single vertex at the origin
    pub fn seed() -> Self {
        Self {
            points: vec![Vertex::seed()],
            lines: Vec::new(),
        }
    }

    /// Extend the skeleton by one dimension.
    ///
    /// Output order is translated vertices then originals, and bridges, then
    /// translated edges, then originals. Carried edges keep their tags.
    pub fn extrude(&self, dimension: &Dimension) -> Self {
        let offset = dimension.offset();
        let tag = dimension.index;

        let mut points = Vec::with_capacity(self.points.len() * 2);
        points.extend(
            self.points
                .iter()
                .map(|v| Vertex::new(tag, dimension.color, v.position + offset)),
        );
        points.extend_from_slice(&self.points);

        let mut lines = Vec::with_capacity(self.lines.len() * 2 + self.points.len());
        lines.extend(self.points.iter().map(|v| {
            Edge::new(
                tag,
                dimension.color,
                Segment::new(v.position, v.position + offset),
            )
        }));
        lines.extend(self.lines.iter().map(|e| e.translated(&offset)));
        lines.extend_from_slice(&self.lines);

        Self { points, lines }
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::seed()
    }
}

/// Build the skeleton of the hypercube spanned by `dimensions`, in order.
pub fn build(dimensions: &[Dimension]) -> Skeleton {
    dimensions
        .iter()
        .fold(Skeleton::seed(), |skeleton, dimension| skeleton.extrude(dimension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, AxisInfo};

    fn dimensions(n: usize) -> Vec<Dimension> {
        let axes: Vec<AxisInfo> = (0..n)
            .map(|i| AxisInfo::new(format!("ax{i}"), format!("Axis {i}"), 0.5, 0.0, 1.0))
            .collect();
        catalog(&axes)
    }

    #[test]
    fn test_zero_dimensions() {
        let skeleton = build(&[]);
        assert_eq!(skeleton.points.len(), 1);
        assert_eq!(skeleton.points[0].position, Point3::origin());
        assert_eq!(skeleton.points[0].origin_dimension, 0);
        assert!(skeleton.lines.is_empty());
    }

    #[test]
    fn test_counts() {
        for n in 0..=10 {
            let skeleton = build(&dimensions(n));
            assert_eq!(skeleton.points.len(), 1 << n);
            let expected_lines = if n == 0 { 0 } else { n * (1 << (n - 1)) };
            assert_eq!(skeleton.lines.len(), expected_lines, "n = {}", n);
        }
    }

    #[test]
    fn test_edges_follow_their_dimension() {
        let dims = dimensions(5);
        let skeleton = build(&dims);
        for edge in &skeleton.lines {
            let expected = dims[edge.origin_dimension].offset();
            assert!((edge.segment.delta() - expected).norm() < 1e-5);
            assert_eq!(edge.color, dims[edge.origin_dimension].color);
        }
    }

    #[test]
    fn test_extrude_order_and_tags() {
        let dims = dimensions(2);
        let once = Skeleton::seed().extrude(&dims[0]);
        assert_eq!(once.points[0].position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(once.points[1].position, Point3::origin());

        let twice = once.extrude(&dims[1]);
        // bridges first, tagged with the new dimension
        assert_eq!(twice.lines[0].origin_dimension, 1);
        assert_eq!(twice.lines[1].origin_dimension, 1);
        // carried edges keep their tag
        assert_eq!(twice.lines[2].origin_dimension, 0);
        assert_eq!(twice.lines[3].origin_dimension, 0);
        assert_eq!(twice.lines[3], once.lines[0]);
    }

    #[test]
    fn test_coincident_directions_do_not_fail() {
        let mut dims = dimensions(3);
        dims[1].direction = dims[0].direction;
        dims[2].distance = 0.0;
        let skeleton = build(&dims);
        assert_eq!(skeleton.points.len(), 8);
        assert!(skeleton
            .points
            .iter()
            .all(|v| v.position.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn test_segment_midpoint() {
        let segment = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, -6.0));
        assert_eq!(segment.midpoint(), Point3::new(1.0, 2.0, -3.0));
    }
}

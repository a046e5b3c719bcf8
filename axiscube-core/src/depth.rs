//! Back-to-front ordering for drawing without a depth buffer

use nalgebra::Point3;

use crate::hypercube::Edge;

/// Distance from `eye` to the midpoint of `edge`
pub fn edge_distance(eye: &Point3<f32>, edge: &Edge) -> f32 {
    nalgebra::distance(eye, &edge.segment.midpoint())
}

/// Sort edges farthest-first by midpoint distance to `eye` (painter's order).
///
/// The sort is stable, so edges at equal distance keep their input order.
pub fn sort_by_distance(eye: &Point3<f32>, edges: &[Edge]) -> Vec<Edge> {
    let mut keyed: Vec<(f32, Edge)> = edges
        .iter()
        .map(|edge| (-edge_distance(eye, edge), *edge))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    keyed.into_iter().map(|(_, edge)| edge).collect()
}

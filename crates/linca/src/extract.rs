//! De-interleave and scale a solution into per-vertex coordinates.

use nalgebra::Vector2;

use crate::solve::Solution;
use crate::types::VertexId;

/// `(x(i)·scale, y(i)·scale)` for every vertex, in index order. No rounding.
pub fn coordinates(solution: &Solution, scale: f64) -> Vec<Vector2<f64>> {
    (0..solution.vertex_count())
        .map(|i| solution.position(VertexId(i)) * scale)
        .collect()
}

//! Edge and vertex types passed between the pipeline stages.

use nalgebra::Vector2;

/// Dense vertex index in `[0, V)`. Index 0 is the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl VertexId {
    pub const ANCHOR: VertexId = VertexId(0);

    /// Column of this vertex's x coordinate in the coefficient matrix.
    #[inline]
    pub fn x_col(self) -> usize {
        2 * self.0
    }

    /// Column of this vertex's y coordinate in the coefficient matrix.
    #[inline]
    pub fn y_col(self) -> usize {
        2 * self.0 + 1
    }
}

/// Edge as read from input: arbitrary identifiers plus desired displacement.
#[derive(Clone, Debug, PartialEq)]
pub struct RawEdge<Id> {
    pub source: Id,
    pub target: Id,
    pub dx: f64,
    pub dy: f64,
}

impl<Id> RawEdge<Id> {
    pub fn new(source: Id, target: Id, dx: f64, dy: f64) -> Self {
        Self {
            source,
            target,
            dx,
            dy,
        }
    }
}

/// Directed edge in index form with desired displacement `target - source`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub delta: Vector2<f64>,
}

impl Edge {
    pub fn new(source: usize, target: usize, dx: f64, dy: f64) -> Self {
        Self {
            source: VertexId(source),
            target: VertexId(target),
            delta: Vector2::new(dx, dy),
        }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Desired Euclidean length `√(dx² + dy²)`.
    #[inline]
    pub fn length(&self) -> f64 {
        self.delta.norm()
    }

    /// True when the edge constrains its endpoints relative to each other.
    #[inline]
    pub fn is_binding(&self) -> bool {
        !self.is_self_loop() && self.length() > 0.0
    }
}

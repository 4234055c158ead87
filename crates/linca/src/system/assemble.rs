//! Triplet assembly of the least-squares system `A x ≈ b`.

use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::error::{LincaError, Singularity};
use crate::types::{Edge, VertexId};

/// Sparse coefficient matrix (`2E + 2` rows, `2V` columns) plus target vector.
///
/// Invariants:
/// - rows `2e` and `2e+1` belong to edge `e` (length, straightness);
/// - the last two rows pin the anchor's x and y to zero;
/// - `triplets == 8E + 2` (duplicates are summed in `matrix`).
#[derive(Clone, Debug)]
pub struct LinearSystem {
    pub matrix: CsrMatrix<f64>,
    pub target: DVector<f64>,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub triplets: usize,
    /// Weight `s` of the straightness rows.
    pub straightness: f64,
}

impl LinearSystem {
    #[inline]
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Stored entries after duplicate summation.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// `‖A x − b‖₂` for a candidate solution of length `2V`.
    pub fn residual_norm(&self, x: &DVector<f64>) -> f64 {
        debug_assert_eq!(x.len(), self.cols());
        let ax: DVector<f64> = &self.matrix * x;
        (ax - &self.target).norm()
    }
}

/// Build the system for `edges` over `vertex_count` vertices.
///
/// Per edge with unit direction `(ux, uy) = (dx, dy) / L`, `L = √(dx²+dy²)`:
/// - length row: `ux·(x_v − x_u) + uy·(y_v − y_u) = L`
/// - straightness row: `s·(uy·(x_u − x_v) + ux·(y_v − y_u)) = 0`
///
/// Zero-length edges contribute all-zero rows. Two anchor rows follow.
pub fn assemble(
    edges: &[Edge],
    straightness: f64,
    vertex_count: usize,
) -> Result<LinearSystem, LincaError> {
    if vertex_count == 0 {
        return Err(Singularity::EmptyGraph.into());
    }
    check_bounds(edges, vertex_count)?;

    let nrows = 2 * edges.len() + 2;
    let ncols = 2 * vertex_count;
    let s = straightness;
    let mut coo = CooMatrix::new(nrows, ncols);
    let mut target = DVector::zeros(nrows);

    for (k, e) in edges.iter().enumerate() {
        let (u, v) = (e.source, e.target);
        let len = e.length();
        let (ux, uy) = if len > 0.0 {
            (e.delta.x / len, e.delta.y / len)
        } else {
            (0.0, 0.0)
        };
        let row_len = 2 * k;
        coo.push(row_len, u.x_col(), -ux);
        coo.push(row_len, v.x_col(), ux);
        coo.push(row_len, u.y_col(), -uy);
        coo.push(row_len, v.y_col(), uy);
        target[row_len] = len;

        let row_dir = row_len + 1;
        coo.push(row_dir, u.x_col(), s * uy);
        coo.push(row_dir, v.x_col(), -s * uy);
        coo.push(row_dir, u.y_col(), -s * ux);
        coo.push(row_dir, v.y_col(), s * ux);
    }

    let anchor = VertexId::ANCHOR;
    coo.push(nrows - 2, anchor.x_col(), 1.0);
    coo.push(nrows - 1, anchor.y_col(), 1.0);

    let triplets = coo.nnz();
    let matrix = CsrMatrix::from(&coo);
    tracing::debug!(
        rows = nrows,
        cols = ncols,
        triplets,
        nnz = matrix.nnz(),
        straightness = s,
        "assembled least-squares system"
    );
    Ok(LinearSystem {
        matrix,
        target,
        vertex_count,
        edge_count: edges.len(),
        triplets,
        straightness: s,
    })
}

/// Every endpoint must index one of `vertex_count` vertices.
pub(crate) fn check_bounds(edges: &[Edge], vertex_count: usize) -> Result<(), LincaError> {
    for (k, e) in edges.iter().enumerate() {
        for v in [e.source, e.target] {
            if v.0 >= vertex_count {
                return Err(LincaError::VertexOutOfRange {
                    edge: k,
                    vertex: v.0,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}

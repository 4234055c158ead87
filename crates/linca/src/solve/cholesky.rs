//! Normal equations and their sparse Cholesky solve.

use nalgebra::{DMatrix, DVector, Vector2};
use nalgebra_sparse::{factorization::CscCholesky, CscMatrix, CsrMatrix};

use super::anchor::check_anchored;
use crate::error::{LincaError, Singularity};
use crate::params::SolveCfg;
use crate::system::{check_bounds, LinearSystem};
use crate::types::{Edge, VertexId};

/// Solved coordinate vector, interleaved `[x0, y0, x1, y1, ...]`.
///
/// Invariant: the anchor entries are exactly `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub values: DVector<f64>,
}

impl Solution {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.values.len() / 2
    }

    #[inline]
    pub fn position(&self, v: VertexId) -> Vector2<f64> {
        Vector2::new(self.values[v.x_col()], self.values[v.y_col()])
    }
}

/// `(AᵗA, Aᵗb)`. The matrix is square `2V × 2V` and symmetric.
pub fn normal_equations(sys: &LinearSystem) -> (CscMatrix<f64>, DVector<f64>) {
    normal_from(&sys.matrix.transpose(), sys)
}

fn normal_from(at: &CsrMatrix<f64>, sys: &LinearSystem) -> (CscMatrix<f64>, DVector<f64>) {
    let ata: CsrMatrix<f64> = at * &sys.matrix;
    let atb: DVector<f64> = at * &sys.target;
    (CscMatrix::from(&ata), atb)
}

/// Solve `AᵗA x = Aᵗb`, rejecting singular or degenerate systems.
///
/// `edges` must be the edge list `sys` was assembled from; it drives the
/// structural check before any factorization is attempted. The first solve is
/// refined against the residual `b − A x` for up to `cfg.refine_steps` steps,
/// which recovers the accuracy the normal equations lose at extreme
/// straightness.
pub fn solve(sys: &LinearSystem, edges: &[Edge], cfg: SolveCfg) -> Result<Solution, LincaError> {
    check_bounds(edges, sys.vertex_count)?;
    check_anchored(sys.vertex_count, edges)?;

    let at = sys.matrix.transpose();
    let (ata, atb) = normal_from(&at, sys);
    tracing::debug!(n = ata.nrows(), nnz = ata.nnz(), "normal equations");

    let chol = CscCholesky::factor(&ata).map_err(|_| Singularity::NotPositiveDefinite)?;
    let pivot_ratio = pivot_ratio(&ata, chol.l());
    tracing::debug!(pivot_ratio, fill = chol.l().nnz(), "cholesky factorization");
    // With s > 0 every binding edge fixes both components of its endpoints'
    // offset, so an anchored graph has full column rank. Only length-only
    // systems can be rank deficient past the structural check.
    // Negated comparison so that NaN is rejected too.
    if sys.straightness == 0.0 && !(pivot_ratio >= cfg.pivot_tol) {
        return Err(Singularity::Degenerate { pivot_ratio }.into());
    }

    let mut values = back_substitute(&chol, &atb);
    for step in 0..cfg.refine_steps {
        let ax: DVector<f64> = &sys.matrix * &values;
        let residual = &sys.target - ax;
        let atr: DVector<f64> = &at * &residual;
        let delta = back_substitute(&chol, &atr);
        values += &delta;
        let (dn, xn) = (delta.norm(), values.norm());
        tracing::trace!(step, correction = dn, "refinement");
        if !(dn > f64::EPSILON * xn) {
            break;
        }
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Singularity::NonFinite.into());
    }
    pin_anchor(&mut values);
    Ok(Solution { values })
}

fn back_substitute(chol: &CscCholesky<f64>, rhs: &DVector<f64>) -> DVector<f64> {
    let b = DMatrix::from_column_slice(rhs.len(), 1, rhs.as_slice());
    chol.solve(&b).column(0).into_owned()
}

/// `min Lᵢᵢ² / (AᵗA)ᵢᵢ`, in `[0, 1]`. Each pivot is measured against its own
/// diagonal entry, so rescaling individual unknowns leaves the ratio unchanged.
fn pivot_ratio(ata: &CscMatrix<f64>, l: &CscMatrix<f64>) -> f64 {
    let mut diag = vec![0.0; ata.nrows()];
    for (i, j, v) in ata.triplet_iter() {
        if i == j {
            diag[i] = *v;
        }
    }
    l.triplet_iter()
        .filter(|(i, j, _)| i == j)
        .map(|(i, _, v)| if diag[i] > 0.0 { v * v / diag[i] } else { 0.0 })
        .fold(f64::INFINITY, f64::min)
}

/// Translate so the anchor sits exactly at the origin. Every edge row is
/// translation invariant, so the residual is unchanged.
fn pin_anchor(values: &mut DVector<f64>) {
    let anchor = VertexId::ANCHOR;
    let (ax, ay) = (values[anchor.x_col()], values[anchor.y_col()]);
    for (k, v) in values.iter_mut().enumerate() {
        *v -= if k % 2 == 0 { ax } else { ay };
    }
}

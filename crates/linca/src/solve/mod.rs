//! Least-squares solve via the normal equations.
//!
//! Purpose
//! - Form `AᵗA` and `Aᵗb` from an assembled system and solve with a sparse
//!   Cholesky factorization.
//! - Fail explicitly on singular systems instead of returning unconstrained
//!   or non-finite coordinates.
//!
//! Detection, in order
//! - structural: every vertex reachable from the anchor (`check_anchored`);
//! - numeric: Cholesky success; for length-only systems (`straightness = 0`)
//!   also every pivot above `SolveCfg::pivot_tol` times its diagonal entry;
//! - finiteness of the solution.
//!
//! Accuracy
//! - Squaring the condition number is accepted. The straightness weight enters
//!   `AᵗA` as `s²`, so residual refinement against `A` follows the first solve.
//!   Beyond roughly `s ≈ 1e8` (or `1/s`) the factorization itself breaks down
//!   and reports `NotPositiveDefinite`.
//!
//! Ordering
//! - `CscCholesky` factors in natural column order (vertex index order), with
//!   no fill-reducing permutation such as AMD/COLAMD. Fill-in of `L` depends on
//!   how the input numbers its vertices; on large grid-like graphs it grows
//!   faster than `O(V + E)`.

mod anchor;
mod cholesky;

pub use anchor::check_anchored;
pub use cholesky::{normal_equations, solve, Solution};

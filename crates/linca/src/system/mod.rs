//! Least-squares system assembly.
//!
//! Purpose
//! - Turn indexed edges and a straightness weight into the sparse matrix `A`
//!   and dense target `b` whose least-squares solution is the layout.
//! - Two rows per edge (length, straightness), two anchor rows at the end.
//!
//! Layout
//! - Columns alternate x/y per vertex: `x(i) = 2i`, `y(i) = 2i + 1`.
//! - Entries are pushed as coordinate triplets and compressed once into CSR.

mod assemble;

pub(crate) use assemble::check_bounds;
pub use assemble::{assemble, LinearSystem};

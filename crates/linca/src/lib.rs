//! Linear cartograms: vertex positions from desired edge displacements.
//!
//! Every edge asks for a displacement `(dx, dy)` between its endpoints. We
//! write one length row and one weighted straightness row per edge, pin the
//! anchor (vertex 0) to the origin, and solve the resulting sparse
//! least-squares problem through its normal equations.
//!
//! Pipeline (strictly linear, single-threaded)
//! - `relabel`: identifiers → dense indices in first-seen order;
//! - `system::assemble`: sparse `A` and target `b`;
//! - `solve::solve`: `AᵗA x = Aᵗb` by sparse Cholesky, singularity checked;
//! - `extract::coordinates`: de-interleave and scale.
//!
//! `api::cartogram` runs all four stages.

pub mod api;
pub mod error;
pub mod extract;
pub mod params;
pub mod relabel;
pub mod solve;
pub mod system;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use api::{cartogram, cartogram_with_cfg, Cartogram};
pub use error::{LincaError, Singularity};
pub use params::{parse_scale, parse_straightness, Params, SolveCfg};
pub use relabel::{relabel, Relabeled, VertexIndex};
pub use types::{Edge, RawEdge, VertexId};

pub use nalgebra::Vector2 as Vec2;

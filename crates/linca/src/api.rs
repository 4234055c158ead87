//! One-call pipeline: relabel → assemble → solve → extract.
//!
//! Each stage takes immutable input and returns a new value; nothing is
//! shared between stages or kept across calls.

use std::fmt::Debug;
use std::hash::Hash;

use nalgebra::Vector2;

use crate::error::{LincaError, Singularity};
use crate::extract::coordinates;
use crate::params::{Params, SolveCfg};
use crate::relabel::{relabel, VertexIndex};
use crate::solve::solve;
use crate::system::assemble;
use crate::types::{Edge, RawEdge, VertexId};

/// Result handed to renderers: identifiers, indexed edges and final positions.
///
/// Invariant: `positions.len() == index.len()`, `positions[i]` belongs to
/// vertex `i`.
#[derive(Clone, Debug)]
pub struct Cartogram<Id> {
    pub index: VertexIndex<Id>,
    pub edges: Vec<Edge>,
    pub positions: Vec<Vector2<f64>>,
}

impl<Id: Hash + Eq> Cartogram<Id> {
    /// `(identifier, position)` in index order.
    pub fn vertices(&self) -> impl Iterator<Item = (&Id, Vector2<f64>)> + '_ {
        self.index
            .iter()
            .map(|(v, id)| (id, self.positions[v.0]))
    }

    /// Endpoint positions of every edge, in input order.
    pub fn segments(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        self.edges
            .iter()
            .map(|e| (self.positions[e.source.0], self.positions[e.target.0]))
    }
}

pub fn cartogram<Id>(raw: &[RawEdge<Id>], params: Params) -> Result<Cartogram<Id>, LincaError>
where
    Id: Hash + Eq + Clone + Debug,
{
    cartogram_with_cfg(raw, params, SolveCfg::default())
}

pub fn cartogram_with_cfg<Id>(
    raw: &[RawEdge<Id>],
    params: Params,
    cfg: SolveCfg,
) -> Result<Cartogram<Id>, LincaError>
where
    Id: Hash + Eq + Clone + Debug,
{
    let relabeled = relabel(raw);
    let n = relabeled.index.len();
    tracing::debug!(vertices = n, edges = relabeled.edges.len(), "relabeled input");

    let sys = assemble(&relabeled.edges, params.straightness(), n)?;
    let solution = solve(&sys, &relabeled.edges, cfg).inspect_err(|err| {
        if let LincaError::SingularSystem(Singularity::Unanchored { vertex, .. }) = err {
            let id = relabeled.index.id_of(VertexId(*vertex));
            tracing::warn!(vertex, id = ?id, "vertex not connected to the anchor");
        }
    })?;
    let residual = sys.residual_norm(&solution.values);
    let positions = coordinates(&solution, params.scale());
    tracing::info!(
        vertices = n,
        edges = relabeled.edges.len(),
        residual,
        scale = params.scale(),
        straightness = params.straightness(),
        "cartogram solved"
    );
    Ok(Cartogram {
        index: relabeled.index,
        edges: relabeled.edges,
        positions,
    })
}

//! Structural singularity check: every vertex must be tied to the anchor.

use std::collections::VecDeque;

use crate::error::Singularity;
use crate::types::{Edge, VertexId};

/// Breadth-first reachability from the anchor over binding edges (non-zero
/// displacement, not a self-loop), ignoring direction.
///
/// A vertex outside the anchor's component can be translated freely without
/// changing any row, so `AᵗA` is singular whenever this fails. Edges with an
/// endpoint `>= vertex_count` bind nothing.
pub fn check_anchored(vertex_count: usize, edges: &[Edge]) -> Result<(), Singularity> {
    if vertex_count == 0 {
        return Err(Singularity::EmptyGraph);
    }
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    let in_range = |e: &&Edge| e.source.0 < vertex_count && e.target.0 < vertex_count;
    for e in edges.iter().filter(|e| e.is_binding()).filter(in_range) {
        adj[e.source.0].push(e.target.0);
        adj[e.target.0].push(e.source.0);
    }
    let mut seen = vec![false; vertex_count];
    let mut queue = VecDeque::from([VertexId::ANCHOR.0]);
    seen[VertexId::ANCHOR.0] = true;
    while let Some(v) = queue.pop_front() {
        for &w in &adj[v] {
            if !seen[w] {
                seen[w] = true;
                queue.push_back(w);
            }
        }
    }
    let mut unreachable = seen.iter().enumerate().filter(|(_, s)| !**s);
    match unreachable.next() {
        None => Ok(()),
        Some((vertex, _)) => Err(Singularity::Unanchored {
            vertex,
            unreachable: 1 + unreachable.count(),
        }),
    }
}

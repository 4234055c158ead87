//! Vertex relabeling: arbitrary identifiers → dense indices in first-seen order.
//!
//! One pass over the raw edges, source before target within each edge. Edges
//! keep their order and direction; parallel edges and self-loops pass through.

use std::hash::Hash;

use indexmap::IndexSet;
use nalgebra::Vector2;

use crate::types::{Edge, RawEdge, VertexId};

/// Bidirectional identifier ↔ index assignment.
///
/// Invariant: `id_of(index_of(id)) == id` and indices are exactly `0..len()`.
#[derive(Clone, Debug)]
pub struct VertexIndex<Id> {
    ids: IndexSet<Id>,
}

impl<Id: Hash + Eq> VertexIndex<Id> {
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &Id) -> Option<VertexId> {
        self.ids.get_index_of(id).map(VertexId)
    }

    pub fn id_of(&self, v: VertexId) -> Option<&Id> {
        self.ids.get_index(v.0)
    }

    /// Identifiers in index order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Id)> + '_ {
        self.ids.iter().enumerate().map(|(i, id)| (VertexId(i), id))
    }

    fn assign(&mut self, id: &Id) -> VertexId
    where
        Id: Clone,
    {
        if let Some(i) = self.ids.get_index_of(id) {
            return VertexId(i);
        }
        let (i, _) = self.ids.insert_full(id.clone());
        VertexId(i)
    }
}

impl<Id> Default for VertexIndex<Id> {
    fn default() -> Self {
        Self {
            ids: IndexSet::new(),
        }
    }
}

/// Result of relabeling: the index plus edges rewritten in index form.
#[derive(Clone, Debug)]
pub struct Relabeled<Id> {
    pub index: VertexIndex<Id>,
    pub edges: Vec<Edge>,
}

pub fn relabel<Id: Hash + Eq + Clone>(raw: &[RawEdge<Id>]) -> Relabeled<Id> {
    let mut index = VertexIndex::default();
    let edges = raw
        .iter()
        .map(|e| {
            let source = index.assign(&e.source);
            let target = index.assign(&e.target);
            Edge {
                source,
                target,
                delta: Vector2::new(e.dx, e.dy),
            }
        })
        .collect();
    Relabeled { index, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_seen_order_left_before_right() {
        let raw = vec![
            RawEdge::new(7, 3, 1.0, 0.0),
            RawEdge::new(3, 9, 0.0, 1.0),
            RawEdge::new(9, 7, -1.0, -1.0),
        ];
        let r = relabel(&raw);
        let ids: Vec<i64> = r.index.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
        assert_eq!(r.edges[0], Edge::new(0, 1, 1.0, 0.0));
        assert_eq!(r.edges[1], Edge::new(1, 2, 0.0, 1.0));
        assert_eq!(r.edges[2], Edge::new(2, 0, -1.0, -1.0));
    }

    #[test]
    fn duplicates_and_self_loops_pass_through() {
        let raw = vec![
            RawEdge::new("a", "b", 1.0, 0.0),
            RawEdge::new("a", "b", 1.0, 0.0),
            RawEdge::new("b", "b", 2.0, 2.0),
        ];
        let r = relabel(&raw);
        assert_eq!(r.index.len(), 2);
        assert_eq!(r.edges.len(), 3);
        assert_eq!(r.edges[0], r.edges[1]);
        assert!(r.edges[2].is_self_loop());
        assert_eq!(r.edges[2].source, VertexId(1));
    }

    #[test]
    fn lookups_are_inverse() {
        let raw = vec![RawEdge::new(10u32, 20, 1.0, 1.0)];
        let r = relabel(&raw);
        assert_eq!(r.index.index_of(&20), Some(VertexId(1)));
        assert_eq!(r.index.id_of(VertexId(0)), Some(&10));
        assert_eq!(r.index.index_of(&30), None);
        assert_eq!(r.index.id_of(VertexId(2)), None);
    }

    #[test]
    fn empty_input_gives_empty_index() {
        let r = relabel::<u8>(&[]);
        assert!(r.index.is_empty());
        assert!(r.edges.is_empty());
    }

    proptest! {
        #[test]
        fn relabeling_is_deterministic_bijection(
            pairs in prop::collection::vec((0i64..20, 0i64..20), 0..40),
        ) {
            let raw: Vec<_> = pairs
                .iter()
                .map(|&(a, b)| RawEdge::new(a, b, 1.0, 0.0))
                .collect();
            let first = relabel(&raw);
            let second = relabel(&raw);
            let a: Vec<_> = first.index.iter().map(|(v, id)| (v, *id)).collect();
            let b: Vec<_> = second.index.iter().map(|(v, id)| (v, *id)).collect();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(first.edges.len(), raw.len());
            for (v, id) in first.index.iter() {
                prop_assert_eq!(first.index.index_of(id), Some(v));
            }
            for (e, r) in first.edges.iter().zip(&raw) {
                prop_assert_eq!(first.index.id_of(e.source), Some(&r.source));
                prop_assert_eq!(first.index.id_of(e.target), Some(&r.target));
            }
        }
    }
}

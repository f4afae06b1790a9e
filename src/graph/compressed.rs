//! Memory-efficient weighted graph representation

use std::mem;

use serde::{Deserialize, Serialize};

/// Compressed sparse representation of a weighted directed graph.
///
/// Vertex keys live in the dense space `[0, span)`; `order` counts the live
/// keys (keys may be retired, e.g. after vertex removal, and are then skipped
/// by [`vertex_keys`](Self::vertex_keys)). An undirected graph is stored as
/// symmetric edge pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Exclusive upper bound on vertex keys
    pub span: usize,

    /// Number of live vertices (≤ span)
    pub order: usize,

    /// Offset array: index where each vertex's edges begin.
    /// offsets[u] to offsets[u+1] defines the edge range for vertex u
    pub offsets: Vec<u32>,

    /// Edge array: concatenated lists of target vertices, sorted per vertex
    pub edges: Vec<u32>,

    /// Edge weights, parallel to `edges`
    pub weights: Vec<f32>,

    /// Live mask: live[u] is false for retired/absent keys
    pub live: Vec<bool>,
}

impl CompressedGraph {
    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(span: usize, edge_count: usize) -> Self {
        Self {
            span,
            order: 0,
            offsets: Vec::with_capacity(span + 1),
            edges: Vec::with_capacity(edge_count),
            weights: Vec::with_capacity(edge_count),
            live: vec![false; span],
        }
    }

    /// Whether vertex key `u` is live
    pub fn is_live(&self, u: u32) -> bool {
        self.live[u as usize]
    }

    /// Visit every live vertex key in ascending order
    pub fn vertex_keys(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.span as u32).filter(move |&u| self.live[u as usize])
    }

    /// Get outgoing edge targets of a vertex
    pub fn outgoing_edges(&self, u: u32) -> &[u32] {
        let start = self.offsets[u as usize] as usize;
        let end = self.offsets[u as usize + 1] as usize;
        &self.edges[start..end]
    }

    /// Get outgoing edge weights of a vertex, parallel to `outgoing_edges`
    pub fn edge_weights(&self, u: u32) -> &[f32] {
        let start = self.offsets[u as usize] as usize;
        let end = self.offsets[u as usize + 1] as usize;
        &self.weights[start..end]
    }

    /// Visit the (target, weight) pairs of a vertex in edge order
    pub fn weighted_edges(&self, u: u32) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.outgoing_edges(u)
            .iter()
            .copied()
            .zip(self.edge_weights(u).iter().copied())
    }

    /// Get out-degree of a vertex
    pub fn degree(&self, u: u32) -> usize {
        self.outgoing_edges(u).len()
    }

    /// Check if there's an edge from src to dst
    pub fn has_edge(&self, src: u32, dst: u32) -> bool {
        self.outgoing_edges(src).binary_search(&dst).is_ok()
    }

    /// Total number of directed edges
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();
        let weights = self.weights.capacity() * mem::size_of::<f32>();
        let live = self.live.capacity() * mem::size_of::<bool>();

        base + offsets + edges + weights + live
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;

    #[test]
    fn test_edge_access() {
        let mut b = GraphBuilder::new();
        b.add_edge(0, 2, 1.5);
        b.add_edge(0, 1, 0.5);
        b.add_edge(2, 0, 1.0);
        let g = b.build();

        assert_eq!(g.span, 3);
        assert_eq!(g.order, 3);
        assert_eq!(g.size(), 3);
        // Adjacency is sorted by target
        assert_eq!(g.outgoing_edges(0), &[1, 2]);
        assert_eq!(g.edge_weights(0), &[0.5, 1.5]);
        assert_eq!(g.degree(1), 0);
        assert!(g.has_edge(2, 0));
        assert!(!g.has_edge(1, 0));

        let pairs: Vec<(u32, f32)> = g.weighted_edges(0).collect();
        assert_eq!(pairs, vec![(1, 0.5), (2, 1.5)]);
    }

    #[test]
    fn test_span_exceeds_order() {
        let mut b = GraphBuilder::with_span(6);
        b.add_undirected_edge(1, 4, 1.0);
        let g = b.build();

        assert_eq!(g.span, 6);
        assert_eq!(g.order, 2);
        assert!(g.is_live(1));
        assert!(!g.is_live(0));
        let keys: Vec<u32> = g.vertex_keys().collect();
        assert_eq!(keys, vec![1, 4]);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let mut b = GraphBuilder::new();
        b.add_edge(0, 1, 1.0);
        let g = b.build();
        assert!(g.memory_usage() > 0);
    }
}

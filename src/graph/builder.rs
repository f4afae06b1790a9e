//! Graph construction module

use crate::graph::CompressedGraph;

/// Builder for incrementally constructing a [`CompressedGraph`].
///
/// Vertex keys are explicit u32 values; a key becomes live the first time it
/// is touched or used as an edge endpoint. Keys below the span that are never
/// touched build into retired entries.
pub struct GraphBuilder {
    /// Adjacency lists: (target, weight) per source vertex
    adjacency: Vec<Vec<(u32, f32)>>,

    /// Live mask, grown alongside the adjacency lists
    live: Vec<bool>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            adjacency: Vec::new(),
            live: Vec::new(),
        }
    }

    /// Create a builder whose key space already covers `[0, span)`,
    /// with every key initially retired
    pub fn with_span(span: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); span],
            live: vec![false; span],
        }
    }

    /// Mark vertex `u` live, growing the key space if needed
    pub fn touch(&mut self, u: u32) {
        let needed = u as usize + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize(needed, Vec::new());
            self.live.resize(needed, false);
        }
        self.live[u as usize] = true;
    }

    /// Add a directed edge from `u` to `v` with weight `w`
    pub fn add_edge(&mut self, u: u32, v: u32, w: f32) {
        self.touch(u);
        self.touch(v);
        self.adjacency[u as usize].push((v, w));
    }

    /// Add an undirected edge as a symmetric pair
    pub fn add_undirected_edge(&mut self, u: u32, v: u32, w: f32) {
        self.add_edge(u, v, w);
        if u != v {
            self.add_edge(v, u, w);
        }
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CompressedGraph {
        let span = self.adjacency.len();
        let edge_count: usize = self.adjacency.iter().map(|list| list.len()).sum();

        // Create offsets array
        let mut offsets = Vec::with_capacity(span + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        // Create edge and weight arrays, adjacency sorted by target so
        // edge-visitation order is deterministic and binary search works
        let mut edges = Vec::with_capacity(edge_count);
        let mut weights = Vec::with_capacity(edge_count);
        for list in &mut self.adjacency {
            list.sort_by_key(|&(v, _)| v);
            for &(v, w) in list.iter() {
                edges.push(v);
                weights.push(w);
            }
        }

        let order = self.live.iter().filter(|&&l| l).count();

        CompressedGraph {
            span,
            order,
            offsets,
            edges,
            weights,
            live: self.live,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_empty() {
        let g = GraphBuilder::new().build();
        assert_eq!(g.span, 0);
        assert_eq!(g.order, 0);
        assert_eq!(g.size(), 0);
    }

    #[test]
    fn test_touch_isolated_vertex() {
        let mut b = GraphBuilder::new();
        b.touch(3);
        let g = b.build();
        assert_eq!(g.span, 4);
        assert_eq!(g.order, 1);
        assert_eq!(g.degree(3), 0);
    }

    #[test]
    fn test_parallel_edges_kept() {
        let mut b = GraphBuilder::new();
        b.add_edge(0, 1, 1.0);
        b.add_edge(0, 1, 2.0);
        let g = b.build();
        assert_eq!(g.outgoing_edges(0), &[1, 1]);
        assert_eq!(g.edge_weights(0).iter().sum::<f32>(), 3.0);
    }

    #[test]
    fn test_self_loop_undirected_once() {
        let mut b = GraphBuilder::new();
        b.add_undirected_edge(2, 2, 1.0);
        let g = b.build();
        assert_eq!(g.degree(2), 1);
    }
}

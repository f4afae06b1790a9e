//! Incremental propagation after an edge-update batch
//!
//! Both variants take the post-update graph, the applied edit batch, and the
//! pre-update membership; they recompute communities while restricting work
//! to vertices the batch could plausibly affect.

use crate::community::propagation::{propagate, validate, VertexHooks};
use crate::community::PropagationResult;
use crate::config::PropagationOptions;
use crate::error::Result;
use crate::graph::CompressedGraph;

/// Eligibility fixed to a precomputed affected set for the whole run.
#[derive(Debug, Clone)]
struct AffectedOnly {
    affected: Vec<bool>,
}

impl VertexHooks for AffectedOnly {
    fn eligible(&self, u: u32) -> bool {
        self.affected[u as usize]
    }
}

/// Affected set that grows as communities cascade: every move marks the
/// mover's neighbors eligible.
#[derive(Debug, Clone)]
struct ExpandingFrontier<'g> {
    graph: &'g CompressedGraph,
    affected: Vec<bool>,
}

impl VertexHooks for ExpandingFrontier<'_> {
    fn eligible(&self, u: u32) -> bool {
        self.affected[u as usize]
    }

    fn on_move(&mut self, u: u32) {
        for &v in self.graph.outgoing_edges(u) {
            self.affected[v as usize] = true;
        }
    }
}

/// Delta-screening affected set.
///
/// A deletion inside a community marks its source, the source's
/// neighborhood, and the community; an insertion across communities marks
/// its source, the source's neighborhood, and the target's community. One
/// sweep then expands the neighborhood and community marks into the vertex
/// set. For undirected graphs the batch lists both directions of an edit.
pub fn affected_vertices_delta_screening(
    x: &CompressedGraph,
    deletions: &[(u32, u32)],
    insertions: &[(u32, u32, f32)],
    membership: &[u32],
) -> Vec<bool> {
    let mut vertices = vec![false; x.span];
    let mut neighbors = vec![false; x.span];
    let mut communities = vec![false; x.span];

    for &(u, v) in deletions {
        let c = membership[v as usize];
        if membership[u as usize] != c {
            continue;
        }
        vertices[u as usize] = true;
        neighbors[u as usize] = true;
        communities[c as usize] = true;
    }
    for &(u, v, _) in insertions {
        let c = membership[v as usize];
        if membership[u as usize] == c {
            continue;
        }
        vertices[u as usize] = true;
        neighbors[u as usize] = true;
        communities[c as usize] = true;
    }

    for u in x.vertex_keys() {
        if neighbors[u as usize] {
            for &v in x.outgoing_edges(u) {
                vertices[v as usize] = true;
            }
        }
        if communities[membership[u as usize] as usize] {
            vertices[u as usize] = true;
        }
    }
    vertices
}

/// Initial frontier affected set: only the sources of community-relevant
/// edits; growth happens during the run via the on-move hook.
pub fn affected_vertices_frontier(
    _x: &CompressedGraph,
    deletions: &[(u32, u32)],
    insertions: &[(u32, u32, f32)],
    membership: &[u32],
) -> Vec<bool> {
    let mut vertices = vec![false; membership.len()];

    for &(u, v) in deletions {
        if membership[u as usize] == membership[v as usize] {
            vertices[u as usize] = true;
        }
    }
    for &(u, v, _) in insertions {
        if membership[u as usize] != membership[v as usize] {
            vertices[u as usize] = true;
        }
    }
    vertices
}

/// Incremental run with delta-screening: eligibility is restricted to a
/// fixed affected set computed from the edit batch and prior membership.
pub fn run_dynamic_delta_screening(
    x: &CompressedGraph,
    deletions: &[(u32, u32)],
    insertions: &[(u32, u32, f32)],
    prior: &[u32],
    o: &PropagationOptions,
) -> Result<PropagationResult> {
    validate(x, Some(prior), o)?;
    let affected = affected_vertices_delta_screening(x, deletions, insertions, prior);
    log::debug!(
        "delta screening marked {} affected vertices",
        affected.iter().filter(|&&a| a).count()
    );
    propagate(x, Some(prior), o, &AffectedOnly { affected })
}

/// Incremental run with an expanding frontier: the affected set starts at
/// the edit sources and propagates along the graph as vertices move.
pub fn run_dynamic_frontier(
    x: &CompressedGraph,
    deletions: &[(u32, u32)],
    insertions: &[(u32, u32, f32)],
    prior: &[u32],
    o: &PropagationOptions,
) -> Result<PropagationResult> {
    validate(x, Some(prior), o)?;
    let affected = affected_vertices_frontier(x, deletions, insertions, prior);
    log::debug!(
        "frontier starts from {} affected vertices",
        affected.iter().filter(|&&a| a).count()
    );
    propagate(x, Some(prior), o, &ExpandingFrontier { graph: x, affected })
}

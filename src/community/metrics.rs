//! Community membership statistics

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::CompressedGraph;

/// Summary statistics of a membership vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySummary {
    /// Number of distinct communities among live vertices
    pub communities: usize,

    /// Size of the largest community
    pub largest: usize,

    /// Number of single-vertex communities
    pub singletons: usize,
}

/// Count live vertices per community id
pub fn community_sizes(x: &CompressedGraph, membership: &[u32]) -> HashMap<u32, usize> {
    let mut sizes: HashMap<u32, usize> = HashMap::new();
    for u in x.vertex_keys() {
        *sizes.entry(membership[u as usize]).or_insert(0) += 1;
    }
    sizes
}

/// Number of distinct communities among live vertices
pub fn community_count(x: &CompressedGraph, membership: &[u32]) -> usize {
    community_sizes(x, membership).len()
}

/// Summarize a membership vector
pub fn summarize(x: &CompressedGraph, membership: &[u32]) -> CommunitySummary {
    let sizes = community_sizes(x, membership);
    CommunitySummary {
        communities: sizes.len(),
        largest: sizes.values().copied().max().unwrap_or(0),
        singletons: sizes.values().filter(|&&s| s == 1).count(),
    }
}

//! Per-vertex community scan state

use crate::graph::CompressedGraph;

/// Reusable scratch state for scanning one vertex's neighborhood.
///
/// Holds the list of community ids touched by the current scan and a sparse
/// accumulator (indexed directly by community id, sized to the graph span)
/// of total incident edge weight per community. Allocated once per run and
/// cleared lazily between vertices: only the touched entries are reset, so a
/// scan never pays an O(span) clear.
pub struct ScanScratch {
    /// Community ids touched since the last clear
    touched: Vec<u32>,

    /// Accumulated edge weight per community id, zero everywhere except at
    /// touched ids
    weight_to: Vec<f32>,
}

impl ScanScratch {
    /// Create scratch state for a graph with the given span
    pub fn new(span: usize) -> Self {
        Self {
            touched: Vec::new(),
            weight_to: vec![0.0; span],
        }
    }

    /// Reset the accumulator at every touched id and empty the touched list.
    /// Must be called before each vertex's scan when the scratch is reused.
    pub fn clear(&mut self) {
        for &c in &self.touched {
            self.weight_to[c as usize] = 0.0;
        }
        self.touched.clear();
    }

    /// Add `w` to community `c`'s accumulated weight, recording `c` as
    /// touched on first contact. Parallel edges into the same community land
    /// in a single touched entry (weights are assumed positive).
    pub fn accumulate(&mut self, c: u32, w: f32) {
        if self.weight_to[c as usize] == 0.0 {
            self.touched.push(c);
        }
        self.weight_to[c as usize] += w;
    }

    /// Accumulate the communities incident to vertex `u`. Self-loop edges
    /// are skipped unless `include_self` is set.
    pub fn scan(&mut self, x: &CompressedGraph, u: u32, membership: &[u32], include_self: bool) {
        for (v, w) in x.weighted_edges(u) {
            if !include_self && v == u {
                continue;
            }
            self.accumulate(membership[v as usize], w);
        }
    }

    /// Choose the community with the most accumulated weight.
    ///
    /// `own` (the vertex's current community) is skipped unless
    /// `include_self` is set. Ties go to the community touched first, i.e.
    /// edge-visitation order. Returns `None` when no eligible community has
    /// positive weight; community id 0 carries no sentinel meaning.
    pub fn choose(&self, own: u32, include_self: bool) -> Option<(u32, f32)> {
        let mut best: Option<(u32, f32)> = None;
        for &c in &self.touched {
            if !include_self && c == own {
                continue;
            }
            let w = self.weight_to[c as usize];
            if w > best.map_or(0.0, |(_, bw)| bw) {
                best = Some((c, w));
            }
        }
        best
    }

    /// Community ids touched since the last clear, in first-contact order
    pub fn touched(&self) -> &[u32] {
        &self.touched
    }

    /// Accumulated weight for community `c`
    pub fn weight(&self, c: u32) -> f32 {
        self.weight_to[c as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn test_accumulate_parallel_edges_touch_once() {
        let mut s = ScanScratch::new(8);
        s.accumulate(3, 1.0);
        s.accumulate(3, 2.5);
        s.accumulate(5, 1.0);
        assert_eq!(s.touched(), &[3, 5]);
        assert_eq!(s.weight(3), 3.5);
        assert_eq!(s.weight(5), 1.0);
    }

    #[test]
    fn test_clear_restores_accumulator() {
        let mut s = ScanScratch::new(8);
        s.accumulate(0, 1.0);
        s.accumulate(7, 4.0);
        s.clear();
        assert!(s.touched().is_empty());
        for c in 0..8 {
            assert_eq!(s.weight(c), 0.0);
        }
        // Reuse after clear starts from scratch
        s.accumulate(7, 2.0);
        assert_eq!(s.touched(), &[7]);
        assert_eq!(s.weight(7), 2.0);
    }

    #[test]
    fn test_scan_skips_self_loop() {
        let mut b = GraphBuilder::new();
        b.add_edge(0, 0, 9.0);
        b.add_edge(0, 1, 1.0);
        let g = b.build();
        let membership = vec![0, 1];

        let mut s = ScanScratch::new(g.span);
        s.scan(&g, 0, &membership, false);
        assert_eq!(s.touched(), &[1]);
        assert_eq!(s.weight(0), 0.0);

        s.clear();
        s.scan(&g, 0, &membership, true);
        assert_eq!(s.weight(0), 9.0);
    }

    #[test]
    fn test_choose_excludes_own_unless_included() {
        let mut s = ScanScratch::new(4);
        s.accumulate(1, 5.0);
        s.accumulate(2, 3.0);
        assert_eq!(s.choose(1, false), Some((2, 3.0)));
        assert_eq!(s.choose(1, true), Some((1, 5.0)));
    }

    #[test]
    fn test_choose_tie_goes_to_first_touched() {
        let mut s = ScanScratch::new(8);
        s.accumulate(5, 1.0);
        s.accumulate(3, 1.0);
        assert_eq!(s.choose(7, true), Some((5, 1.0)));
    }

    #[test]
    fn test_choose_empty_is_none() {
        let s = ScanScratch::new(4);
        assert_eq!(s.choose(0, true), None);
    }

    #[test]
    fn test_choose_community_zero_is_ordinary() {
        let mut s = ScanScratch::new(4);
        s.accumulate(0, 2.0);
        assert_eq!(s.choose(3, false), Some((0, 2.0)));
    }
}

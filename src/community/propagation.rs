//! Label-propagation move iteration and convergence loop

use std::mem;
use std::time::Instant;

use rayon::prelude::*;

use crate::community::scan::ScanScratch;
use crate::community::PropagationResult;
use crate::config::{PropagationOptions, UpdateStrategy};
use crate::error::{Error, Result};
use crate::graph::CompressedGraph;

/// Per-vertex capabilities injected into a sweep: which vertices to visit
/// and what to do after one moves. The defaults visit everything and do
/// nothing on a move, which is the static run.
pub trait VertexHooks {
    /// Whether vertex `u` should be re-evaluated this pass
    fn eligible(&self, _u: u32) -> bool {
        true
    }

    /// Called after vertex `u` changed community
    fn on_move(&mut self, _u: u32) {}
}

/// Hooks for a static run: every vertex, every pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EveryVertex;

impl VertexHooks for EveryVertex {}

/// How a pass's membership writes relate to its reads.
trait UpdatePolicy {
    /// Membership snapshot read during the current pass
    fn snapshot(&self) -> &[u32];

    /// Record that vertex `u` now belongs to community `c`
    fn write(&mut self, u: u32, c: u32);

    /// Finish a pass, making its writes visible to the next one
    fn end_pass(&mut self);

    /// Final membership after the last pass
    fn into_membership(self) -> Vec<u32>;
}

/// Double-buffered policy: reads come from the previous pass's snapshot,
/// writes go to a separate buffer swapped in at pass end.
struct DoubleBuffered {
    current: Vec<u32>,
    next: Vec<u32>,
}

impl DoubleBuffered {
    fn new(membership: Vec<u32>) -> Self {
        let next = membership.clone();
        Self {
            current: membership,
            next,
        }
    }
}

impl UpdatePolicy for DoubleBuffered {
    fn snapshot(&self) -> &[u32] {
        &self.current
    }

    fn write(&mut self, u: u32, c: u32) {
        self.next[u as usize] = c;
    }

    fn end_pass(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
        // Resync so unchanged vertices carry over into the next pass
        self.next.copy_from_slice(&self.current);
    }

    fn into_membership(self) -> Vec<u32> {
        self.current
    }
}

/// In-place policy: one buffer; a move is visible to vertices visited later
/// in the same pass.
struct InPlace {
    membership: Vec<u32>,
}

impl UpdatePolicy for InPlace {
    fn snapshot(&self) -> &[u32] {
        &self.membership
    }

    fn write(&mut self, u: u32, c: u32) {
        self.membership[u as usize] = c;
    }

    fn end_pass(&mut self) {}

    fn into_membership(self) -> Vec<u32> {
        self.membership
    }
}

/// Visit every eligible vertex once, moving each to the neighboring
/// community with the most incident weight. Returns the number of vertices
/// that changed community.
fn move_iteration<P: UpdatePolicy, H: VertexHooks>(
    scratch: &mut ScanScratch,
    x: &CompressedGraph,
    state: &mut P,
    hooks: &mut H,
) -> usize {
    let mut changed = 0;
    for u in x.vertex_keys() {
        if !hooks.eligible(u) {
            continue;
        }
        let d = state.snapshot()[u as usize];
        scratch.clear();
        scratch.scan(x, u, state.snapshot(), false);
        // The own community stays a candidate so "nothing strictly better"
        // yields "no move"
        if let Some((c, _)) = scratch.choose(d, true) {
            if c != d {
                state.write(u, c);
                changed += 1;
                hooks.on_move(u);
            }
        }
    }
    changed
}

/// Run move iterations until the changed fraction drops to the tolerance or
/// the iteration budget runs out. Both outcomes are success; returns the
/// number of passes performed.
fn converge<P: UpdatePolicy, H: VertexHooks>(
    x: &CompressedGraph,
    o: &PropagationOptions,
    state: &mut P,
    scratch: &mut ScanScratch,
    hooks: &mut H,
) -> usize {
    let order = x.order.max(1);
    let mut iterations = 0;
    while iterations < o.max_iterations {
        let changed = move_iteration(scratch, x, state, hooks);
        iterations += 1;
        let fraction = changed as f32 / order as f32;
        log::debug!(
            "pass {}: {}/{} vertices moved ({:.4})",
            iterations,
            changed,
            order,
            fraction
        );
        state.end_pass();
        if fraction <= o.tolerance {
            break;
        }
    }
    iterations
}

/// Check the structural preconditions every entry point shares.
pub(crate) fn validate(
    x: &CompressedGraph,
    prior: Option<&[u32]>,
    o: &PropagationOptions,
) -> Result<()> {
    if let Some(prior) = prior {
        if prior.len() != x.span {
            return Err(Error::MembershipLength {
                expected: x.span,
                found: prior.len(),
            });
        }
    }
    if !(0.0..=1.0).contains(&o.tolerance) {
        return Err(Error::InvalidTolerance(o.tolerance));
    }
    if o.repeat == 0 {
        return Err(Error::ZeroRepeat);
    }
    Ok(())
}

/// Starting membership: the caller's prior snapshot if given, otherwise
/// every vertex in its own community.
fn initial_membership(x: &CompressedGraph, prior: Option<&[u32]>) -> Vec<u32> {
    match prior {
        Some(prior) => prior.to_vec(),
        None => (0..x.span as u32).collect(),
    }
}

/// Shared body of the static and incremental entry points: repeat the timed
/// run `o.repeat` times from the same starting state, reporting the mean
/// seconds per repetition and the last repetition's membership.
pub(crate) fn propagate<H: VertexHooks + Clone>(
    x: &CompressedGraph,
    prior: Option<&[u32]>,
    o: &PropagationOptions,
    hooks: &H,
) -> Result<PropagationResult> {
    validate(x, prior, o)?;

    let mut scratch = ScanScratch::new(x.span);
    let mut membership = Vec::new();
    let mut iterations = 0;

    let started = Instant::now();
    for _ in 0..o.repeat {
        let mut hooks = hooks.clone();
        let initial = initial_membership(x, prior);
        let (m, l) = match o.strategy {
            UpdateStrategy::Synchronous => {
                let mut state = DoubleBuffered::new(initial);
                let l = converge(x, o, &mut state, &mut scratch, &mut hooks);
                (state.into_membership(), l)
            }
            UpdateStrategy::Asynchronous => {
                let mut state = InPlace { membership: initial };
                let l = converge(x, o, &mut state, &mut scratch, &mut hooks);
                (state.into_membership(), l)
            }
        };
        membership = m;
        iterations = l;
    }
    let time = started.elapsed().as_secs_f32() / o.repeat as f32;

    log::info!(
        "label propagation over {} vertices: {} passes, {:.6}s",
        x.order,
        iterations,
        time
    );
    Ok(PropagationResult {
        membership,
        iterations,
        time,
    })
}

/// Run static label propagation over the whole graph.
///
/// `prior` seeds the starting membership (the caller keeps ownership);
/// `None` initializes every live vertex to its own community.
pub fn run(
    x: &CompressedGraph,
    prior: Option<&[u32]>,
    o: &PropagationOptions,
) -> Result<PropagationResult> {
    propagate(x, prior, o, &EveryVertex)
}

/// Run static label propagation with a parallel synchronous sweep.
///
/// Each pass reads only the previous pass's snapshot, so vertices are
/// independent and the sweep parallelizes over them; the configured strategy
/// is ignored and double-buffered updates are always used. Produces the same
/// result as [`run`] with [`UpdateStrategy::Synchronous`].
pub fn run_par(
    x: &CompressedGraph,
    prior: Option<&[u32]>,
    o: &PropagationOptions,
) -> Result<PropagationResult> {
    validate(x, prior, o)?;

    let order = x.order.max(1);
    let mut membership = Vec::new();
    let mut iterations = 0;

    let started = Instant::now();
    for _ in 0..o.repeat {
        let mut current = initial_membership(x, prior);
        let mut next = current.clone();
        iterations = 0;
        while iterations < o.max_iterations {
            let changed: usize = next
                .par_iter_mut()
                .enumerate()
                .map_init(
                    || ScanScratch::new(x.span),
                    |scratch, (u, slot)| {
                        let u = u as u32;
                        if !x.is_live(u) {
                            return 0;
                        }
                        let d = current[u as usize];
                        scratch.clear();
                        scratch.scan(x, u, &current, false);
                        match scratch.choose(d, true) {
                            Some((c, _)) if c != d => {
                                *slot = c;
                                1
                            }
                            _ => {
                                *slot = d;
                                0
                            }
                        }
                    },
                )
                .sum();
            iterations += 1;
            let fraction = changed as f32 / order as f32;
            log::debug!(
                "parallel pass {}: {}/{} vertices moved ({:.4})",
                iterations,
                changed,
                order,
                fraction
            );
            mem::swap(&mut current, &mut next);
            if fraction <= o.tolerance {
                break;
            }
        }
        membership = current;
    }
    let time = started.elapsed().as_secs_f32() / o.repeat as f32;

    log::info!(
        "parallel label propagation over {} vertices: {} passes, {:.6}s",
        x.order,
        iterations,
        time
    );
    Ok(PropagationResult {
        membership,
        iterations,
        time,
    })
}

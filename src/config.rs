//! Configuration for the label-propagation kernel

use serde::{Deserialize, Serialize};

/// Membership-update policy for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateStrategy {
    /// Double-buffered: every vertex reads the previous pass's membership
    /// snapshot; moves become visible at the next pass.
    #[default]
    Synchronous,

    /// In-place: moves are written into the single membership buffer and are
    /// visible to vertices visited later in the same pass.
    Asynchronous,
}

/// Options controlling a propagation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationOptions {
    /// Number of timed repetitions of the full run (reported time is the mean)
    pub repeat: usize,

    /// Fraction of vertices allowed to still change community in a pass
    /// while declaring convergence
    pub tolerance: f32,

    /// Hard cap on the number of passes
    pub max_iterations: usize,

    /// Membership-update policy
    pub strategy: UpdateStrategy,
}

impl Default for PropagationOptions {
    fn default() -> Self {
        Self {
            repeat: 1,
            tolerance: 0.05,
            max_iterations: 500,
            strategy: UpdateStrategy::Synchronous,
        }
    }
}

impl PropagationOptions {
    /// Create options with custom values
    pub fn new(
        repeat: usize,
        tolerance: f32,
        max_iterations: usize,
        strategy: UpdateStrategy,
    ) -> Self {
        Self {
            repeat,
            tolerance,
            max_iterations,
            strategy,
        }
    }

    /// Options for an exact run: zero tolerance, in-place updates
    pub fn exact() -> Self {
        Self {
            tolerance: 0.0,
            strategy: UpdateStrategy::Asynchronous,
            ..Self::default()
        }
    }
}

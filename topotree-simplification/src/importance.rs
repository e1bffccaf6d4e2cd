//! Importance functions ranking branches of a decomposition

use topotree_core::Branch;

/// Assigns a weight to every branch and keeps it current while the
/// decomposition mutates. Lower weights are removed first.
pub trait ImportanceFunction {
    /// Compute the initial weight of every branch into `weights`
    fn init(&mut self, weights: &mut [f32], branches: &[Branch]);

    /// Recompute the weight of `branch` after its shape changed
    fn update(&mut self, branches: &[Branch], branch: u32) -> f32;

    /// Called after `removed` left the live topology. Branches whose weight
    /// depends on it are flagged in `invalid` and get recomputed lazily.
    fn branch_removed(&mut self, branches: &[Branch], removed: u32, invalid: &mut [bool]);

    /// Current weight of `branch`
    fn branch_weight(&self, branch: u32) -> f32;
}

//! Hypervolume importance: the amount of domain a branch accounts for

use crate::ImportanceFunction;
use topotree_core::{Branch, ContourTreeData, Error, Result};

/// Weighs a branch by the summed volume of the arcs it represents plus the
/// weights of the branches that were folded under it.
///
/// Arc volumes are supplied by the caller, typically the number of mesh
/// vertices that map to each arc.
pub struct HyperVolume {
    arc_volumes: Vec<f32>,
    weights: Vec<f32>,
}

impl HyperVolume {
    /// Create from one volume per arc of `tree`
    pub fn new(tree: &ContourTreeData, arc_volumes: Vec<f32>) -> Result<Self> {
        if arc_volumes.len() != tree.no_arcs() {
            return Err(Error::InvalidData(format!(
                "Expected {} arc volumes, got {}",
                tree.no_arcs(),
                arc_volumes.len()
            )));
        }
        if let Some(v) = arc_volumes.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(Error::InvalidData(format!("Invalid arc volume {}", v)));
        }
        Ok(Self {
            arc_volumes,
            weights: Vec::new(),
        })
    }

    /// Every arc counts as one unit of volume
    pub fn with_unit_volumes(tree: &ContourTreeData) -> Self {
        Self {
            arc_volumes: vec![1.0; tree.no_arcs()],
            weights: Vec::new(),
        }
    }

    fn compute(&self, br: &Branch) -> f32 {
        let own: f32 = br.arcs.iter().map(|&a| self.arc_volumes[a as usize]).sum();
        // children are removed branches, their weights no longer change
        let folded: f32 = br.children.iter().map(|&c| self.weights[c as usize]).sum();
        own + folded
    }
}

impl ImportanceFunction for HyperVolume {
    fn init(&mut self, weights: &mut [f32], branches: &[Branch]) {
        self.weights = vec![0.0; branches.len()];
        for (i, br) in branches.iter().enumerate() {
            self.weights[i] = self.compute(br);
        }
        weights.copy_from_slice(&self.weights);
    }

    fn update(&mut self, branches: &[Branch], branch: u32) -> f32 {
        let w = self.compute(&branches[branch as usize]);
        self.weights[branch as usize] = w;
        w
    }

    fn branch_removed(&mut self, _branches: &[Branch], _removed: u32, _invalid: &mut [bool]) {}

    fn branch_weight(&self, branch: u32) -> f32 {
        self.weights[branch as usize]
    }
}

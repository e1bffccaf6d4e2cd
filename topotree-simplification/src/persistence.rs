//! Persistence importance: the scalar span covered by a branch

use crate::ImportanceFunction;
use topotree_core::{Branch, ContourTreeData};

/// Weighs a branch by `fn(to) - fn(from)` over its current endpoints.
pub struct Persistence<'a> {
    tree: &'a ContourTreeData,
    weights: Vec<f32>,
}

impl<'a> Persistence<'a> {
    pub fn new(tree: &'a ContourTreeData) -> Self {
        Self {
            tree,
            weights: Vec::new(),
        }
    }

    fn compute(&self, br: &Branch) -> f32 {
        self.tree.span(br.from, br.to)
    }
}

impl ImportanceFunction for Persistence<'_> {
    fn init(&mut self, weights: &mut [f32], branches: &[Branch]) {
        for (w, br) in weights.iter_mut().zip(branches) {
            *w = self.compute(br);
        }
        self.weights = weights.to_vec();
    }

    fn update(&mut self, branches: &[Branch], branch: u32) -> f32 {
        let w = self.compute(&branches[branch as usize]);
        self.weights[branch as usize] = w;
        w
    }

    fn branch_removed(&mut self, _branches: &[Branch], _removed: u32, _invalid: &mut [bool]) {
        // a branch's span only depends on its own endpoints
    }

    fn branch_weight(&self, branch: u32) -> f32 {
        self.weights[branch as usize]
    }
}

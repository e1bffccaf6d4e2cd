//! Branch decomposition of a contour tree
//!
//! Leaf branches are peeled off one at a time in order of increasing
//! importance. Removing a branch can leave a node with one incoming and one
//! outgoing branch; the two are then merged into a single branch that adopts
//! everything parked at that node. The sequence of removals, ending with the
//! single surviving root, is the decomposition.

use crate::ImportanceFunction;
use itertools::Itertools;
use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use topotree_core::{
    Branch, BranchParent, ContourTreeData, Error, Node, Result, SimplificationOrder,
};
use tracing::{debug, info, trace, warn};

// ============================================================
// Queue priority
// ============================================================

/// Snapshot of the ordering keys of a queued branch.
///
/// Keys are taken when the branch is pushed. A branch whose shape changes
/// while queued is flagged invalid and re-pushed with fresh keys once it
/// surfaces, so a stale snapshot never leads to a removal.
#[derive(Debug, Clone, Copy)]
struct BranchPriority {
    weight: f32,
    persistence: f32,
    span: i64,
    from: u32,
    id: u32,
}

impl PartialEq for BranchPriority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for BranchPriority {}

impl PartialOrd for BranchPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BranchPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: least important branch first
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.persistence.total_cmp(&self.persistence))
            .then_with(|| other.span.cmp(&self.span))
            .then_with(|| other.from.cmp(&self.from))
            .then_with(|| other.id.cmp(&self.id))
    }
}

// ============================================================
// Replay criteria
// ============================================================

/// How much of a stored order to apply when replaying it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplayCriterion {
    /// Keep the `k` most important branches, remove everything before them
    TopK(usize),
    /// Remove branches while their stored weight does not exceed the threshold
    Threshold(f32),
}

// ============================================================
// Engine
// ============================================================

/// Branch decomposition engine over a borrowed contour tree.
///
/// Branches and nodes live in arrays indexed by arc and node id. Nothing is
/// ever deallocated: removal and consumption are flag flips, so ids stay
/// stable for the whole run.
pub struct SimplifyCt<'a> {
    tree: &'a ContourTreeData,
    branches: Vec<Branch>,
    nodes: Vec<Node>,
    weights: Vec<f32>,
    removed: Vec<bool>,
    invalid: Vec<bool>,
    inq: Vec<bool>,
    /// Removed branches waiting at a node for the branch that absorbs it
    v_array: Vec<Vec<u32>>,
    queue: PriorityQueue<u32, BranchPriority>,
    order: Vec<u32>,
}

impl<'a> SimplifyCt<'a> {
    /// Create an engine with one branch per arc of `tree`
    pub fn new(tree: &'a ContourTreeData) -> Self {
        let mut sim = Self {
            tree,
            branches: Vec::new(),
            nodes: Vec::new(),
            weights: Vec::new(),
            removed: Vec::new(),
            invalid: Vec::new(),
            inq: Vec::new(),
            v_array: Vec::new(),
            queue: PriorityQueue::new(),
            order: Vec::new(),
        };
        sim.init_simplification(None);
        sim
    }

    /// Rebuild all state from the input tree. With an importance function the
    /// weights are initialized and every candidate is queued.
    fn init_simplification(&mut self, sim_fn: Option<&mut (dyn ImportanceFunction + '_)>) {
        let no_arcs = self.tree.no_arcs();
        let no_nodes = self.tree.no_nodes();

        self.branches = Vec::with_capacity(no_arcs);
        self.nodes = vec![Node::default(); no_nodes];
        for (i, &arc) in self.tree.arcs.iter().enumerate() {
            let id = i as u32;
            self.branches.push(Branch::from_arc(id, arc));
            self.nodes[arc.from as usize].next.push(id);
            self.nodes[arc.to as usize].prev.push(id);
        }

        self.weights = vec![0.0; no_arcs];
        self.removed = vec![false; no_arcs];
        self.invalid = vec![false; no_arcs];
        self.inq = vec![false; no_arcs];
        self.v_array = vec![Vec::new(); no_nodes];
        self.queue.clear();
        self.order.clear();

        if let Some(sim_fn) = sim_fn {
            sim_fn.init(&mut self.weights, &self.branches);
            for id in 0..no_arcs as u32 {
                self.add_to_queue(id);
            }
        }
        debug!(
            "initialized {} branches over {} nodes, {} queued",
            no_arcs,
            no_nodes,
            self.queue.len()
        );
    }

    /// Whether branch `id` is a leaf of the live topology that can be
    /// removed without disconnecting the tree.
    pub fn is_candidate(&self, id: u32) -> bool {
        let br = &self.branches[id as usize];
        let from = &self.nodes[br.from as usize];
        let to = &self.nodes[br.to as usize];
        if from.is_minimum() {
            return to.prev.len() > 1;
        }
        if to.is_maximum() {
            return from.next.len() > 1;
        }
        false
    }

    fn priority(&self, id: u32) -> BranchPriority {
        let br = &self.branches[id as usize];
        BranchPriority {
            weight: self.weights[id as usize],
            persistence: self.tree.span(br.from, br.to),
            span: br.to as i64 - br.from as i64,
            from: br.from,
            id,
        }
    }

    fn add_to_queue(&mut self, id: u32) {
        if self.is_candidate(id) {
            let priority = self.priority(id);
            self.queue.push(id, priority);
            self.inq[id as usize] = true;
        }
    }

    /// Detach candidate `ano` from the live topology and park it at the node
    /// it hung from, merging that node away if it became a pass-through.
    fn remove_arc(
        &mut self,
        ano: u32,
        mut sim_fn: Option<&mut (dyn ImportanceFunction + '_)>,
    ) -> Result<()> {
        let (from, to) = {
            let br = &self.branches[ano as usize];
            (br.from, br.to)
        };
        let merged_vertex = if self.nodes[from as usize].is_minimum()
            && self.nodes[to as usize].prev.len() > 1
        {
            to
        } else if self.nodes[to as usize].is_maximum() {
            from
        } else {
            return Err(Error::Consistency(format!(
                "branch {} ({} -> {}) is not a leaf",
                ano, from, to
            )));
        };

        self.nodes[from as usize].next.retain(|&b| b != ano);
        self.nodes[to as usize].prev.retain(|&b| b != ano);
        self.removed[ano as usize] = true;

        self.v_array[merged_vertex as usize].push(ano);
        if self.nodes[merged_vertex as usize].is_pass_through() {
            self.merge_vertex(merged_vertex, sim_fn.as_deref_mut());
        }
        if let Some(sim_fn) = sim_fn {
            sim_fn.branch_removed(&self.branches, ano, &mut self.invalid);
        }
        trace!("removed branch {} ({} -> {}) at node {}", ano, from, to, merged_vertex);
        self.order.push(ano);
        Ok(())
    }

    /// Collapse pass-through node `v`: one of its two branches absorbs the
    /// other along with the other's children and the branches parked at `v`.
    fn merge_vertex(&mut self, v: u32, sim_fn: Option<&mut (dyn ImportanceFunction + '_)>) {
        let prev = self.nodes[v as usize].prev[0];
        let next = self.nodes[v as usize].next[0];

        let (survivor, consumed) = if self.inq[prev as usize] {
            self.invalid[prev as usize] = true;
            self.removed[next as usize] = true;
            let to = self.branches[next as usize].to;
            self.branches[prev as usize].to = to;
            for b in self.nodes[to as usize].prev.iter_mut().filter(|b| **b == next) {
                *b = prev;
            }
            (prev, next)
        } else {
            self.invalid[next as usize] = true;
            self.removed[prev as usize] = true;
            let from = self.branches[prev as usize].from;
            self.branches[next as usize].from = from;
            for b in self.nodes[from as usize].next.iter_mut().filter(|b| **b == prev) {
                *b = next;
            }
            if sim_fn.is_some() && !self.inq[next as usize] {
                self.add_to_queue(next);
            }
            (next, prev)
        };

        let children = std::mem::take(&mut self.branches[consumed as usize].children);
        for &ch in &children {
            debug_assert_eq!(self.branches[ch as usize].parent, BranchParent::Owned(consumed));
            self.branches[ch as usize].parent = BranchParent::Owned(survivor);
        }
        let arcs = std::mem::take(&mut self.branches[consumed as usize].arcs);
        let parked = std::mem::take(&mut self.v_array[v as usize]);
        for &aa in &parked {
            self.branches[aa as usize].parent = BranchParent::Owned(survivor);
        }

        let br = &mut self.branches[survivor as usize];
        br.children.extend(children);
        br.arcs.extend(arcs);
        br.children.extend(parked);
        self.branches[consumed as usize].parent = BranchParent::Consumed;

        trace!("merged node {}: branch {} absorbed branch {}", v, survivor, consumed);
    }

    /// Compute the full decomposition, ordering removals by `sim_fn`.
    ///
    /// Returns the removal order with the surviving root last.
    pub fn simplify(&mut self, sim_fn: &mut dyn ImportanceFunction) -> Result<&[u32]> {
        debug!("init");
        self.init_simplification(Some(&mut *sim_fn));

        debug!("going over priority queue");
        let mut dropped = 0usize;
        while let Some((ano, _)) = self.queue.pop() {
            let idx = ano as usize;
            self.inq[idx] = false;
            if self.removed[idx] {
                continue;
            }
            if self.invalid[idx] {
                self.weights[idx] = sim_fn.update(&self.branches, ano);
                self.invalid[idx] = false;
                self.add_to_queue(ano);
            } else if self.is_candidate(ano) {
                self.remove_arc(ano, Some(&mut *sim_fn))?;
            } else {
                dropped += 1;
                trace!("branch {} is no longer a candidate", ano);
            }
        }

        debug!("pass over removed");
        let live = self.live_branches();
        if live.len() > 1 {
            return Err(Error::Consistency(format!(
                "{} branches remain after simplification: {:?}",
                live.len(),
                live
            )));
        }
        if let Some(&root) = live.first() {
            self.order.push(root);
            self.adopt_parked(root);
            // the root may have changed shape or gained children since it was last weighed
            self.weights[root as usize] = sim_fn.update(&self.branches, root);
            self.invalid[root as usize] = false;
        }

        info!(
            "branch decomposition: {} branches from {} arcs, {} stale entries dropped",
            self.order.len(),
            self.tree.no_arcs(),
            dropped
        );
        Ok(&self.order)
    }

    /// Branches parked at nodes that were never merged hang directly off the root.
    fn adopt_parked(&mut self, root: u32) {
        let parked: Vec<u32> = self.v_array.iter_mut().flat_map(std::mem::take).collect();
        for aa in parked {
            if self.branches[aa as usize].parent == BranchParent::Unassigned {
                self.branches[aa as usize].parent = BranchParent::Owned(root);
                self.branches[root as usize].children.push(aa);
            }
        }
    }

    /// Apply a previously computed `order` without an importance function.
    ///
    /// `weights` are the stored weights parallel to `order` and are only
    /// consulted for [`ReplayCriterion::Threshold`]. Every branch cut must
    /// still be a candidate when its turn comes; otherwise the order does not
    /// belong to this tree and an error is returned.
    ///
    /// Returns the number of branches removed.
    pub fn simplify_with_order(
        &mut self,
        order: &[u32],
        weights: &[f32],
        criterion: ReplayCriterion,
    ) -> Result<usize> {
        debug!("init");
        self.init_simplification(None);

        if let Some(&bad) = order.iter().find(|&&b| b as usize >= self.branches.len()) {
            return Err(Error::InvalidData(format!(
                "order references branch {} but the tree has {} arcs",
                bad,
                self.branches.len()
            )));
        }

        debug!("going over order queue");
        for &ano in order {
            self.inq[ano as usize] = true;
        }

        let mut count = 0usize;
        match criterion {
            ReplayCriterion::TopK(0) => {
                return Err(Error::InvalidData("top-k replay needs k > 0".to_string()));
            }
            ReplayCriterion::TopK(k) => {
                let ct = order.len().saturating_sub(k);
                for &ano in &order[..ct] {
                    self.check_replay_candidate(ano)?;
                    self.inq[ano as usize] = false;
                    self.remove_arc(ano, None)?;
                    count += 1;
                }
            }
            ReplayCriterion::Threshold(th) => {
                if weights.len() != order.len() {
                    return Err(Error::InvalidData(format!(
                        "order has {} entries but {} weights",
                        order.len(),
                        weights.len()
                    )));
                }
                let last = order.len().saturating_sub(1);
                for (&ano, &wt) in order[..last].iter().zip(weights) {
                    self.check_replay_candidate(ano)?;
                    if wt > th {
                        break;
                    }
                    self.inq[ano as usize] = false;
                    self.remove_arc(ano, None)?;
                    count += 1;
                }
            }
        }

        info!(
            "replayed order: removed {} of {} branches, {} remain",
            count,
            order.len(),
            self.live_branches().len()
        );
        Ok(count)
    }

    fn check_replay_candidate(&self, ano: u32) -> Result<()> {
        if self.removed[ano as usize] || !self.is_candidate(ano) {
            warn!("failing candidate test for branch {}", ano);
            return Err(Error::Consistency(format!(
                "branch {} is not removable at its position in the order",
                ano
            )));
        }
        Ok(())
    }

    /// Weights of the produced order, read from `sim_fn` and divided by the
    /// weight of the root.
    ///
    /// Fails if the decomposition has not been computed or if the weights
    /// ever decrease along the order.
    pub fn simplification_order(&self, sim_fn: &dyn ImportanceFunction) -> Result<SimplificationOrder> {
        if self.order.is_empty() {
            return Err(Error::Algorithm(
                "no removal order, run simplify first".to_string(),
            ));
        }
        let mut wts: Vec<f32> = self.order.iter().map(|&b| sim_fn.branch_weight(b)).collect();

        if let Some((i, (w1, w2))) = wts
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (w1, w2))| w1 > w2)
        {
            return Err(Error::Consistency(format!(
                "weights decrease at position {}: {} > {}",
                i + 1,
                w1,
                w2
            )));
        }

        let mut max_wt = wts[wts.len() - 1];
        if max_wt == 0.0 {
            max_wt = 1.0;
        }
        for w in wts.iter_mut() {
            *w /= max_wt;
        }
        SimplificationOrder::new(self.order.clone(), wts)
    }

    /// Removal order so far; complete with the root last after [`SimplifyCt::simplify`]
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch(&self, id: u32) -> &Branch {
        &self.branches[id as usize]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Current engine-side weight of a branch
    pub fn weight(&self, id: u32) -> f32 {
        self.weights[id as usize]
    }

    pub fn is_removed(&self, id: u32) -> bool {
        self.removed[id as usize]
    }

    /// Branches still part of the live topology
    pub fn live_branches(&self) -> Vec<u32> {
        (0..self.branches.len() as u32)
            .filter(|&b| !self.removed[b as usize])
            .collect()
    }

    /// Root of the decomposition, once [`SimplifyCt::simplify`] has completed
    pub fn root(&self) -> Option<u32> {
        self.order
            .last()
            .copied()
            .filter(|&b| !self.removed[b as usize])
    }
}

//! Branches and nodes of a contour tree under simplification

use crate::TreeArc;
use serde::{Deserialize, Serialize};

/// Position of a branch in the decomposition hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchParent {
    /// No owner yet; the last one left is the decomposition root
    Unassigned,
    /// Child of the given branch
    Owned(u32),
    /// Folded into another branch by a vertex merge
    Consumed,
}

impl BranchParent {
    /// The owning branch, if any
    pub fn owner(&self) -> Option<u32> {
        match self {
            BranchParent::Owned(p) => Some(*p),
            _ => None,
        }
    }
}

/// A branch of the decomposition.
///
/// One branch is created per contour tree arc and then mutated in place: its
/// endpoints move as it absorbs neighbouring branches and `arcs` grows with
/// every absorption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub from: u32,
    pub to: u32,
    pub parent: BranchParent,
    pub children: Vec<u32>,
    pub arcs: Vec<u32>,
}

impl Branch {
    /// Create the initial branch for arc `arc_id`
    pub fn from_arc(arc_id: u32, arc: TreeArc) -> Self {
        Self {
            from: arc.from,
            to: arc.to,
            parent: BranchParent::Unassigned,
            children: Vec::new(),
            arcs: vec![arc_id],
        }
    }

    /// Whether this branch has been folded into another one
    pub fn is_consumed(&self) -> bool {
        self.parent == BranchParent::Consumed
    }
}

/// Incident branches of a contour tree node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Branches ending at this node
    pub prev: Vec<u32>,
    /// Branches starting at this node
    pub next: Vec<u32>,
}

impl Node {
    pub fn is_minimum(&self) -> bool {
        self.prev.is_empty()
    }

    pub fn is_maximum(&self) -> bool {
        self.next.is_empty()
    }

    /// A node with exactly one incoming and one outgoing branch, which has to
    /// be collapsed.
    pub fn is_pass_through(&self) -> bool {
        self.prev.len() == 1 && self.next.len() == 1
    }
}

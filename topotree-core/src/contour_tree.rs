//! Contour tree input data

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A monotone arc of the contour tree, directed from the lower node to the
/// higher node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeArc {
    pub from: u32,
    pub to: u32,
}

impl TreeArc {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }
}

impl From<(u32, u32)> for TreeArc {
    fn from((from, to): (u32, u32)) -> Self {
        Self { from, to }
    }
}

/// A contour tree: per-node scalar values and the arcs between nodes.
///
/// The tree is owned by the caller and stays immutable while it is being
/// simplified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourTreeData {
    pub fn_vals: Vec<f32>,
    pub arcs: Vec<TreeArc>,
}

impl ContourTreeData {
    /// Create a contour tree from node scalar values and arcs.
    ///
    /// Fails if the tree has no nodes or no arcs, or if an arc references a
    /// node that does not exist.
    pub fn new<A>(fn_vals: Vec<f32>, arcs: Vec<A>) -> Result<Self>
    where
        A: Into<TreeArc>,
    {
        let arcs: Vec<TreeArc> = arcs.into_iter().map(Into::into).collect();
        if fn_vals.is_empty() {
            return Err(Error::InvalidData("Contour tree has no nodes".to_string()));
        }
        if arcs.is_empty() {
            return Err(Error::InvalidData("Contour tree has no arcs".to_string()));
        }
        if fn_vals.len() > u32::MAX as usize || arcs.len() > u32::MAX as usize {
            return Err(Error::InvalidData(
                "Contour tree is too large for 32-bit indices".to_string(),
            ));
        }
        let no_nodes = fn_vals.len() as u32;
        for (i, arc) in arcs.iter().enumerate() {
            if arc.from >= no_nodes || arc.to >= no_nodes {
                return Err(Error::InvalidData(format!(
                    "Arc {} ({} -> {}) references a node outside 0..{}",
                    i, arc.from, arc.to, no_nodes
                )));
            }
            if arc.from == arc.to {
                return Err(Error::InvalidData(format!(
                    "Arc {} is a self loop on node {}",
                    i, arc.from
                )));
            }
        }
        Ok(Self { fn_vals, arcs })
    }

    /// Number of arcs
    pub fn no_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Number of nodes
    pub fn no_nodes(&self) -> usize {
        self.fn_vals.len()
    }

    /// Scalar value of a node
    pub fn fn_val(&self, node: u32) -> f32 {
        self.fn_vals[node as usize]
    }

    /// Signed scalar span between two nodes, `fn(to) - fn(from)`.
    pub fn span(&self, from: u32, to: u32) -> f32 {
        self.fn_val(to) - self.fn_val(from)
    }
}

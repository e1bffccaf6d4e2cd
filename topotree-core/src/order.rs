//! Removal order produced by a branch decomposition

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Branch ids in removal sequence (root last) with their normalized weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplificationOrder {
    pub order: Vec<u32>,
    pub weights: Vec<f32>,
}

impl SimplificationOrder {
    /// Pair an order with its weights, checking that both have the same length.
    pub fn new(order: Vec<u32>, weights: Vec<f32>) -> Result<Self> {
        if order.len() != weights.len() {
            return Err(Error::InvalidData(format!(
                "Order has {} entries but {} weights",
                order.len(),
                weights.len()
            )));
        }
        Ok(Self { order, weights })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The decomposition root, i.e. the last entry
    pub fn root(&self) -> Option<u32> {
        self.order.last().copied()
    }

    /// Whether the weights never decrease along the order
    pub fn is_monotonic(&self) -> bool {
        self.weights.windows(2).all(|w| w[0] <= w[1])
    }

    /// The `k` most important branches, least important first
    pub fn top_k(&self, k: usize) -> &[u32] {
        let start = self.order.len().saturating_sub(k);
        &self.order[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        assert!(SimplificationOrder::new(vec![0, 1], vec![0.5]).is_err());
    }

    #[test]
    fn test_accessors() {
        let order = SimplificationOrder::new(vec![2, 0, 1], vec![0.25, 0.5, 1.0]).unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order.root(), Some(1));
        assert!(order.is_monotonic());
        assert_eq!(order.top_k(2), &[0, 1]);
        assert_eq!(order.top_k(10), &[2, 0, 1]);
    }

    #[test]
    fn test_non_monotonic() {
        let order = SimplificationOrder::new(vec![0, 1], vec![1.0, 0.5]).unwrap();
        assert!(!order.is_monotonic());
    }
}

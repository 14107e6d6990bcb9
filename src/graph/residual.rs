use crate::types::{Network, NodeLabel};

/// Remaining capacity per ordered node pair during one flow computation.
///
/// Dense, 1-indexed, and owned by a single `max_flow` invocation, so the
/// network's own edge capacities are never mutated and repeated queries
/// start from the same state.
pub struct Residual {
    stride: usize,
    capacities: Vec<u64>,
}

impl Residual {
    pub fn new(network: &Network) -> Residual {
        let stride = network.labels().max().unwrap_or(0) as usize + 1;
        let mut capacities = vec![0; stride * stride];
        for edge in network.edges() {
            capacities[edge.from as usize * stride + edge.to as usize] =
                u64::from(edge.capacity);
        }
        Residual { stride, capacities }
    }

    pub fn capacity(&self, from: NodeLabel, to: NodeLabel) -> u64 {
        self.capacities[self.index(from, to)]
    }

    /// Sends `amount` of flow over `from -> to`: the forward capacity
    /// shrinks and the backward capacity grows by the same amount, so a
    /// later augmentation can cancel flow on an anti-parallel edge.
    pub fn push_flow(&mut self, from: NodeLabel, to: NodeLabel, amount: u64) {
        let forward = self.index(from, to);
        self.capacities[forward] -= amount;
        let backward = self.index(to, from);
        self.capacities[backward] += amount;
    }

    fn index(&self, from: NodeLabel, to: NodeLabel) -> usize {
        from as usize * self.stride + to as usize
    }
}

use std::cmp::min;
use std::collections::{HashMap, VecDeque};

use crate::graph::bfs::trace;
use crate::graph::residual::Residual;
use crate::types::{Network, NodeLabel};

/// Breadth-first search for an augmenting path in the residual graph.
///
/// Identical traversal order to the plain BFS, but an edge is only
/// followable while its residual capacity is strictly positive, and the
/// smallest residual capacity seen so far is carried along. Returns that
/// bottleneck together with the source-to-sink path once `sink` is reached,
/// or `(0, vec![])` when the sink is unreachable in the residual graph.
pub fn augmenting_path(
    network: &Network,
    residual: &Residual,
    source: NodeLabel,
    sink: NodeLabel,
) -> (u64, Vec<NodeLabel>) {
    let mut parent = HashMap::new();
    if source == sink {
        return (0, vec![]);
    }
    let mut queue = VecDeque::<(NodeLabel, u64)>::new();
    parent.insert(source, source);
    queue.push_back((source, u64::MAX));
    while let Some((node, flow)) = queue.pop_front() {
        for edge in network.outgoing(node) {
            let capacity = residual.capacity(node, edge.to);
            if !parent.contains_key(&edge.to) && capacity > 0 {
                parent.insert(edge.to, node);
                let new_flow = min(flow, capacity);
                if edge.to == sink {
                    return (new_flow, trace(&parent, source, sink));
                }
                queue.push_back((edge.to, new_flow));
            }
        }
    }
    (0, vec![])
}

use std::cmp::min;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::bfs::{bfs, trace};
use crate::types::{Network, NodeLabel, QueryError};

/// Path from `source` to `sink` maximizing the bottleneck capacity, found
/// by greedy relaxation over a priority queue keyed by `(bottleneck, node)`.
///
/// Relaxation runs to exhaustion rather than stopping at the sink, so every
/// reachable node ends up with its final bottleneck value. Returns the
/// sink's bottleneck and the path; `PathNotFound` when the sink is
/// unreachable.
pub fn widest_path(
    network: &Network,
    source: NodeLabel,
    sink: NodeLabel,
) -> Result<(u32, Vec<NodeLabel>), QueryError> {
    check_endpoints(network, source, sink)?;

    let mut best: HashMap<NodeLabel, u32> = HashMap::new();
    let mut parent: HashMap<NodeLabel, NodeLabel> = HashMap::new();
    let mut heap = BinaryHeap::new();
    // The source can carry anything; everything else starts at 0.
    best.insert(source, u32::MAX);
    parent.insert(source, source);
    heap.push((u32::MAX, source));

    while let Some((bottleneck, node)) = heap.pop() {
        if bottleneck < best.get(&node).copied().unwrap_or(0) {
            continue; // stale heap entry
        }
        for edge in network.outgoing(node) {
            let through = min(bottleneck, edge.capacity);
            if through > best.get(&edge.to).copied().unwrap_or(0) {
                best.insert(edge.to, through);
                parent.insert(edge.to, node);
                heap.push((through, edge.to));
            }
        }
    }

    if !parent.contains_key(&sink) {
        return Err(QueryError::PathNotFound {
            start: source,
            sink,
        });
    }
    Ok((best[&sink], trace(&parent, source, sink)))
}

/// Path from `source` to `sink` with the fewest edges, plus its bottleneck
/// capacity. The bottleneck is computed after reconstruction, over the
/// path's edges; the traversal itself only counts hops. This path may carry
/// less than the widest path but uses fewer connections.
pub fn min_hop_path(
    network: &Network,
    source: NodeLabel,
    sink: NodeLabel,
) -> Result<(u32, Vec<NodeLabel>), QueryError> {
    check_endpoints(network, source, sink)?;

    let parent = bfs(network, source, sink);
    if !parent.contains_key(&sink) {
        return Err(QueryError::PathNotFound {
            start: source,
            sink,
        });
    }
    let path = trace(&parent, source, sink);
    let capacity = path
        .windows(2)
        .filter_map(|pair| network.edge(pair[0], pair[1]))
        .map(|edge| edge.capacity)
        .min()
        .unwrap_or(0);
    Ok((capacity, path))
}

pub fn check_endpoints(
    network: &Network,
    source: NodeLabel,
    sink: NodeLabel,
) -> Result<(), QueryError> {
    network.node(source)?;
    network.node(sink)?;
    if source == sink {
        return Err(QueryError::SameSourceAndSink(source));
    }
    Ok(())
}

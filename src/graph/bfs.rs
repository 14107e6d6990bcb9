use std::collections::{HashMap, VecDeque};

use crate::types::{Network, NodeLabel};

/// Level-order traversal from `source`, stopping as soon as `target` is
/// first discovered. Returns the parent link of every discovered node
/// (the source is its own parent); callers must check
/// `parent.contains_key(&target)` before reconstructing a path.
pub fn bfs(
    network: &Network,
    source: NodeLabel,
    target: NodeLabel,
) -> HashMap<NodeLabel, NodeLabel> {
    let mut parent = HashMap::new();
    let mut queue = VecDeque::new();
    parent.insert(source, source);
    queue.push_back(source);
    while let Some(current) = queue.pop_front() {
        for edge in network.outgoing(current) {
            if !parent.contains_key(&edge.to) {
                parent.insert(edge.to, current);
                if edge.to == target {
                    return parent;
                }
                queue.push_back(edge.to);
            }
        }
    }
    parent
}

/// Walks the parent links back from `sink` and returns the source-to-sink
/// label sequence. Only valid once `sink` is known to have been discovered.
pub fn trace(
    parent: &HashMap<NodeLabel, NodeLabel>,
    source: NodeLabel,
    sink: NodeLabel,
) -> Vec<NodeLabel> {
    let mut path = vec![sink];
    let mut node = sink;
    while node != source {
        node = parent[&node];
        path.push(node);
    }
    path.reverse();
    path
}

use std::collections::BTreeMap;

use crate::types::{Edge, NodeLabel, QueryError};

/// A stop together with its outgoing connections, keyed by destination.
/// There is at most one edge per ordered pair; re-adding an edge to the
/// same destination replaces its attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    label: NodeLabel,
    outgoing: BTreeMap<NodeLabel, Edge>,
}

impl Node {
    pub fn label(&self) -> NodeLabel {
        self.label
    }

    pub fn outgoing(&self) -> impl Iterator<Item = &Edge> {
        self.outgoing.values()
    }

    pub fn edge_to(&self, dest: NodeLabel) -> Option<&Edge> {
        self.outgoing.get(&dest)
    }
}

/// The transport network: a directed graph of stops and capacitated,
/// duration-weighted connections.
#[derive(Clone, Debug, Default)]
pub struct Network {
    nodes: BTreeMap<NodeLabel, Node>,
}

impl Network {
    pub fn new() -> Network {
        Network::default()
    }

    /// Network with the dense label space `1..=n` and no edges yet.
    pub fn with_nodes(n: u32) -> Network {
        let mut network = Network::new();
        for label in 1..=n {
            network.add_node(label);
        }
        network
    }

    /// Builds a network from a loader's `(node_count, edges)` pair.
    /// Duplicate ordered pairs keep the last occurrence.
    pub fn from_edges(node_count: u32, edges: Vec<Edge>) -> Network {
        let mut network = Network::with_nodes(node_count);
        for edge in edges {
            network.add_edge(edge.from, edge.to, edge.capacity, edge.duration);
        }
        network
    }

    pub fn add_node(&mut self, label: NodeLabel) {
        self.nodes.entry(label).or_insert_with(|| Node {
            label,
            outgoing: BTreeMap::new(),
        });
    }

    /// Inserts or replaces the edge `from -> to`. Does nothing when either
    /// endpoint is missing; callers create nodes first.
    pub fn add_edge(&mut self, from: NodeLabel, to: NodeLabel, capacity: u32, duration: u32) {
        if !self.nodes.contains_key(&to) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            node.outgoing.insert(
                to,
                Edge {
                    from,
                    to,
                    capacity,
                    duration,
                },
            );
        }
    }

    pub fn has_node(&self, label: NodeLabel) -> bool {
        self.nodes.contains_key(&label)
    }

    pub fn node(&self, label: NodeLabel) -> Result<&Node, QueryError> {
        self.nodes.get(&label).ok_or(QueryError::UnknownNode(label))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.outgoing.len()).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = NodeLabel> + '_ {
        self.nodes.keys().copied()
    }

    /// Outgoing edges of `label`, in ascending destination order.
    /// Empty for unknown labels.
    pub fn outgoing(&self, label: NodeLabel) -> impl Iterator<Item = &Edge> {
        self.nodes
            .get(&label)
            .into_iter()
            .flat_map(|node| node.outgoing.values())
    }

    pub fn edge(&self, from: NodeLabel, to: NodeLabel) -> Option<&Edge> {
        self.nodes.get(&from).and_then(|node| node.edge_to(to))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.nodes.values().flat_map(|node| node.outgoing.values())
    }
}

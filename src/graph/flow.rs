use std::collections::BTreeMap;

use log::debug;

use crate::graph::augmenting_path::augmenting_path;
use crate::graph::residual::Residual;
use crate::graph::widest_path::check_endpoints;
use crate::types::{Network, NodeLabel, QueryError};

/// One augmentation of a flow computation: the source-to-sink label
/// sequence and the amount of flow it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugmentingPath {
    pub bottleneck: u64,
    pub nodes: Vec<NodeLabel>,
}

/// Total flow between source and sink plus its decomposition into one path
/// per augmentation, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowResult {
    pub flow: u64,
    pub paths: Vec<AugmentingPath>,
}

impl FlowResult {
    /// The subgraph this flow actually uses: the same label space as
    /// `network`, restricted to the edges touched by any augmenting path,
    /// with their original attributes. Feeding it back into [`max_flow`]
    /// re-checks whether the existing routes still have spare capacity.
    pub fn subgraph(&self, network: &Network) -> Network {
        let mut sub = Network::new();
        for label in network.labels() {
            sub.add_node(label);
        }
        for path in &self.paths {
            for pair in path.nodes.windows(2) {
                if let Some(edge) = network.edge(pair[0], pair[1]) {
                    sub.add_edge(edge.from, edge.to, edge.capacity, edge.duration);
                }
            }
        }
        sub
    }
}

/// Outcome of a flow query with a requested group size. The infeasible arm
/// still carries the best flow found, so callers can report how many units
/// the network does support.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowTarget {
    Met(FlowResult),
    Infeasible(FlowResult),
}

impl FlowTarget {
    pub fn flow(&self) -> u64 {
        match self {
            FlowTarget::Met(result) | FlowTarget::Infeasible(result) => result.flow,
        }
    }

    pub fn result(&self) -> &FlowResult {
        match self {
            FlowTarget::Met(result) | FlowTarget::Infeasible(result) => result,
        }
    }

    pub fn is_met(&self) -> bool {
        matches!(self, FlowTarget::Met(_))
    }
}

/// Maximum flow from `source` to `sink` by repeated augmenting-path search
/// (Edmonds-Karp). A sink that cannot be reached yields flow 0 and no
/// paths, which is an answer, not an error.
pub fn max_flow(
    network: &Network,
    source: NodeLabel,
    sink: NodeLabel,
) -> Result<FlowResult, QueryError> {
    compute_flow(network, source, sink, None)
}

/// Like [`max_flow`], but stops augmenting as soon as `target` units can
/// move. The flow is then sufficient for the group, not necessarily
/// maximum. When the target cannot be met the search runs to exhaustion
/// and the true maximum comes back tagged [`FlowTarget::Infeasible`].
pub fn feasible_flow(
    network: &Network,
    source: NodeLabel,
    sink: NodeLabel,
    target: u64,
) -> Result<FlowTarget, QueryError> {
    let result = compute_flow(network, source, sink, Some(target))?;
    Ok(if result.flow >= target {
        FlowTarget::Met(result)
    } else {
        FlowTarget::Infeasible(result)
    })
}

fn compute_flow(
    network: &Network,
    source: NodeLabel,
    sink: NodeLabel,
    target: Option<u64>,
) -> Result<FlowResult, QueryError> {
    check_endpoints(network, source, sink)?;

    let mut residual = Residual::new(network);
    let mut flow = 0;
    let mut paths = Vec::new();
    loop {
        if let Some(target) = target {
            if flow >= target {
                break;
            }
        }
        let (new_flow, nodes) = augmenting_path(network, &residual, source, sink);
        if new_flow == 0 {
            break;
        }
        for pair in nodes.windows(2) {
            residual.push_flow(pair[0], pair[1], new_flow);
        }
        flow += new_flow;
        paths.push(AugmentingPath {
            bottleneck: new_flow,
            nodes,
        });
    }

    debug!("flow {source} -> {sink}: {flow} over {} paths", paths.len());
    Ok(FlowResult { flow, paths })
}

const COLORS: [&str; 8] = [
    "black", "red", "blue", "purple", "green", "yellow", "cyan", "gray",
];

/// Graphviz rendering of the network with each edge colored by the set of
/// augmenting paths using it (black for unused edges). Returns the dot
/// source; writing the file is the caller's job.
pub fn flow_to_dot(network: &Network, result: &FlowResult) -> String {
    let mut masks: BTreeMap<(NodeLabel, NodeLabel), usize> = BTreeMap::new();
    for (i, path) in result.paths.iter().enumerate() {
        for pair in path.nodes.windows(2) {
            *masks.entry((pair[0], pair[1])).or_default() |= 1 << (i % 3);
        }
    }
    let mut out = String::from("digraph network {\n");
    if network.node_count() < 100 {
        out.push_str("splines=true\n");
    }
    for edge in network.edges() {
        let mask = masks.get(&(edge.from, edge.to)).copied().unwrap_or(0);
        out.push_str(&format!(
            "{} -> {} [color={} label=\"{}/{}\"]\n",
            edge.from,
            edge.to,
            COLORS[mask & 7],
            edge.capacity,
            edge.duration
        ));
    }
    out.push_str("}\n");
    out
}

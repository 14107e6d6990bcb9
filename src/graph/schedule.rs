use std::collections::{BTreeMap, VecDeque};

use crate::types::{Network, NodeLabel, QueryError};

/// Earliest-arrival schedule over a flow subgraph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Earliest time by which every reachable node has been reached, i.e.
    /// when the whole group has arrived.
    pub finish_time: u64,
    /// Earliest start per node given edge durations as sequential delays.
    pub earliest_start: BTreeMap<NodeLabel, u64>,
    /// Spread between the latest and earliest arrival bound per node.
    /// 0 for the source and for nodes never entered by any path.
    pub waits: BTreeMap<NodeLabel, u64>,
}

impl Schedule {
    /// The longest wait anywhere and every node attaining it, ascending
    /// by label.
    pub fn max_wait(&self) -> (u64, Vec<NodeLabel>) {
        let longest = self.waits.values().copied().max().unwrap_or(0);
        let nodes = self
            .waits
            .iter()
            .filter(|(_, wait)| **wait == longest)
            .map(|(label, _)| *label)
            .collect();
        (longest, nodes)
    }
}

/// Kahn-style propagation of earliest-start times over `subgraph`, which
/// must be a DAG (typically the path union of a flow result). A cycle
/// leaves nodes unprocessed once the zero-in-degree queue drains and is
/// reported as `MalformedSchedule` instead of a partial answer.
pub fn critical_path(subgraph: &Network) -> Result<Schedule, QueryError> {
    let mut earliest: BTreeMap<NodeLabel, u64> =
        subgraph.labels().map(|label| (label, 0)).collect();
    let mut entry_degree: BTreeMap<NodeLabel, usize> =
        subgraph.labels().map(|label| (label, 0)).collect();
    for edge in subgraph.edges() {
        if let Some(degree) = entry_degree.get_mut(&edge.to) {
            *degree += 1;
        }
    }

    // Arrival bounds per node, tracked only for nodes some edge enters.
    let mut min_arrival: BTreeMap<NodeLabel, u64> = BTreeMap::new();
    let mut max_arrival: BTreeMap<NodeLabel, u64> = BTreeMap::new();

    let mut queue: VecDeque<NodeLabel> = entry_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(label, _)| *label)
        .collect();
    let mut finish_time = 0;
    let mut processed = 0;

    while let Some(node) = queue.pop_front() {
        processed += 1;
        let start = earliest.get(&node).copied().unwrap_or(0);
        if start > finish_time {
            finish_time = start;
        }
        for edge in subgraph.outgoing(node) {
            let arrival = start + u64::from(edge.duration);
            let reached = earliest.entry(edge.to).or_insert(0);
            if arrival > *reached {
                *reached = arrival;
            }
            let reached = *reached;
            min_arrival
                .entry(edge.to)
                .and_modify(|bound| *bound = (*bound).min(reached))
                .or_insert(reached);
            max_arrival
                .entry(edge.to)
                .and_modify(|bound| *bound = (*bound).max(reached))
                .or_insert(reached);
            if let Some(degree) = entry_degree.get_mut(&edge.to) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(edge.to);
                }
            }
        }
    }

    if processed < subgraph.node_count() {
        return Err(QueryError::MalformedSchedule);
    }

    let mut waits = BTreeMap::new();
    for label in subgraph.labels() {
        // The source never waits for anyone, by convention.
        let wait = if label == 1 {
            0
        } else {
            match (min_arrival.get(&label), max_arrival.get(&label)) {
                (Some(min), Some(max)) => max - min,
                _ => 0,
            }
        };
        waits.insert(label, wait);
    }

    Ok(Schedule {
        finish_time,
        earliest_start: earliest,
        waits,
    })
}

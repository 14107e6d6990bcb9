//! Timed, report-oriented wrappers around the core queries: one function
//! per planning scenario of the batch runner. Timing is measured here, as a
//! decorator, never inside the algorithm bodies.
//!
//! Scenario functions follow the dataset convention that node 1 is the
//! source and node N the sink; the core queries underneath take explicit
//! endpoints.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use log::info;
use serde::Serialize;

use crate::graph::{
    critical_path, feasible_flow, max_flow, min_hop_path, widest_path, FlowResult, FlowTarget,
    Schedule,
};
use crate::io::{available_datasets, read_network};
use crate::types::{Network, NodeLabel, QueryError};

/// A query result together with how long the query took.
pub struct Timed<T> {
    pub result: T,
    pub runtime: Duration,
}

pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let result = f();
    Timed {
        result,
        runtime: start.elapsed(),
    }
}

fn endpoints(network: &Network) -> (NodeLabel, NodeLabel) {
    (1, network.node_count() as NodeLabel)
}

/// The single path that lets the largest group travel together.
pub fn widest_group(network: &Network) -> Timed<Result<(u32, Vec<NodeLabel>), QueryError>> {
    let (source, sink) = endpoints(network);
    timed(|| widest_path(network, source, sink))
}

/// The path with the fewest stops, and how many people fit on it.
pub fn fewest_stops(network: &Network) -> Timed<Result<(u32, Vec<NodeLabel>), QueryError>> {
    let (source, sink) = endpoints(network);
    timed(|| min_hop_path(network, source, sink))
}

/// Routes for a group of `group_size`, splitting it across paths when no
/// single path suffices.
pub fn route_group(network: &Network, group_size: u64) -> Timed<Result<FlowTarget, QueryError>> {
    let (source, sink) = endpoints(network);
    timed(|| feasible_flow(network, source, sink, group_size))
}

/// Re-routes a grown group. The routes already assigned are re-checked
/// first; only when their spare capacity is insufficient is the whole
/// network searched again. The boolean reports whether new routes were
/// needed.
pub fn regrow_group(
    network: &Network,
    previous: &FlowResult,
    new_size: u64,
) -> Timed<Result<(bool, FlowTarget), QueryError>> {
    let (source, sink) = endpoints(network);
    timed(|| {
        let existing = max_flow(&previous.subgraph(network), source, sink)?;
        if existing.flow >= new_size {
            return Ok((false, FlowTarget::Met(existing)));
        }
        let rerouted = feasible_flow(network, source, sink, new_size)?;
        Ok((true, rerouted))
    })
}

/// The largest group the network can move at all.
pub fn largest_group(network: &Network) -> Timed<Result<FlowResult, QueryError>> {
    let (source, sink) = endpoints(network);
    timed(|| max_flow(network, source, sink))
}

/// When the whole group has arrived, given the routes of `flow`.
pub fn earliest_meetup(
    network: &Network,
    flow: &FlowResult,
) -> Timed<Result<Schedule, QueryError>> {
    timed(|| critical_path(&flow.subgraph(network)))
}

/// The longest time any subgroup spends waiting for the others, and where.
pub fn longest_wait(
    network: &Network,
    flow: &FlowResult,
) -> Timed<Result<(u64, Vec<NodeLabel>), QueryError>> {
    timed(|| critical_path(&flow.subgraph(network)).map(|schedule| schedule.max_wait()))
}

/// One row of the batch report, one dataset per row.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub dataset: String,
    pub widest_capacity: Option<u32>,
    pub widest_stops: Option<usize>,
    pub widest_us: u128,
    pub fewest_capacity: Option<u32>,
    pub fewest_stops: Option<usize>,
    pub fewest_us: u128,
    pub group_size: u64,
    pub group_feasible: bool,
    pub group_us: u128,
    pub increase: u64,
    pub needs_new_route: Option<bool>,
    pub increase_us: u128,
    pub max_flow: u64,
    pub max_flow_us: u128,
    pub earliest_finish: Option<u64>,
    pub finish_us: u128,
    pub max_wait: Option<u64>,
    pub wait_us: u128,
}

/// Runs every scenario over one network.
pub fn analyze(
    dataset: String,
    network: &Network,
    group_size: u64,
    increase: u64,
) -> ScenarioReport {
    let widest = widest_group(network);
    let (widest_capacity, widest_stops) = split_path(&widest.result);
    let fewest = fewest_stops(network);
    let (fewest_capacity, fewest_hop_count) = split_path(&fewest.result);

    let routed = route_group(network, group_size);
    let group_feasible = matches!(&routed.result, Ok(target) if target.is_met());

    // The grown group is only meaningful when the original one fit.
    let (needs_new_route, increase_us) = match &routed.result {
        Ok(FlowTarget::Met(result)) => {
            let regrown = regrow_group(network, result, group_size + increase);
            let needed = match regrown.result {
                Ok((needed, FlowTarget::Met(_))) => Some(needed),
                _ => None,
            };
            (needed, regrown.runtime.as_micros())
        }
        _ => (None, 0),
    };

    let largest = largest_group(network);
    let (max_flow, earliest_finish, finish_us, max_wait, wait_us) = match &largest.result {
        Ok(result) => {
            let meetup = earliest_meetup(network, result);
            let wait = longest_wait(network, result);
            (
                result.flow,
                meetup.result.ok().map(|schedule| schedule.finish_time),
                meetup.runtime.as_micros(),
                wait.result.ok().map(|(wait, _)| wait),
                wait.runtime.as_micros(),
            )
        }
        Err(_) => (0, None, 0, None, 0),
    };

    info!(
        "{dataset}: widest {:?} in {:?}, max flow {max_flow} in {:?}",
        widest_capacity, widest.runtime, largest.runtime
    );

    ScenarioReport {
        dataset,
        widest_capacity,
        widest_stops,
        widest_us: widest.runtime.as_micros(),
        fewest_capacity,
        fewest_stops: fewest_hop_count,
        fewest_us: fewest.runtime.as_micros(),
        group_size,
        group_feasible,
        group_us: routed.runtime.as_micros(),
        increase,
        needs_new_route,
        increase_us,
        max_flow,
        max_flow_us: largest.runtime.as_micros(),
        earliest_finish,
        finish_us,
        max_wait,
        wait_us,
    }
}

fn split_path(
    result: &Result<(u32, Vec<NodeLabel>), QueryError>,
) -> (Option<u32>, Option<usize>) {
    match result {
        Ok((capacity, path)) => (Some(*capacity), Some(path.len().saturating_sub(1))),
        Err(_) => (None, None),
    }
}

/// Runs every scenario for every dataset in `dir`.
pub fn run_all(dir: &Path, group_size: u64, increase: u64) -> Result<Vec<ScenarioReport>, io::Error> {
    let mut reports = Vec::new();
    for path in available_datasets(dir)? {
        let network = read_network(&path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        reports.push(analyze(name, &network, group_size, increase));
    }
    Ok(reports)
}

const REPORT_HEADER: &str = "dataset,widest_capacity,widest_stops,widest_us,\
fewest_capacity,fewest_stops,fewest_us,group_size,group_feasible,group_us,\
increase,needs_new_route,increase_us,max_flow,max_flow_us,earliest_finish,\
finish_us,max_wait,wait_us";

/// Writes the batch report as CSV, one row per dataset. Unanswerable cells
/// (unreachable sink, infeasible group) stay empty.
pub fn write_report(reports: &[ScenarioReport], path: &Path) -> Result<(), io::Error> {
    let mut file = File::create(path)?;
    writeln!(file, "{REPORT_HEADER}")?;
    for row in reports {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            row.dataset,
            cell(row.widest_capacity),
            cell(row.widest_stops),
            row.widest_us,
            cell(row.fewest_capacity),
            cell(row.fewest_stops),
            row.fewest_us,
            row.group_size,
            row.group_feasible,
            row.group_us,
            row.increase,
            cell(row.needs_new_route),
            row.increase_us,
            row.max_flow,
            row.max_flow_us,
            cell(row.earliest_finish),
            row.finish_us,
            cell(row.max_wait),
            row.wait_us,
        )?;
    }
    Ok(())
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

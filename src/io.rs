use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::types::Network;

/// Reads a dataset file: a `<nodes> <edges>` header line followed by one
/// `src dest capacity duration` line per edge. Labels must fall in the
/// dense `1..=nodes` space; duplicate ordered pairs keep the last
/// occurrence.
pub fn read_network(path: &Path) -> Result<Network, io::Error> {
    let file = BufReader::new(File::open(path)?);
    let mut lines = file.lines();
    let header = lines
        .next()
        .ok_or_else(|| invalid("missing dataset header line"))??;
    let node_count = match &header.split_whitespace().collect::<Vec<_>>()[..] {
        [nodes, _edges] => parse_number(nodes)?,
        _ => {
            return Err(invalid(&format!(
                "expected <nodes> <edges>, but got {header}"
            )))
        }
    };
    let mut network = Network::with_nodes(node_count);
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match &line.split_whitespace().collect::<Vec<_>>()[..] {
            [from, to, capacity, duration] => {
                let from = parse_number(from)?;
                let to = parse_number(to)?;
                if !network.has_node(from) || !network.has_node(to) {
                    return Err(invalid(&format!("edge endpoint out of range: {line}")));
                }
                network.add_edge(from, to, parse_number(capacity)?, parse_number(duration)?);
            }
            _ => {
                return Err(invalid(&format!(
                    "expected src dest capacity duration, but got {line}"
                )))
            }
        }
    }
    Ok(network)
}

/// Writes a network in the dataset format read by [`read_network`].
pub fn write_network(network: &Network, path: &Path) -> Result<(), io::Error> {
    let mut file = File::create(path)?;
    writeln!(file, "{} {}", network.node_count(), network.edge_count())?;
    for edge in network.edges() {
        writeln!(
            file,
            "{} {} {} {}",
            edge.from, edge.to, edge.capacity, edge.duration
        )?;
    }
    Ok(())
}

/// All regular files in a dataset directory, sorted by name.
pub fn available_datasets(dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
    let mut datasets = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            datasets.push(entry.path());
        }
    }
    datasets.sort();
    Ok(datasets)
}

/// Knobs for [`generate_network`]. Seeded so generated datasets are
/// reproducible.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerationParams {
    pub nodes: u32,
    pub extra_edges: u32,
    pub max_capacity: u32,
    pub max_duration: u32,
    pub seed: u64,
}

impl Default for GenerationParams {
    fn default() -> GenerationParams {
        GenerationParams {
            nodes: 50,
            extra_edges: 150,
            max_capacity: 20,
            max_duration: 30,
            seed: 0,
        }
    }
}

/// Reads generation parameters from a JSON file.
pub fn read_generation_params(path: &Path) -> Result<GenerationParams, io::Error> {
    let file = BufReader::new(File::open(path)?);
    serde_json::from_reader(file).map_err(|e| invalid(&format!("bad params file: {e}")))
}

/// Pseudo-random network over the labels `1..=nodes`. Every edge points
/// from a smaller to a larger label, so the result is a DAG, and a spine
/// path `1 -> 2 -> ... -> nodes` keeps the sink reachable from the source.
pub fn generate_network(params: &GenerationParams) -> Network {
    let nodes = params.nodes.max(2);
    let max_capacity = params.max_capacity.max(1);
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut network = Network::with_nodes(nodes);
    for from in 1..nodes {
        network.add_edge(
            from,
            from + 1,
            rng.gen_range(1..=max_capacity),
            rng.gen_range(0..=params.max_duration),
        );
    }
    for _ in 0..params.extra_edges {
        let from = rng.gen_range(1..nodes);
        let to = rng.gen_range(from + 1..=nodes);
        network.add_edge(
            from,
            to,
            rng.gen_range(1..=max_capacity),
            rng.gen_range(0..=params.max_duration),
        );
    }
    network
}

fn parse_number(token: &str) -> Result<u32, io::Error> {
    token
        .parse()
        .map_err(|_| invalid(&format!("expected a number, but got {token}")))
}

fn invalid(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

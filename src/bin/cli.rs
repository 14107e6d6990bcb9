use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::exit;

use groupflow::graph::{flow_to_dot, FlowResult};
use groupflow::io::{
    generate_network, read_generation_params, read_network, write_network, GenerationParams,
};
use groupflow::scenarios::{
    earliest_meetup, fewest_stops, largest_group, longest_wait, route_group, run_all,
    widest_group, write_report,
};
use groupflow::types::{Network, NodeLabel};

fn main() {
    env_logger::init();

    let (dotfile, mut args) =
        if env::args().len() >= 2 && env::args().nth_back(1).unwrap() == "--dot" {
            (
                Some(env::args().last().unwrap()),
                env::args().rev().skip(2).rev().collect::<Vec<_>>(),
            )
        } else {
            (None, env::args().collect::<Vec<_>>())
        };
    let json_out = if args.get(1) == Some(&"--json".to_string()) {
        args = [vec![args[0].clone()], args[2..].to_vec()].concat();
        true
    } else {
        false
    };

    match args.get(1).map(String::as_str) {
        Some("--batch") => batch(&args, json_out),
        Some("--generate") => generate(&args),
        Some(_) if args.len() >= 3 => query(&args, json_out, dotfile),
        _ => usage(),
    }
}

fn usage() {
    println!("Usage: cli [--json] <dataset> widest|minhop|maxflow [<group-size>] [--dot <dotfile>]");
    println!("Usage: cli [--json] <dataset> schedule|waits [--dot <dotfile>]");
    println!("Usage: cli [--json] --batch <datasets-dir> <out.csv> [<group-size> [<increase>]]");
    println!("Usage: cli --generate <out-file> [<params.json>]");
    println!("Option --json prints results as JSON instead of plain text.");
    println!("Option --dot writes a graphviz rendering of the flow routes.");
    exit(1);
}

fn load(path: &str) -> Network {
    read_network(Path::new(path))
        .unwrap_or_else(|e| panic!("Error loading dataset from \"{path}\": {e}"))
}

fn query(args: &[String], json_out: bool, dotfile: Option<String>) {
    let network = load(&args[1]);
    match args[2].as_str() {
        "widest" => print_path("widest", widest_group(&network).result, json_out),
        "minhop" => print_path("minhop", fewest_stops(&network).result, json_out),
        "maxflow" => {
            let result = match args.get(3) {
                Some(size) => {
                    let size = size
                        .parse()
                        .unwrap_or_else(|_| panic!("Expected a group size, but got: {size}"));
                    match route_group(&network, size).result {
                        Ok(target) => {
                            if !target.is_met() {
                                println!(
                                    "No feasible assignment for a group of {size}; \
                                     the network carries at most {}.",
                                    target.flow()
                                );
                            }
                            target.result().clone()
                        }
                        Err(e) => fail(&e.to_string()),
                    }
                }
                None => match largest_group(&network).result {
                    Ok(result) => result,
                    Err(e) => fail(&e.to_string()),
                },
            };
            print_flow(&result, json_out);
            write_dot(&network, &result, dotfile);
        }
        "schedule" => {
            let flow = match largest_group(&network).result {
                Ok(result) => result,
                Err(e) => fail(&e.to_string()),
            };
            match earliest_meetup(&network, &flow).result {
                Ok(schedule) => {
                    if json_out {
                        println!(
                            "{}",
                            json::object! { finishTime: schedule.finish_time }
                        );
                    } else {
                        println!("Whole group arrives at t={}", schedule.finish_time);
                    }
                }
                Err(e) => fail(&e.to_string()),
            }
            write_dot(&network, &flow, dotfile);
        }
        "waits" => {
            let flow = match largest_group(&network).result {
                Ok(result) => result,
                Err(e) => fail(&e.to_string()),
            };
            match longest_wait(&network, &flow).result {
                Ok((wait, nodes)) => {
                    if json_out {
                        println!("{}", json::object! { maxWait: wait, nodes: nodes });
                    } else {
                        println!("Longest wait: {wait} at nodes {}", join(&nodes, ", "));
                    }
                }
                Err(e) => fail(&e.to_string()),
            }
            write_dot(&network, &flow, dotfile);
        }
        _ => usage(),
    }
}

fn print_path(
    kind: &str,
    result: Result<(u32, Vec<NodeLabel>), groupflow::types::QueryError>,
    json_out: bool,
) {
    match result {
        Ok((capacity, path)) => {
            if json_out {
                println!(
                    "{}",
                    json::object! { query: kind, capacity: capacity, path: path.clone() }
                );
            } else {
                println!("Capacity {capacity} via {}", join(&path, " -> "));
            }
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn print_flow(result: &FlowResult, json_out: bool) {
    if json_out {
        let paths = result
            .paths
            .iter()
            .map(|path| json::object! { flow: path.bottleneck, nodes: path.nodes.clone() })
            .collect::<Vec<_>>();
        println!("{}", json::object! { maxFlowValue: result.flow, paths: paths });
    } else {
        println!("Total flow: {}", result.flow);
        for path in &result.paths {
            println!("  {} via {}", path.bottleneck, join(&path.nodes, " -> "));
        }
    }
}

fn write_dot(network: &Network, result: &FlowResult, dotfile: Option<String>) {
    if let Some(dotfile) = dotfile {
        File::create(&dotfile)
            .unwrap_or_else(|e| panic!("Error creating \"{dotfile}\": {e}"))
            .write_all(flow_to_dot(network, result).as_bytes())
            .unwrap_or_else(|e| panic!("Error writing \"{dotfile}\": {e}"));
        println!("Wrote dotfile {dotfile}.");
    }
}

fn batch(args: &[String], json_out: bool) {
    if args.len() < 4 {
        usage();
    }
    let dir = Path::new(&args[2]);
    let out = Path::new(&args[3]);
    let group_size = args.get(4).map_or(10, |s| {
        s.parse()
            .unwrap_or_else(|_| panic!("Expected a group size, but got: {s}"))
    });
    let increase = args.get(5).map_or(5, |s| {
        s.parse()
            .unwrap_or_else(|_| panic!("Expected an increase, but got: {s}"))
    });
    let reports = run_all(dir, group_size, increase)
        .unwrap_or_else(|e| panic!("Error running batch over \"{}\": {e}", dir.display()));
    write_report(&reports, out)
        .unwrap_or_else(|e| panic!("Error writing report \"{}\": {e}", out.display()));
    println!("Wrote {} report rows to {}.", reports.len(), out.display());
    if json_out {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).expect("reports are serializable")
        );
    }
}

fn generate(args: &[String]) {
    if args.len() < 3 {
        usage();
    }
    let out = Path::new(&args[2]);
    let params = match args.get(3) {
        Some(path) => read_generation_params(Path::new(path))
            .unwrap_or_else(|e| panic!("Error loading params from \"{path}\": {e}")),
        None => GenerationParams::default(),
    };
    let network = generate_network(&params);
    write_network(&network, out)
        .unwrap_or_else(|e| panic!("Error writing dataset \"{}\": {e}", out.display()));
    println!(
        "Generated {} nodes / {} edges into {}.",
        network.node_count(),
        network.edge_count(),
        out.display()
    );
}

fn fail(message: &str) -> ! {
    println!("Error: {message}");
    exit(1);
}

fn join(labels: &[NodeLabel], separator: &str) -> String {
    labels
        .iter()
        .map(|label| label.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

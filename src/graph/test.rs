#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::graph::{
        critical_path, feasible_flow, max_flow, min_hop_path, widest_path, FlowResult,
        FlowTarget,
    };
    use crate::types::{Network, NodeLabel, QueryError};

    fn network(nodes: u32, edges: &[(u32, u32, u32, u32)]) -> Network {
        let mut network = Network::with_nodes(nodes);
        for &(from, to, capacity, duration) in edges {
            network.add_edge(from, to, capacity, duration);
        }
        network
    }

    /// Two disjoint routes of capacity 3 and 2, with uneven durations.
    fn reference() -> Network {
        network(4, &[(1, 2, 3, 1), (2, 4, 3, 1), (1, 3, 2, 2), (3, 4, 2, 1)])
    }

    /// Same routes, but both take 2 time units end to end.
    fn balanced() -> Network {
        network(4, &[(1, 2, 3, 1), (2, 4, 3, 1), (1, 3, 2, 1), (3, 4, 2, 1)])
    }

    /// Min cut is the two edges into the sink: 8 + 10.
    fn layered() -> Network {
        network(
            4,
            &[
                (1, 2, 10, 1),
                (1, 3, 10, 1),
                (2, 3, 1, 1),
                (2, 4, 8, 1),
                (3, 4, 10, 1),
            ],
        )
    }

    fn path_labels(result: &FlowResult) -> Vec<(u64, Vec<NodeLabel>)> {
        result
            .paths
            .iter()
            .map(|path| (path.bottleneck, path.nodes.clone()))
            .collect()
    }

    /// Sum of bottlenecks per edge across the decomposition never exceeds
    /// that edge's capacity.
    fn assert_decomposition_within_capacities(network: &Network, result: &FlowResult) {
        let mut used: HashMap<(NodeLabel, NodeLabel), u64> = HashMap::new();
        for path in &result.paths {
            for pair in path.nodes.windows(2) {
                *used.entry((pair[0], pair[1])).or_default() += path.bottleneck;
            }
        }
        for ((from, to), amount) in used {
            let edge = network
                .edge(from, to)
                .unwrap_or_else(|| panic!("path uses missing edge {from} -> {to}"));
            assert!(
                amount <= u64::from(edge.capacity),
                "edge {from} -> {to} carries {amount} over capacity {}",
                edge.capacity
            );
        }
    }

    fn simple_paths(
        network: &Network,
        current: NodeLabel,
        sink: NodeLabel,
        visited: &mut Vec<NodeLabel>,
        found: &mut Vec<Vec<NodeLabel>>,
    ) {
        visited.push(current);
        if current == sink {
            found.push(visited.clone());
        } else {
            for edge in network.outgoing(current) {
                if !visited.contains(&edge.to) {
                    simple_paths(network, edge.to, sink, visited, found);
                }
            }
        }
        visited.pop();
    }

    fn bottleneck_of(network: &Network, path: &[NodeLabel]) -> u32 {
        path.windows(2)
            .filter_map(|pair| network.edge(pair[0], pair[1]))
            .map(|edge| edge.capacity)
            .min()
            .unwrap_or(0)
    }

    #[test]
    fn reference_max_flow() {
        let net = reference();
        let result = max_flow(&net, 1, 4).unwrap();
        assert_eq!(result.flow, 5);
        assert_eq!(
            path_labels(&result),
            vec![(3, vec![1, 2, 4]), (2, vec![1, 3, 4])]
        );
        assert_decomposition_within_capacities(&net, &result);
    }

    #[test]
    fn max_flow_equals_min_cut() {
        let net = layered();
        let result = max_flow(&net, 1, 4).unwrap();
        // Hand-computed cut: {1,2,3} | {4} with edges 2->4 (8) and 3->4 (10).
        assert_eq!(result.flow, 18);
        assert_decomposition_within_capacities(&net, &result);
    }

    #[test]
    fn widest_path_is_maximal() {
        let net = layered();
        let (capacity, path) = widest_path(&net, 1, 4).unwrap();
        assert_eq!((capacity, path), (10, vec![1, 3, 4]));

        let mut all = Vec::new();
        simple_paths(&net, 1, 4, &mut Vec::new(), &mut all);
        let best = all
            .iter()
            .map(|path| bottleneck_of(&net, path))
            .max()
            .unwrap();
        assert_eq!(capacity, best);
    }

    #[test]
    fn min_hop_trades_capacity_for_stops() {
        let net = network(3, &[(1, 3, 1, 1), (1, 2, 5, 1), (2, 3, 5, 1)]);
        assert_eq!(min_hop_path(&net, 1, 3), Ok((1, vec![1, 3])));
        assert_eq!(widest_path(&net, 1, 3), Ok((5, vec![1, 2, 3])));
    }

    #[test]
    fn max_flow_is_idempotent() {
        let net = reference();
        let first = max_flow(&net, 1, 4).unwrap();
        let second = max_flow(&net, 1, 4).unwrap();
        assert_eq!(first, second);
        // The residual copy never leaks back into the network.
        assert_eq!(net.edge(1, 2).map(|e| e.capacity), Some(3));
    }

    #[test]
    fn target_flow_stops_early() {
        let net = reference();
        match feasible_flow(&net, 1, 4, 3).unwrap() {
            FlowTarget::Met(result) => {
                assert_eq!(result.flow, 3);
                assert_eq!(result.paths.len(), 1);
            }
            other => panic!("expected Met, got {other:?}"),
        }
        match feasible_flow(&net, 1, 4, 4).unwrap() {
            FlowTarget::Met(result) => assert_eq!(result.flow, 5),
            other => panic!("expected Met, got {other:?}"),
        }
    }

    #[test]
    fn target_beyond_max_flow_is_infeasible() {
        let net = reference();
        let outcome = feasible_flow(&net, 1, 4, 10).unwrap();
        assert!(!outcome.is_met());
        // Exhausting the residual graph terminates with the true maximum.
        assert_eq!(outcome.flow(), 5);
    }

    #[test]
    fn source_equals_sink_is_rejected() {
        let net = reference();
        assert_eq!(
            max_flow(&net, 2, 2).unwrap_err(),
            QueryError::SameSourceAndSink(2)
        );
        assert_eq!(
            feasible_flow(&net, 2, 2, 1).unwrap_err(),
            QueryError::SameSourceAndSink(2)
        );
        assert_eq!(
            widest_path(&net, 2, 2).unwrap_err(),
            QueryError::SameSourceAndSink(2)
        );
        assert_eq!(
            min_hop_path(&net, 2, 2).unwrap_err(),
            QueryError::SameSourceAndSink(2)
        );
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let net = reference();
        assert_eq!(max_flow(&net, 1, 9).unwrap_err(), QueryError::UnknownNode(9));
        assert_eq!(widest_path(&net, 9, 4).unwrap_err(), QueryError::UnknownNode(9));
    }

    #[test]
    fn disconnected_sink_yields_zero_flow() {
        let net = network(3, &[(1, 2, 4, 1)]);
        let result = max_flow(&net, 1, 3).unwrap();
        assert_eq!(result.flow, 0);
        assert!(result.paths.is_empty());
        assert_eq!(
            widest_path(&net, 1, 3).unwrap_err(),
            QueryError::PathNotFound { start: 1, sink: 3 }
        );
        assert_eq!(
            min_hop_path(&net, 1, 3).unwrap_err(),
            QueryError::PathNotFound { start: 1, sink: 3 }
        );
    }

    #[test]
    fn reference_schedule() {
        let net = reference();
        let result = max_flow(&net, 1, 4).unwrap();
        let schedule = critical_path(&result.subgraph(&net)).unwrap();
        // 1->2->4 arrives at 2, 1->3->4 at 3; the whole group meets at 3.
        assert_eq!(schedule.finish_time, 3);
        assert_eq!(schedule.earliest_start.get(&2), Some(&1));
        assert_eq!(schedule.earliest_start.get(&3), Some(&2));
        assert_eq!(schedule.earliest_start.get(&4), Some(&3));
        // The faster subgroup waits one time unit at the sink.
        assert_eq!(schedule.max_wait(), (1, vec![4]));
    }

    #[test]
    fn balanced_schedule_has_no_waits() {
        let net = balanced();
        let result = max_flow(&net, 1, 4).unwrap();
        let schedule = critical_path(&result.subgraph(&net)).unwrap();
        assert_eq!(schedule.finish_time, 2);
        let (wait, nodes) = schedule.max_wait();
        assert_eq!(wait, 0);
        assert_eq!(nodes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn schedule_detects_cycles() {
        let cycle = network(3, &[(1, 2, 1, 1), (2, 3, 1, 1), (3, 1, 1, 1)]);
        assert_eq!(critical_path(&cycle), Err(QueryError::MalformedSchedule));
    }

    #[test]
    fn empty_flow_schedules_trivially() {
        let net = network(3, &[(1, 2, 4, 1)]);
        let subgraph = FlowResult::default().subgraph(&net);
        let schedule = critical_path(&subgraph).unwrap();
        assert_eq!(schedule.finish_time, 0);
        assert_eq!(schedule.max_wait().0, 0);
    }

    #[test]
    fn subgraph_keeps_only_used_edges() {
        let net = layered();
        let result = max_flow(&net, 1, 4).unwrap();
        let sub = result.subgraph(&net);
        assert_eq!(sub.node_count(), net.node_count());
        for edge in sub.edges() {
            assert_eq!(net.edge(edge.from, edge.to), Some(edge));
        }
        // A second pass over the used routes reproduces the same flow.
        assert_eq!(max_flow(&sub, 1, 4).unwrap().flow, result.flow);
    }
}

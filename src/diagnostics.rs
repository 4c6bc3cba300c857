//! Advisory pre-flight checks over a built graph.

use rayon::prelude::*;
use tracing::debug;

use crate::graph::RoutingGraph;

/// Scans every node and returns a human-readable description of each
/// problem found: latitudes outside `[-90, 90]`, longitudes outside
/// `[-180, 180]`, and adjacency entries whose far node lies outside the
/// allocated range.
///
/// Purely advisory: never mutates the graph and never fails, so it can run
/// as a cheap gate before expensive preprocessing is attempted on possibly
/// corrupt input. The scan fans out over nodes with one explorer per
/// worker thread.
pub fn find_problems(graph: &RoutingGraph) -> Vec<String> {
    let nodes = graph.node_count();
    let access = graph.node_access();

    let problems: Vec<String> = (0..nodes)
        .into_par_iter()
        .map_init(
            || graph.create_edge_explorer(),
            |explorer, node| {
                let mut found = Vec::new();
                if let Ok(lat) = access.lat(node) {
                    if !(-90.0..=90.0).contains(&lat) {
                        found.push(format!("node {node} has invalid latitude {lat}"));
                    }
                }
                if let Ok(lon) = access.lon(node) {
                    if !(-180.0..=180.0).contains(&lon) {
                        found.push(format!("node {node} has invalid longitude {lon}"));
                    }
                }
                explorer.set_base_node(node);
                while let Some(view) = explorer.next() {
                    if view.adj >= nodes {
                        found.push(format!(
                            "edge {} at node {node} references missing node {}",
                            view.edge, view.adj
                        ));
                    }
                }
                found
            },
        )
        .flatten()
        .collect();

    debug!(nodes, problems = problems.len(), "diagnostics scan finished");
    problems
}

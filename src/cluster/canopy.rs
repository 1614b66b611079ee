//! Single-pass greedy canopy clustering over viewport distance

use std::collections::{HashMap, HashSet};

use log;
use rayon::prelude::*;

use crate::cluster::{Cluster, ClusterIds, NodeOrdering};
use crate::graph::{Graph, NodeAttributes, Position};
use crate::projection::Projector;
use crate::scale::SizeScale;

/// Display color kept by singleton clusters
pub const SINGLETON_COLOR: &str = "#999";

/// Display color marking multi-node clusters
pub const CLUSTER_COLOR: &str = "red";

/// Passes with at least this many clusters aggregate attributes in parallel
const PARALLEL_THRESHOLD: usize = 1000;

/// Result of one clustering pass
#[derive(Debug)]
pub struct CanopyOutcome {
    /// The coarsened graph
    pub graph: Graph,

    /// Every input node id mapped to the cluster name that absorbed it.
    /// Valid only for this pass; never carried across passes.
    pub assignments: HashMap<String, String>,
}

/// Partition a graph into proximity clusters and emit the coarsened graph.
///
/// A single greedy pass: each unvisited node seeds a cluster and absorbs its
/// still-unvisited neighbors whose projected positions lie within `radius`
/// viewport units of the seed's. Neighbors already claimed by an earlier
/// cluster are skipped, so the partition depends on the enumeration order,
/// which is why `ordering` is an explicit parameter. A radius of zero or
/// less performs no merging at all: every node becomes its own singleton.
///
/// The input graph is never mutated. Cluster names for merged groups come
/// from the caller-owned `ids` allocator, so names stay unique across every
/// pass that shares it.
pub fn cluster<P: Projector>(
    input: &Graph,
    radius: f64,
    projector: &P,
    scale: &SizeScale,
    ordering: NodeOrdering,
    ids: &mut ClusterIds,
) -> CanopyOutcome {
    let clusters = collect_clusters(input, radius, projector, ordering, ids);

    // Record every member's community before touching edges
    let mut assignments: HashMap<String, String> = HashMap::with_capacity(input.node_count());
    for cluster in &clusters {
        for member in &cluster.members {
            assignments.insert(member.clone(), cluster.name.clone());
        }
    }

    let mut output = Graph::with_capacity(clusters.len(), input.edge_count());

    // Aggregate attributes per cluster; parallel only when the pass is large
    let aggregated: Vec<(String, NodeAttributes)> = if clusters.len() < PARALLEL_THRESHOLD {
        clusters
            .iter()
            .map(|c| (c.name.clone(), aggregate_attributes(input, c, scale)))
            .collect()
    } else {
        clusters
            .par_iter()
            .map(|c| (c.name.clone(), aggregate_attributes(input, c, scale)))
            .collect()
    };

    for (name, attributes) in aggregated {
        output.insert_node(&name, attributes);
    }

    // Rewire edges: each input edge is considered exactly once. Endpoints
    // map through the assignments; an unmapped endpoint stands as its own
    // community. Edges whose endpoints landed in the same cluster carry
    // structure internal to a single coarse node and are dropped.
    let mut dropped = 0usize;
    for (source, target, weight) in input.edges() {
        let sc = assignments.get(source).map(String::as_str).unwrap_or(source);
        let tc = assignments.get(target).map(String::as_str).unwrap_or(target);

        if sc == tc {
            dropped += 1;
            continue;
        }

        output.upsert_edge(sc, tc, weight);
    }

    let singletons = clusters.iter().filter(|c| c.singleton).count();
    log::debug!(
        "canopy pass at radius {}: {} nodes -> {} clusters ({} singletons), {} intra-cluster edges dropped",
        radius,
        input.node_count(),
        clusters.len(),
        singletons,
        dropped
    );

    CanopyOutcome {
        graph: output,
        assignments,
    }
}

/// Greedy seed-and-absorb sweep producing the pass's transient clusters
fn collect_clusters<P: Projector>(
    input: &Graph,
    radius: f64,
    projector: &P,
    ordering: NodeOrdering,
    ids: &mut ClusterIds,
) -> Vec<Cluster> {
    let order: Vec<&str> = match ordering {
        NodeOrdering::Insertion => input.node_ids().collect(),
        NodeOrdering::ById => {
            let mut sorted: Vec<&str> = input.node_ids().collect();
            sorted.sort_unstable();
            sorted
        }
    };

    // Non-positive (or NaN) radius means no merging is possible, not an error
    let merging = radius > 0.0;

    let mut visited: HashSet<&str> = HashSet::with_capacity(input.node_count());
    let mut clusters = Vec::new();

    for id in order {
        if visited.contains(id) {
            continue;
        }
        visited.insert(id);

        let mut members = vec![id.to_string()];

        if merging {
            if let Some(seed) = input.node(id) {
                let seed_screen = projector.project(seed.position);

                for neighbor in input.neighbors(id) {
                    if visited.contains(neighbor.as_str()) {
                        continue;
                    }
                    let Some(attributes) = input.node(neighbor) else {
                        continue;
                    };

                    let screen = projector.project(attributes.position);
                    if seed_screen.distance_to(screen) <= radius {
                        members.push(neighbor.clone());
                        visited.insert(neighbor);
                    }
                }
            }
        }

        let singleton = members.len() == 1;
        let name = if singleton {
            id.to_string()
        } else {
            ids.allocate()
        };

        clusters.push(Cluster {
            name,
            members,
            singleton,
        });
    }

    clusters
}

/// Compute the aggregate attributes for one cluster
fn aggregate_attributes(input: &Graph, cluster: &Cluster, scale: &SizeScale) -> NodeAttributes {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut mass = 0.0;
    let mut count = 0usize;

    for member in &cluster.members {
        if let Some(attributes) = input.node(member) {
            x += attributes.position.x;
            y += attributes.position.y;
            mass += attributes.original_size;
            count += 1;
        }
    }

    // Unweighted barycenter; member sizes do not bias the position
    let count = count.max(1) as f64;
    let color = if cluster.singleton {
        SINGLETON_COLOR
    } else {
        CLUSTER_COLOR
    };

    NodeAttributes {
        position: Position {
            x: x / count,
            y: y / count,
        },
        size: scale.apply(mass),
        original_size: mass,
        color: color.to_string(),
        label: Some(cluster.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::IdentityProjection;

    fn node(x: f64, size: f64) -> NodeAttributes {
        NodeAttributes {
            position: Position { x, y: 0.0 },
            size,
            original_size: size,
            color: "#999".to_string(),
            label: None,
        }
    }

    /// Path graph a - b - c - d with unit weights; a and b sit 10 apart,
    /// the rest far beyond any test radius.
    fn path_graph() -> Graph {
        let mut graph = Graph::new();
        graph.insert_node("a", node(0.0, 1.0));
        graph.insert_node("b", node(10.0, 2.0));
        graph.insert_node("c", node(100.0, 3.0));
        graph.insert_node("d", node(200.0, 4.0));
        graph.upsert_edge("a", "b", 1.0);
        graph.upsert_edge("b", "c", 1.0);
        graph.upsert_edge("c", "d", 1.0);
        graph
    }

    fn unit_scale() -> SizeScale {
        SizeScale::fit((0.0, 1.0), (0.0, 1.0))
    }

    fn run(graph: &Graph, radius: f64) -> CanopyOutcome {
        let mut ids = ClusterIds::new();
        cluster(
            graph,
            radius,
            &IdentityProjection,
            &unit_scale(),
            NodeOrdering::ById,
            &mut ids,
        )
    }

    #[test]
    fn merges_close_neighbors_and_rewires_edges() {
        let input = path_graph();
        let outcome = run(&input, 15.0);

        let mut names: Vec<_> = outcome.graph.node_ids().collect();
        names.sort_unstable();
        assert_eq!(names, ["c", "cluster_0", "d"]);

        // a-b became internal; b-c and c-d carry their weight across
        assert_eq!(outcome.graph.edge_weight("cluster_0", "c"), Some(1.0));
        assert_eq!(outcome.graph.edge_weight("c", "d"), Some(1.0));
        assert_eq!(outcome.graph.edge_count(), 2);

        assert_eq!(outcome.assignments["a"], "cluster_0");
        assert_eq!(outcome.assignments["b"], "cluster_0");
        assert_eq!(outcome.assignments["c"], "c");
    }

    #[test]
    fn conserves_total_original_size() {
        let input = path_graph();
        let outcome = run(&input, 15.0);

        let diff = (outcome.graph.total_original_size() - input.total_original_size()).abs();
        assert!(diff < 1e-9);

        // The merged node carries the summed mass of its members
        assert_eq!(outcome.graph.node("cluster_0").unwrap().original_size, 3.0);
    }

    #[test]
    fn merged_cluster_sits_at_the_member_barycenter() {
        let input = path_graph();
        let outcome = run(&input, 15.0);

        let merged = outcome.graph.node("cluster_0").unwrap();
        assert_eq!(merged.position, Position { x: 5.0, y: 0.0 });
        assert_eq!(merged.color, CLUSTER_COLOR);
        assert_eq!(merged.label.as_deref(), Some("cluster_0"));
    }

    #[test]
    fn zero_radius_never_merges_even_colocated_nodes() {
        let mut input = Graph::new();
        input.insert_node("a", node(0.0, 1.0));
        input.insert_node("b", node(0.0, 1.0));
        input.upsert_edge("a", "b", 1.0);

        let outcome = run(&input, 0.0);

        assert_eq!(outcome.graph.node_count(), 2);
        assert_eq!(outcome.assignments["a"], "a");
        assert_eq!(outcome.assignments["b"], "b");
        assert_eq!(outcome.graph.edge_weight("a", "b"), Some(1.0));
    }

    #[test]
    fn preserves_isolated_nodes_as_singletons() {
        let mut input = Graph::new();
        input.insert_node("lone", node(42.0, 7.0));

        let outcome = run(&input, 50.0);

        let kept = outcome.graph.node("lone").unwrap();
        assert_eq!(outcome.graph.node_count(), 1);
        assert_eq!(kept.position, Position { x: 42.0, y: 0.0 });
        assert_eq!(kept.original_size, 7.0);
        assert_eq!(kept.color, SINGLETON_COLOR);
    }

    #[test]
    fn visited_neighbors_are_not_reclaimed() {
        // a absorbs b; c's only neighbor (b) is already claimed, so c stays
        // a singleton rather than joining or forming a pair.
        let mut input = Graph::new();
        input.insert_node("a", node(0.0, 1.0));
        input.insert_node("b", node(1.0, 1.0));
        input.insert_node("c", node(2.0, 1.0));
        input.upsert_edge("a", "b", 1.0);
        input.upsert_edge("b", "c", 1.0);

        let outcome = run(&input, 1000.0);

        assert_eq!(outcome.assignments["a"], "cluster_0");
        assert_eq!(outcome.assignments["b"], "cluster_0");
        assert_eq!(outcome.assignments["c"], "c");
        assert_eq!(outcome.graph.edge_weight("cluster_0", "c"), Some(1.0));
    }

    #[test]
    fn output_has_no_self_loops() {
        let input = path_graph();
        let outcome = run(&input, 15.0);

        for (source, target, _) in outcome.graph.edges() {
            assert_ne!(source, target);
        }
    }

    #[test]
    fn rerun_on_same_input_is_identical() {
        let input = path_graph();

        let first = run(&input, 15.0);
        let second = run(&input, 15.0);

        assert_eq!(first.assignments, second.assignments);
        let first_edges: Vec<_> = first.graph.edges().collect();
        let second_edges: Vec<_> = second.graph.edges().collect();
        assert_eq!(first_edges, second_edges);

        let mut first_nodes: Vec<_> = first.graph.node_ids().collect();
        let mut second_nodes: Vec<_> = second.graph.node_ids().collect();
        first_nodes.sort_unstable();
        second_nodes.sort_unstable();
        assert_eq!(first_nodes, second_nodes);
    }

    #[test]
    fn shared_allocator_keeps_names_unique_across_passes() {
        let input = path_graph();
        let mut ids = ClusterIds::new();
        let scale = unit_scale();

        let first = cluster(
            &input,
            15.0,
            &IdentityProjection,
            &scale,
            NodeOrdering::ById,
            &mut ids,
        );
        // Second pass over the coarsened graph merges cluster_0 with c
        let second = cluster(
            &first.graph,
            120.0,
            &IdentityProjection,
            &scale,
            NodeOrdering::ById,
            &mut ids,
        );

        assert!(second.graph.contains_node("cluster_1"));
        assert!(!second.graph.contains_node("cluster_0"));
    }
}

//! Preference-based merge of cluster orders
//!
//! Clusters share no constraints, so their relative placement is decided
//! only by the scheduling preference of each cluster's open boundaries.

use super::cluster::Cluster;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::NodeId;
use std::fmt::Debug;

/// Concatenate cluster orders by bucket priority.
///
/// Buckets run `EarlyEarly, EarlyLate, LateEarly, LateLate`; clusters in
/// the same bucket keep their discovery order. Every cluster is checked
/// for cycles before any order is produced.
pub fn merge_clusters<H: Debug>(clusters: &[Cluster<'_, H>]) -> Result<Vec<NodeId>, OrderingError> {
    if let Some(cyclic) = clusters.iter().find(|c| c.has_cycle()) {
        return Err(cyclic.cycle_error());
    }

    let mut ranked = clusters
        .iter()
        .map(|cluster| Ok((cluster.bucket()?, cluster)))
        .collect::<Result<Vec<_>, OrderingError>>()?;
    // Stable sort keeps discovery order inside a bucket
    ranked.sort_by_key(|(bucket, _)| *bucket);

    let mut order = Vec::with_capacity(clusters.iter().map(Cluster::len).sum());
    for (_, cluster) in ranked {
        order.extend_from_slice(cluster.execution_order()?);
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NodeGraph;
    use crate::domain::value_objects::SchedulingPreference;

    fn make_graph(names: &[&'static str], edges: &[(usize, usize)]) -> NodeGraph<&'static str> {
        let mut graph = NodeGraph::new();
        for name in names {
            graph.add_node(*name);
        }
        for &(from, to) in edges {
            graph.before(from, to);
        }
        graph
    }

    fn merged(graph: &NodeGraph<&'static str>) -> Result<Vec<&'static str>, OrderingError> {
        let clusters = Cluster::discover(graph);
        let order = merge_clusters(&clusters)?;
        Ok(order.iter().map(|&id| *graph.handler(id)).collect())
    }

    #[test]
    fn test_merge_all_late_keeps_discovery_order() {
        let graph = make_graph(&["a", "b", "c"], &[]);
        assert_eq!(merged(&graph).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_early_cluster_moves_to_front() {
        // (a -> b) late, (c -> d) early
        let mut graph = make_graph(&["a", "b", "c", "d"], &[(0, 1), (2, 3)]);
        graph.set_preference(2, SchedulingPreference::Early);
        graph.set_preference(3, SchedulingPreference::Early);

        assert_eq!(merged(&graph).unwrap(), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_merge_bucket_priority() {
        // Four clusters `x_c after x_a, x_b`: entry is x_a, exit is x_b.
        // Inserted in reverse priority.
        let mut graph = make_graph(
            &[
                "ll_a", "ll_b", "ll_c", "le_a", "le_b", "le_c", "el_a", "el_b", "el_c", "ee_a",
                "ee_b", "ee_c",
            ],
            &[],
        );
        for base in [0, 3, 6, 9] {
            graph.after(base + 2, base);
            graph.after(base + 2, base + 1);
        }
        for id in [4, 6, 9, 10] {
            graph.set_preference(id, SchedulingPreference::Early);
        }

        assert_eq!(
            merged(&graph).unwrap(),
            vec![
                "ee_a", "ee_b", "ee_c", "el_a", "el_b", "el_c", "le_a", "le_b", "le_c", "ll_a",
                "ll_b", "ll_c",
            ]
        );
    }

    #[test]
    fn test_merge_rejects_cycle_before_ordering() {
        let graph = make_graph(&["a", "b", "c"], &[(0, 1), (1, 0)]);
        assert!(matches!(
            merged(&graph),
            Err(OrderingError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_merge_empty() {
        let graph = make_graph(&[], &[]);
        assert!(merged(&graph).unwrap().is_empty());
    }
}

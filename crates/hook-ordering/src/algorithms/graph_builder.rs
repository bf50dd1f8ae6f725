//! Node Graph Builder
//!
//! Builds the node arena from a handler list and a metadata source.

use crate::config::OrderingConfig;
use crate::domain::entities::NodeGraph;
use crate::ports::outbound::HandlerMetadata;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, warn};

/// Build a node graph for `handlers`.
///
/// One node per handler (insertion order), then for each handler its
/// declared before/after targets are resolved and wired. Targets outside
/// the handler list are skipped.
pub fn build_node_graph<H, M>(handlers: Vec<H>, metadata: &M, config: &OrderingConfig) -> NodeGraph<H>
where
    H: Clone + Eq + Hash + Debug,
    M: HandlerMetadata<H> + ?Sized,
{
    let mut graph = NodeGraph::new();
    let ids: Vec<_> = handlers.into_iter().map(|h| graph.add_node(h)).collect();

    for id in ids {
        let handler = graph.handler(id).clone();

        for target in metadata.runs_before(&handler) {
            match graph.node_id(&target) {
                Some(other) => graph.before(id, other),
                None => report_unknown_target(config, &handler, "before", &target),
            }
        }

        for target in metadata.runs_after(&handler) {
            match graph.node_id(&target) {
                Some(other) => graph.after(id, other),
                None => report_unknown_target(config, &handler, "after", &target),
            }
        }

        let preference = metadata
            .scheduling_preference(&handler)
            .unwrap_or(config.default_preference);
        graph.set_preference(id, preference);
    }

    debug!(
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        "Built handler node graph"
    );

    graph
}

fn report_unknown_target<H: Debug>(config: &OrderingConfig, handler: &H, relation: &str, target: &H) {
    if config.warn_unknown_targets {
        warn!(?handler, ?target, relation, "Ignoring constraint on handler outside the set");
    } else {
        debug!(?handler, ?target, relation, "Ignoring constraint on handler outside the set");
    }
}

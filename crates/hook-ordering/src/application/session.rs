//! Ordering session
//!
//! A `HandlerSet` accumulates handlers, lazily builds the node graph from
//! its metadata source on the first query, and caches it until the next
//! `add`.

use crate::algorithms::{build_node_graph, merge_clusters, Cluster};
use crate::config::OrderingConfig;
use crate::domain::entities::NodeGraph;
use crate::domain::errors::OrderingError;
use crate::domain::invariants::{invariant_completeness, invariant_respects_constraints};
use crate::ports::inbound::ExecutionOrderApi;
use crate::ports::outbound::HandlerMetadata;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, warn};

/// Session state: pending handlers, or the graph built from them
#[derive(Debug)]
enum SessionState<H> {
    Dirty(Vec<H>),
    Built(NodeGraph<H>),
}

/// Mutable, user-facing collection of handlers for one hook point
pub struct HandlerSet<H, M> {
    metadata: M,
    config: OrderingConfig,
    state: SessionState<H>,
}

impl<H, M> HandlerSet<H, M>
where
    H: Clone + Eq + Hash + Debug,
    M: HandlerMetadata<H>,
{
    /// Create an empty session with default config
    pub fn new(metadata: M) -> Self {
        Self::with_config(metadata, OrderingConfig::default())
    }

    /// Create an empty session with custom config
    pub fn with_config(metadata: M, config: OrderingConfig) -> Self {
        Self {
            metadata,
            config,
            state: SessionState::Dirty(Vec::new()),
        }
    }

    /// Add a handler; a known handler is ignored and keeps the cached graph.
    pub fn add(&mut self, handler: H) -> bool {
        if self.contains(&handler) {
            return false;
        }
        let mut handlers = match std::mem::replace(&mut self.state, SessionState::Dirty(Vec::new())) {
            SessionState::Dirty(handlers) => handlers,
            SessionState::Built(graph) => graph.into_handlers(),
        };
        handlers.push(handler);
        self.state = SessionState::Dirty(handlers);
        true
    }

    pub fn contains(&self, handler: &H) -> bool {
        match &self.state {
            SessionState::Dirty(handlers) => handlers.contains(handler),
            SessionState::Built(graph) => graph.node_id(handler).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.state {
            SessionState::Dirty(handlers) => handlers.len(),
            SessionState::Built(graph) => graph.node_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once the graph is built and cached
    pub fn is_built(&self) -> bool {
        matches!(self.state, SessionState::Built(_))
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Node graph for the current handlers, rebuilt if handlers were added
    pub fn graph(&mut self) -> &NodeGraph<H> {
        if let SessionState::Dirty(handlers) = &mut self.state {
            let graph = build_node_graph(std::mem::take(handlers), &self.metadata, &self.config);
            self.state = SessionState::Built(graph);
        }
        match &self.state {
            SessionState::Built(graph) => graph,
            SessionState::Dirty(_) => unreachable!("dirty session is rebuilt above"),
        }
    }

    /// Order every handler so that all declared constraints hold.
    ///
    /// 1. Build (or reuse) the node graph
    /// 2. Discover clusters
    /// 3. Reject any cyclic cluster
    /// 4. Merge cluster orders by scheduling preference
    pub fn execution_list(&mut self) -> Result<Vec<H>, OrderingError> {
        let graph = self.graph();
        let clusters = Cluster::discover(graph);

        let order = merge_clusters(&clusters).inspect_err(|err| {
            warn!(error = %err, "Handler constraints are contradictory");
        })?;

        debug_assert!(invariant_completeness(&order, graph));
        debug_assert!(invariant_respects_constraints(&order, graph));

        debug!(
            handler_count = order.len(),
            cluster_count = clusters.len(),
            "Computed handler execution order"
        );

        Ok(order.iter().map(|&id| graph.handler(id).clone()).collect())
    }

    /// Check for contradictory constraints without materializing an order
    pub fn has_cycle(&mut self) -> bool {
        Cluster::discover(self.graph()).iter().any(Cluster::has_cycle)
    }
}

impl<H, M> ExecutionOrderApi<H> for HandlerSet<H, M>
where
    H: Clone + Eq + Hash + Debug,
    M: HandlerMetadata<H>,
{
    fn add(&mut self, handler: H) -> bool {
        HandlerSet::add(self, handler)
    }

    fn execution_list(&mut self) -> Result<Vec<H>, OrderingError> {
        HandlerSet::execution_list(self)
    }

    fn has_cycle(&mut self) -> bool {
        HandlerSet::has_cycle(self)
    }
}

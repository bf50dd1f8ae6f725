//! Cluster (connected component) of handler nodes
//!
//! A cluster is a maximal set of nodes connected through the implicit
//! before/after relation, taken as undirected. No constraint crosses two
//! clusters, so each one is ordered on its own and the results are merged
//! by scheduling preference.

use crate::domain::entities::NodeGraph;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{ClusterBucket, NodeId};
use std::cell::OnceCell;
use std::collections::{BTreeSet, VecDeque};
use std::fmt::Debug;

/// Connected component over a borrowed node graph
#[derive(Debug)]
pub struct Cluster<'g, H> {
    graph: &'g NodeGraph<H>,
    /// Member node ids
    members: BTreeSet<NodeId>,
    /// Fewest implicit predecessors
    first: NodeId,
    /// Fewest implicit successors
    last: NodeId,
    /// Cached intra-cluster order
    order: OnceCell<Vec<NodeId>>,
}

impl<'g, H> Cluster<'g, H> {
    /// Partition every node of `graph` into clusters.
    ///
    /// Clusters are returned in order of their lowest member id.
    pub fn discover(graph: &'g NodeGraph<H>) -> Vec<Cluster<'g, H>> {
        let mut visited = vec![false; graph.node_count()];
        let mut clusters = Vec::new();

        for seed in 0..graph.node_count() {
            if visited[seed] {
                continue;
            }

            let mut members = BTreeSet::new();
            let mut queue = VecDeque::from([seed]);
            visited[seed] = true;

            while let Some(id) = queue.pop_front() {
                members.insert(id);
                let node = &graph.nodes()[id];
                for &next in node.implicit_before().iter().chain(node.implicit_after()) {
                    if !visited[next] {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }

            clusters.push(Cluster::new(graph, seed, members));
        }

        clusters
    }

    fn new(graph: &'g NodeGraph<H>, seed: NodeId, members: BTreeSet<NodeId>) -> Self {
        let nodes = graph.nodes();
        let pick = |key: &dyn Fn(NodeId) -> usize| {
            members
                .iter()
                .copied()
                .fold(seed, |best, id| if (key(id), id) < (key(best), best) { id } else { best })
        };
        let first = pick(&|id| nodes[id].implicit_before().len());
        let last = pick(&|id| nodes[id].implicit_after().len());

        Self {
            graph,
            members,
            first,
            last,
            order: OnceCell::new(),
        }
    }

    pub fn members(&self) -> &BTreeSet<NodeId> {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True if any two members must each run after the other
    pub fn has_cycle(&self) -> bool {
        let nodes = self.graph.nodes();
        self.members.iter().any(|&source| {
            nodes[source]
                .implicit_after()
                .iter()
                .any(|&target| nodes[target].implicit_after().contains(&source))
        })
    }

    /// Seed of the execution order: fewest implicit predecessors, lowest id on ties
    pub fn first_node(&self) -> NodeId {
        self.first
    }

    /// Fewest implicit successors, lowest id on ties
    pub fn last_node(&self) -> NodeId {
        self.last
    }
}

impl<'g, H: Debug> Cluster<'g, H> {
    /// Intra-cluster execution order, computed once.
    ///
    /// Layered topological sort seeded by `first_node()`: each pass places
    /// every remaining member whose direct predecessors are all placed,
    /// in ascending id order.
    pub fn execution_order(&self) -> Result<&[NodeId], OrderingError> {
        if let Some(order) = self.order.get() {
            return Ok(order);
        }
        if self.has_cycle() {
            return Err(self.cycle_error());
        }
        let order = self.compute_order()?;
        Ok(self.order.get_or_init(|| order))
    }

    /// First node in the order that declares no "runs before" constraint
    pub fn earliest_unconstrained_node(&self) -> Result<NodeId, OrderingError> {
        let order = self.execution_order()?;
        let nodes = self.graph.nodes();
        Ok(order
            .iter()
            .copied()
            .find(|&id| nodes[id].explicit_before().is_empty())
            .unwrap_or(order[0]))
    }

    /// Last node in the order that declares no "runs after" constraint
    pub fn last_unconstrained_node(&self) -> Result<NodeId, OrderingError> {
        let order = self.execution_order()?;
        let nodes = self.graph.nodes();
        Ok(order
            .iter()
            .rev()
            .copied()
            .find(|&id| nodes[id].explicit_after().is_empty())
            .unwrap_or(order[order.len() - 1]))
    }

    /// Merge bucket from the preferences of the open entry and exit nodes
    pub fn bucket(&self) -> Result<ClusterBucket, OrderingError> {
        let nodes = self.graph.nodes();
        let entry = self.earliest_unconstrained_node()?;
        let exit = self.last_unconstrained_node()?;
        Ok(ClusterBucket::classify(
            nodes[entry].preference(),
            nodes[exit].preference(),
        ))
    }

    /// Error naming every member that lies on a cycle
    pub fn cycle_error(&self) -> OrderingError {
        let nodes = self.graph.nodes();
        let handlers = self
            .members
            .iter()
            .filter(|&&id| nodes[id].is_on_cycle())
            .map(|&id| format!("{:?}", nodes[id].handler()))
            .collect();
        OrderingError::CycleDetected { handlers }
    }

    fn compute_order(&self) -> Result<Vec<NodeId>, OrderingError> {
        let nodes = self.graph.nodes();
        let mut placed = BTreeSet::from([self.first]);
        let mut order = vec![self.first];
        let mut remaining: Vec<NodeId> = self
            .members
            .iter()
            .copied()
            .filter(|&id| id != self.first)
            .collect();

        while !remaining.is_empty() {
            let ready: Vec<NodeId> = remaining
                .iter()
                .copied()
                .filter(|&id| nodes[id].single_step_before().is_subset(&placed))
                .collect();

            // A pass without progress means the members wait on each other
            if ready.is_empty() {
                return Err(self.cycle_error());
            }

            placed.extend(ready.iter().copied());
            order.extend(ready);
            remaining.retain(|id| !placed.contains(id));
        }

        Ok(order)
    }
}

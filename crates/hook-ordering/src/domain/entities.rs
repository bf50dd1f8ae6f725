//! Core entities for Hook Ordering
//!
//! Nodes live in a single arena (`NodeGraph`) and refer to each other only
//! by `NodeId`, so the bidirectional before/after bookkeeping needs no
//! shared ownership.

use super::value_objects::{NodeId, SchedulingPreference};
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Relationship state for one handler
#[derive(Debug, Clone)]
pub struct Node<H> {
    /// Arena index (insertion order)
    id: NodeId,
    /// Wrapped handler
    handler: H,
    /// Nodes this handler declared it runs before
    explicit_before: BTreeSet<NodeId>,
    /// Nodes this handler declared it runs after
    explicit_after: BTreeSet<NodeId>,
    /// Direct predecessors, from either side's declaration
    single_step_before: BTreeSet<NodeId>,
    /// Direct successors, from either side's declaration
    single_step_after: BTreeSet<NodeId>,
    /// Every node that must run before this one (transitive)
    implicit_before: BTreeSet<NodeId>,
    /// Every node that must run after this one (transitive)
    implicit_after: BTreeSet<NodeId>,
    preference: SchedulingPreference,
}

impl<H> Node<H> {
    fn new(id: NodeId, handler: H) -> Self {
        Self {
            id,
            handler,
            explicit_before: BTreeSet::new(),
            explicit_after: BTreeSet::new(),
            single_step_before: BTreeSet::new(),
            single_step_after: BTreeSet::new(),
            implicit_before: BTreeSet::new(),
            implicit_after: BTreeSet::new(),
            preference: SchedulingPreference::default(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn explicit_before(&self) -> &BTreeSet<NodeId> {
        &self.explicit_before
    }

    pub fn explicit_after(&self) -> &BTreeSet<NodeId> {
        &self.explicit_after
    }

    pub fn single_step_before(&self) -> &BTreeSet<NodeId> {
        &self.single_step_before
    }

    pub fn single_step_after(&self) -> &BTreeSet<NodeId> {
        &self.single_step_after
    }

    pub fn implicit_before(&self) -> &BTreeSet<NodeId> {
        &self.implicit_before
    }

    pub fn implicit_after(&self) -> &BTreeSet<NodeId> {
        &self.implicit_after
    }

    pub fn preference(&self) -> SchedulingPreference {
        self.preference
    }

    /// True if the node can reach itself through the implicit relation
    pub fn is_on_cycle(&self) -> bool {
        self.implicit_after.contains(&self.id)
    }
}

/// Arena of nodes for one ordering session
#[derive(Debug, Clone)]
pub struct NodeGraph<H> {
    /// All nodes by id
    nodes: Vec<Node<H>>,
    /// Handler -> node id
    index: HashMap<H, NodeId>,
}

impl<H> NodeGraph<H>
where
    H: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a handler node. Adding a known handler returns its existing id.
    pub fn add_node(&mut self, handler: H) -> NodeId {
        if let Some(&id) = self.index.get(&handler) {
            return id;
        }
        let id = self.nodes.len();
        self.index.insert(handler.clone(), id);
        self.nodes.push(Node::new(id, handler));
        id
    }

    /// Look up the node wrapping `handler`
    pub fn node_id(&self, handler: &H) -> Option<NodeId> {
        self.index.get(handler).copied()
    }

    /// Hand the handlers back in insertion order
    pub fn into_handlers(self) -> Vec<H> {
        self.nodes.into_iter().map(|n| n.handler).collect()
    }
}

impl<H> NodeGraph<H> {
    pub fn node(&self, id: NodeId) -> Option<&Node<H>> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[Node<H>] {
        &self.nodes
    }

    pub fn handler(&self, id: NodeId) -> &H {
        &self.nodes[id].handler
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct single-step edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.single_step_after.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_preference(&mut self, id: NodeId, preference: SchedulingPreference) {
        self.nodes[id].preference = preference;
    }

    /// Record that `node` must execute before `other`.
    ///
    /// # Panics
    ///
    /// Panics if either id is not part of this graph.
    pub fn before(&mut self, node: NodeId, other: NodeId) {
        self.nodes[node].explicit_before.insert(other);
        self.link(node, other);
    }

    /// Record that `node` must execute after `other`.
    ///
    /// # Panics
    ///
    /// Panics if either id is not part of this graph.
    pub fn after(&mut self, node: NodeId, other: NodeId) {
        self.nodes[node].explicit_after.insert(other);
        self.link(other, node);
    }

    /// Insert the single-step edge `from -> to` and extend the closure.
    ///
    /// With the closure already transitive, the only new pairs are
    /// `({from} ∪ implicit_before(from)) × ({to} ∪ implicit_after(to))`.
    fn link(&mut self, from: NodeId, to: NodeId) {
        let is_new = self.nodes[from].single_step_after.insert(to);
        self.nodes[to].single_step_before.insert(from);
        if !is_new {
            return;
        }

        let predecessors: Vec<NodeId> = std::iter::once(from)
            .chain(self.nodes[from].implicit_before.iter().copied())
            .collect();
        let successors: Vec<NodeId> = std::iter::once(to)
            .chain(self.nodes[to].implicit_after.iter().copied())
            .collect();

        for &p in &predecessors {
            for &s in &successors {
                if self.nodes[p].implicit_after.insert(s) {
                    self.nodes[s].implicit_before.insert(p);
                }
            }
        }
    }
}

impl<H> Default for NodeGraph<H>
where
    H: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

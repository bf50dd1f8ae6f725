//! Domain invariants for Hook Ordering

use super::entities::NodeGraph;
use super::value_objects::NodeId;
use std::collections::HashMap;

/// INVARIANT-1: Constraint Order
/// Every single-step edge `A -> B` has `A` strictly earlier than `B`.
pub fn invariant_respects_constraints<H>(order: &[NodeId], graph: &NodeGraph<H>) -> bool {
    let position: HashMap<NodeId, usize> = order
        .iter()
        .enumerate()
        .map(|(pos, &id)| (id, pos))
        .collect();

    for node in graph.nodes() {
        let Some(&from) = position.get(&node.id()) else {
            return false;
        };
        for successor in node.single_step_after() {
            match position.get(successor) {
                Some(&to) if from < to => {}
                _ => return false,
            }
        }
    }

    true
}

/// INVARIANT-2: Completeness
/// Every node appears exactly once.
pub fn invariant_completeness<H>(order: &[NodeId], graph: &NodeGraph<H>) -> bool {
    if order.len() != graph.node_count() {
        return false;
    }
    let mut seen = vec![false; graph.node_count()];
    for &id in order {
        match seen.get_mut(id) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// INVARIANT-3: Closure Symmetry
/// `B ∈ A.implicit_after ⇔ A ∈ B.implicit_before`.
pub fn invariant_closure_symmetry<H>(graph: &NodeGraph<H>) -> bool {
    graph.nodes().iter().all(|node| {
        let forward = node.implicit_after().iter().all(|&succ| {
            graph
                .node(succ)
                .is_some_and(|s| s.implicit_before().contains(&node.id()))
        });
        let backward = node.implicit_before().iter().all(|&pred| {
            graph
                .node(pred)
                .is_some_and(|p| p.implicit_after().contains(&node.id()))
        });
        forward && backward
    })
}

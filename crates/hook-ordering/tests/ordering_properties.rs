//! # Property Tests for Hook Ordering
//!
//! Random constraint sets over integer handlers.
//!
//! 1. **Validity** - every declared edge is respected
//! 2. **Completeness** - every handler appears exactly once
//! 3. **Cycle Detection** - any closed chain is reported
//! 4. **Idempotence** - duplicate declarations change nothing
//! 5. **Closure Symmetry** - dual implicit bookkeeping holds

use hook_ordering::domain::invariants::invariant_closure_symmetry;
use hook_ordering::{HandlerMetadata, HandlerSet, NodeGraph, OrderingError, SchedulingPreference};
use proptest::prelude::*;

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Metadata over `usize` handlers: `(from, to)` means `from` before `to`.
/// Odd edges are declared from the target side as "after".
#[derive(Clone, Debug)]
struct EdgeList {
    edges: Vec<(usize, usize)>,
    early: Vec<usize>,
}

impl HandlerMetadata<usize> for EdgeList {
    fn runs_before(&self, handler: &usize) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(i, (from, _))| i % 2 == 0 && from == handler)
            .map(|(_, (_, to))| *to)
            .collect()
    }

    fn runs_after(&self, handler: &usize) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(i, (_, to))| i % 2 == 1 && to == handler)
            .map(|(_, (from, _))| *from)
            .collect()
    }

    fn scheduling_preference(&self, handler: &usize) -> Option<SchedulingPreference> {
        self.early
            .contains(handler)
            .then_some(SchedulingPreference::Early)
    }
}

/// Declares every constraint of the inner list twice
#[derive(Clone, Debug)]
struct Doubled(EdgeList);

impl HandlerMetadata<usize> for Doubled {
    fn runs_before(&self, handler: &usize) -> Vec<usize> {
        let targets = self.0.runs_before(handler);
        targets.iter().chain(&targets).copied().collect()
    }

    fn runs_after(&self, handler: &usize) -> Vec<usize> {
        let targets = self.0.runs_after(handler);
        targets.iter().chain(&targets).copied().collect()
    }

    fn scheduling_preference(&self, handler: &usize) -> Option<SchedulingPreference> {
        self.0.scheduling_preference(handler)
    }
}

fn order_of<M: HandlerMetadata<usize>>(n: usize, metadata: M) -> Result<Vec<usize>, OrderingError> {
    let mut set = HandlerSet::new(metadata);
    for handler in 0..n {
        set.add(handler);
    }
    set.execution_list()
}

/// Acyclic constraint sets: edges only run from lower to higher handler
fn acyclic() -> impl Strategy<Value = (usize, EdgeList)> {
    (1usize..14).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..n * 2).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect::<Vec<_>>()
        });
        let early = prop::collection::vec(0..n, 0..n);
        (Just(n), edges, early).prop_map(|(n, edges, early)| (n, EdgeList { edges, early }))
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_order_respects_every_edge((n, metadata) in acyclic()) {
        let edges = metadata.edges.clone();
        let order = order_of(n, metadata).unwrap();

        let mut position = vec![0; n];
        for (pos, &handler) in order.iter().enumerate() {
            position[handler] = pos;
        }
        for (from, to) in edges {
            prop_assert!(position[from] < position[to], "{} before {} in {:?}", from, to, order);
        }
    }

    #[test]
    fn prop_order_is_complete((n, metadata) in acyclic()) {
        let mut order = order_of(n, metadata).unwrap();
        order.sort_unstable();
        prop_assert_eq!(order, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_order_is_deterministic((n, metadata) in acyclic()) {
        let first = order_of(n, metadata.clone()).unwrap();
        let second = order_of(n, metadata).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_duplicate_declarations_are_idempotent((n, metadata) in acyclic()) {
        let doubled = Doubled(metadata.clone());
        prop_assert_eq!(order_of(n, metadata).unwrap(), order_of(n, doubled).unwrap());
    }

    #[test]
    fn prop_closed_chain_is_detected(
        (n, metadata) in acyclic(),
        len in 1usize..6,
    ) {
        let len = len.min(n);
        let mut edges = metadata.edges.clone();
        for i in 0..len {
            edges.push((i, (i + 1) % len));
        }
        let mut set = HandlerSet::new(EdgeList { edges, early: metadata.early });
        for handler in 0..n {
            set.add(handler);
        }

        prop_assert!(set.has_cycle());
        let is_cycle_error = matches!(set.execution_list(), Err(OrderingError::CycleDetected { .. }));
        prop_assert!(is_cycle_error);
    }

    #[test]
    fn prop_closure_stays_symmetric(
        n in 1usize..12,
        pairs in prop::collection::vec((0usize..12, 0usize..12), 0..30),
    ) {
        let mut graph = NodeGraph::new();
        for handler in 0..n {
            graph.add_node(handler);
        }
        for (from, to) in pairs {
            if from < n && to < n {
                graph.before(from, to);
            }
        }

        prop_assert!(invariant_closure_symmetry(&graph));
    }
}

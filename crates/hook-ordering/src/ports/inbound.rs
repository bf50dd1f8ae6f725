//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::OrderingError;

/// Primary ordering API exposed to a hook manager.
pub trait ExecutionOrderApi<H> {
    /// Add a handler to the session.
    ///
    /// Returns `false` if the handler was already present.
    fn add(&mut self, handler: H) -> bool;

    /// Compute the execution order of every added handler.
    ///
    /// Fails with `OrderingError::CycleDetected` when the declared
    /// constraints contradict each other; no partial order is returned.
    fn execution_list(&mut self) -> Result<Vec<H>, OrderingError>;

    /// Check for contradictory constraints without materializing an order.
    fn has_cycle(&mut self) -> bool;
}

//! Hook Ordering Service
//!
//! Orchestrates one ordering request per hook point:
//! 1. Discover handlers from the registry
//! 2. Build a fresh `HandlerSet` over the metadata source
//! 3. Compute the execution order
//! 4. Optionally invoke handlers in order, stopping on abort

use crate::application::session::HandlerSet;
use crate::config::OrderingConfig;
use crate::domain::errors::OrderingError;
use crate::ports::outbound::{HandlerMetadata, HandlerRegistry};
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, info};

/// Result of invoking one handler
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookFlow {
    /// Continue with the next handler
    Continue,
    /// Stop the whole chain
    Abort,
}

/// Outcome of a dispatch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport<H> {
    /// Handlers invoked, in order (including the aborting one)
    pub invoked: Vec<H>,
    /// Handler that stopped the chain, if any
    pub aborted_by: Option<H>,
}

impl<H> DispatchReport<H> {
    pub fn is_aborted(&self) -> bool {
        self.aborted_by.is_some()
    }
}

/// Errors surfaced by the hook service
#[derive(Debug, Error)]
pub enum HookError {
    #[error("Cannot order handlers for hook '{hook_point}': {source}")]
    Ordering {
        hook_point: String,
        #[source]
        source: OrderingError,
    },
}

/// Hook Ordering Service
pub struct HookOrderingService<R, M> {
    registry: R,
    metadata: M,
    config: OrderingConfig,
}

impl<R, M> HookOrderingService<R, M>
where
    R: HandlerRegistry,
    R::Handler: Clone + Eq + Hash + Debug,
    M: HandlerMetadata<R::Handler>,
{
    /// Create a new service with default config
    pub fn new(registry: R, metadata: M) -> Self {
        Self::with_config(registry, metadata, OrderingConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(registry: R, metadata: M, config: OrderingConfig) -> Self {
        Self {
            registry,
            metadata,
            config,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Fresh session holding every handler registered for `hook_point`
    pub fn session(&self, hook_point: &str) -> HandlerSet<R::Handler, &M> {
        let mut set = HandlerSet::with_config(&self.metadata, self.config.clone());
        for handler in self.registry.handlers(hook_point) {
            set.add(handler);
        }
        set
    }

    /// Execution order of the handlers registered for `hook_point`
    pub fn execution_list(&self, hook_point: &str) -> Result<Vec<R::Handler>, HookError> {
        self.session(hook_point)
            .execution_list()
            .map_err(|source| HookError::Ordering {
                hook_point: hook_point.to_string(),
                source,
            })
    }

    /// Invoke the handlers of `hook_point` in order.
    ///
    /// No handler runs if the order cannot be computed. The chain stops at
    /// the first handler returning `HookFlow::Abort`.
    pub fn dispatch<F>(
        &self,
        hook_point: &str,
        mut invoke: F,
    ) -> Result<DispatchReport<R::Handler>, HookError>
    where
        F: FnMut(&R::Handler) -> HookFlow,
    {
        let order = self.execution_list(hook_point)?;

        info!(hook_point, handler_count = order.len(), "Dispatching hook");

        let mut report = DispatchReport {
            invoked: Vec::with_capacity(order.len()),
            aborted_by: None,
        };

        for handler in order {
            let flow = invoke(&handler);
            report.invoked.push(handler.clone());
            if flow == HookFlow::Abort {
                info!(hook_point, ?handler, "Hook chain aborted");
                report.aborted_by = Some(handler);
                break;
            }
        }

        debug!(
            hook_point,
            invoked = report.invoked.len(),
            "Hook dispatch complete"
        );

        Ok(report)
    }
}

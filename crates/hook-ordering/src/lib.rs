//! # Hook Ordering
//!
//! Constraint-based execution-order resolver for hook handlers.
//! Handlers declare "run before X" / "run after Y" constraints and an
//! early/late scheduling hint; the engine returns one total order that
//! satisfies every constraint, or reports a cycle.
//!
//! ## Architecture
//!
//! - **Domain**: Node arena (`NodeGraph`), `SchedulingPreference`, errors, invariants
//! - **Algorithms**: Graph building, cluster discovery, intra-cluster ordering, bucket merge
//! - **Ports**: Inbound (`ExecutionOrderApi`) and Outbound (`HandlerMetadata`, `HandlerRegistry`)
//! - **Application**: Ordering session (`HandlerSet`) and hook dispatch service
//! - **Adapters**: Declarative constraint source and static registry

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{DeclaredConstraints, Declaration, StaticRegistry};
pub use application::service::{DispatchReport, HookError, HookFlow, HookOrderingService};
pub use application::session::HandlerSet;
pub use config::OrderingConfig;
pub use domain::entities::{Node, NodeGraph};
pub use domain::errors::{ConstraintParseError, OrderingError};
pub use domain::value_objects::*;
pub use ports::inbound::ExecutionOrderApi;
pub use ports::outbound::{HandlerMetadata, HandlerRegistry};

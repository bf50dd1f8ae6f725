//! Ports module for Hook Ordering
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::ExecutionOrderApi;
pub use outbound::{HandlerMetadata, HandlerRegistry};

//! Application layer for Hook Ordering
//!
//! - `session`: one ordering request over an explicit handler set
//! - `service`: per-hook-point orchestration over registry and metadata ports

pub mod service;
pub mod session;

pub use service::{DispatchReport, HookError, HookFlow, HookOrderingService};
pub use session::HandlerSet;

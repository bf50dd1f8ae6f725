//! Adapters for the outbound ports
//!
//! - `declared`: metadata source from declarations or a small constraint language
//! - `registry`: in-memory hook point registry

pub mod declared;
pub mod registry;

pub use declared::{Declaration, DeclaredConstraints};
pub use registry::StaticRegistry;

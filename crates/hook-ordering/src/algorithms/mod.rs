//! Algorithms module for Hook Ordering
//!
//! Contains:
//! - Node graph builder (metadata -> arena with closure)
//! - Cluster discovery and intra-cluster ordering
//! - Preference-based merge of cluster orders

pub mod cluster;
pub mod graph_builder;
pub mod merge;

pub use cluster::Cluster;
pub use graph_builder::build_node_graph;
pub use merge::merge_clusters;

//! Static Handler Registry

use crate::ports::outbound::HandlerRegistry;
use std::collections::BTreeMap;

/// In-memory registry: hook point name -> handlers in registration order
#[derive(Clone, Debug)]
pub struct StaticRegistry<H> {
    hooks: BTreeMap<String, Vec<H>>,
}

impl<H> StaticRegistry<H> {
    pub fn new() -> Self {
        Self {
            hooks: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, hook_point: impl Into<String>, handler: H) -> &mut Self {
        self.hooks.entry(hook_point.into()).or_default().push(handler);
        self
    }

    /// Registered hook point names
    pub fn hook_points(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }
}

impl<H> Default for StaticRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Clone> HandlerRegistry for StaticRegistry<H> {
    type Handler = H;

    fn handlers(&self, hook_point: &str) -> Vec<H> {
        self.hooks.get(hook_point).cloned().unwrap_or_default()
    }
}

//! Outbound Ports (Driven Ports / SPI)

use crate::domain::value_objects::SchedulingPreference;

/// Source of per-handler ordering metadata.
///
/// Implementations translate an extension point's constraint vocabulary
/// (annotations, configuration, a test mini-language) into handler
/// references. Targets that are not part of the ordered set are ignored.
pub trait HandlerMetadata<H> {
    /// Handlers that `handler` must execute before
    fn runs_before(&self, handler: &H) -> Vec<H>;

    /// Handlers that `handler` must execute after
    fn runs_after(&self, handler: &H) -> Vec<H>;

    /// Declared preference, `None` for the configured default
    fn scheduling_preference(&self, handler: &H) -> Option<SchedulingPreference>;
}

impl<H, M> HandlerMetadata<H> for &M
where
    M: HandlerMetadata<H> + ?Sized,
{
    fn runs_before(&self, handler: &H) -> Vec<H> {
        (**self).runs_before(handler)
    }

    fn runs_after(&self, handler: &H) -> Vec<H> {
        (**self).runs_after(handler)
    }

    fn scheduling_preference(&self, handler: &H) -> Option<SchedulingPreference> {
        (**self).scheduling_preference(handler)
    }
}

/// Discovery of the handlers bound to an extension point.
pub trait HandlerRegistry {
    type Handler;

    /// Candidate handlers for `hook_point`, empty if none are registered
    fn handlers(&self, hook_point: &str) -> Vec<Self::Handler>;
}

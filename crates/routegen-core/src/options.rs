use std::fmt;
use std::sync::Arc;

use crate::descriptor::RouteDescriptor;
use crate::model::RouteGroupSpec;

/// Signature of the per-route mapper: the route, its owning group, and
/// the gateway root path, producing one resolved descriptor. The
/// walker attaches the host/port binding afterwards.
pub type RouteMapperFn<G> =
    Arc<dyn Fn(&<G as RouteGroupSpec>::Route, &G, &str) -> RouteDescriptor + Send + Sync>;

/// Options for one resolution run. The single override point is the
/// mapper.
pub struct MapOptions<G: RouteGroupSpec> {
    /// Replacement for the default merge mapper. When set, the default
    /// merge table is never consulted for the run, so fields the
    /// default would have copied or silently ignored become entirely
    /// this function's responsibility. Output is taken as-is; nothing
    /// is validated.
    pub mapper: Option<RouteMapperFn<G>>,
}

impl<G: RouteGroupSpec> MapOptions<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a custom mapper.
    pub fn with_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&G::Route, &G, &str) -> RouteDescriptor + Send + Sync + 'static,
    {
        self.mapper = Some(Arc::new(mapper));
        self
    }
}

impl<G: RouteGroupSpec> Default for MapOptions<G> {
    fn default() -> Self {
        Self { mapper: None }
    }
}

impl<G: RouteGroupSpec> Clone for MapOptions<G> {
    fn clone(&self) -> Self {
        Self {
            mapper: self.mapper.clone(),
        }
    }
}

impl<G: RouteGroupSpec> fmt::Debug for MapOptions<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOptions")
            .field("mapper", &self.mapper.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

//! Resolver context passed to factory functions.

use std::sync::Arc;

use super::ScopedServiceProvider;
use crate::traits::Resolver;

/// The provider handle a factory receives at resolution time.
///
/// It borrows the scope currently realizing the call site, so a factory
/// can resolve its own dependencies from that same scope (which may walk
/// up the parent chain), register disposers, or derive child scopes
/// through the full [`Resolver`] surface.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Device { name: String }
/// struct Queue { device: Arc<Device> }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Device { name: "gpu0".to_string() });
/// services.add_singleton_factory::<Queue, _>(|resolver| {
///     // constructor-style injection: the factory pulls what it needs
///     Queue { device: resolver.get_required::<Device>() }
/// });
///
/// let root = services.build();
/// let queue = root.get_required::<Queue>();
/// assert_eq!(queue.device.name, "gpu0");
/// ```
pub struct ResolverContext<'a> {
    node: &'a Arc<ScopedServiceProvider>,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(node: &'a Arc<ScopedServiceProvider>) -> Self {
        Self { node }
    }
}

impl Resolver for ResolverContext<'_> {
    fn provider(&self) -> &Arc<ScopedServiceProvider> {
        self.node
    }
}

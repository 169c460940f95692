//! Disposal trait for resource cleanup.

/// Trait for services that need structured teardown (e.g., flushing
/// command pools, closing device handles).
///
/// Factories register instances for disposal through
/// [`Resolver::register_disposer`](crate::Resolver::register_disposer);
/// the resolving scope runs all registered hooks in LIFO order when it is
/// destroyed, so resources come down in the inverse order of their
/// construction.
///
/// # Examples
///
/// ```rust
/// use strata_di::{Dispose, ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct CommandPool {
///     name: String,
/// }
///
/// impl Dispose for CommandPool {
///     fn dispose(&self) {
///         println!("releasing pool: {}", self.name);
///     }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_scoped_factory::<CommandPool, _>(|resolver| {
///     let pool = Arc::new(CommandPool { name: "frame".to_string() });
///     resolver.register_disposer(pool.clone());
///     CommandPool { name: "frame".to_string() }
/// });
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Perform cleanup of resources.
    fn dispose(&self);
}

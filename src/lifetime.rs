//! Service lifetime definitions.

/// Service lifetimes controlling instance caching and disposal.
///
/// The lifetime decides where in the scope tree an instance may be
/// realized and cached, and which scope is responsible for disposing it.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Device { name: String }
/// struct FrameContext { id: u32 }
/// struct ScratchBuffer;
///
/// let mut services = ServiceCollection::new();
///
/// // Singleton: one instance, realized and cached at the root
/// services.add_singleton(Device { name: "gpu0".to_string() });
///
/// // Scoped: one instance per scope
/// services.add_scoped_factory::<FrameContext, _>(|_| FrameContext { id: 7 });
///
/// // Transient: a fresh instance on every resolution, never tracked
/// services.add_transient_factory::<ScratchBuffer, _>(|_| ScratchBuffer);
///
/// let root = services.build();
/// let frame = root.create_scope();
///
/// let d1 = frame.get_required::<Device>();
/// let d2 = root.get_required::<Device>();
/// assert!(Arc::ptr_eq(&d1, &d2)); // shared across the tree
///
/// let f1 = frame.get_required::<FrameContext>();
/// let f2 = frame.get_required::<FrameContext>();
/// assert!(Arc::ptr_eq(&f1, &f2)); // cached within the scope
///
/// let b1 = frame.get_required::<ScratchBuffer>();
/// let b2 = frame.get_required::<ScratchBuffer>();
/// assert!(!Arc::ptr_eq(&b1, &b2)); // always fresh
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// One instance, realized at the scope whose rules permit singletons
    /// (the root under the default rules) and shared by every descendant.
    Singleton,
    /// One instance per scope. Sibling scopes get distinct instances;
    /// repeated resolution within one scope returns the cached instance.
    Scoped,
    /// A fresh instance on every resolution. Never cached, never recorded
    /// in a creation log; ownership passes entirely to the caller.
    Transient,
}

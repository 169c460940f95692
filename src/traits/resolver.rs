//! The shared resolution API.

use std::sync::Arc;

use crate::collection::ServiceCollection;
use crate::error::{DiError, DiResult};
use crate::key::{key_of_trait, key_of_type};
use crate::provider::{AllServices, ScopedServiceProvider, ServiceScope};
use crate::registration::AnyArc;
use crate::rules::{ScopeTag, ScopingRules};
use crate::traits::Dispose;

pub(crate) fn cast_concrete<T: 'static + Send + Sync>(any: AnyArc) -> DiResult<Arc<T>> {
    any.downcast::<T>()
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
}

// Trait objects are stored as Arc<Arc<dyn Trait>> inside the erased Arc.
pub(crate) fn cast_trait<T: ?Sized + 'static + Send + Sync>(any: AnyArc) -> DiResult<Arc<T>> {
    any.downcast::<Arc<T>>()
        .map(|boxed| (*boxed).clone())
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
}

/// Typed service resolution, disposal registration, and scope derivation.
///
/// Implemented by [`ServiceScope`] (the external handle) and
/// [`ResolverContext`](crate::ResolverContext) (what factories receive),
/// so the same API is available outside and inside a factory invocation.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// trait Codec: Send + Sync {
///     fn name(&self) -> &str;
/// }
///
/// struct Png;
/// impl Codec for Png {
///     fn name(&self) -> &str { "png" }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(1024u32);
/// services.add_singleton_trait::<dyn Codec>(Arc::new(Png));
///
/// let root = services.build();
/// assert_eq!(*root.get_required::<u32>(), 1024);
/// assert_eq!(root.get_required_trait::<dyn Codec>().name(), "png");
/// ```
pub trait Resolver {
    /// The scope-tree node this resolver resolves against.
    #[doc(hidden)]
    fn provider(&self) -> &Arc<ScopedServiceProvider>;

    // --- Singular resolution ---

    /// Resolves a concrete service type.
    ///
    /// Looks up slot 0 in this scope's call-site table; if the identifier
    /// is absent locally, delegation walks the parent chain until a scope
    /// has it or the root is exhausted. If the type was registered more
    /// than once in one scope, only the first registration is observed;
    /// registration order is resolution priority for singular lookups.
    ///
    /// # Errors
    ///
    /// [`DiError::NotFound`] when no registration for `T` is reachable
    /// from this scope.
    fn get<T: 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let any = ScopedServiceProvider::resolve_first(self.provider(), &key_of_type::<T>())?;
        cast_concrete(any)
    }

    /// Like [`get`](Self::get), returning `None` instead of failing when
    /// no registration is reachable.
    fn get_optional<T: 'static + Send + Sync>(&self) -> Option<Arc<T>> {
        self.get::<T>().ok()
    }

    /// Resolves a concrete service type, panicking on failure.
    ///
    /// Use when the registration is a configuration invariant and absence
    /// should fail fast.
    fn get_required<T: 'static + Send + Sync>(&self) -> Arc<T> {
        self.get::<T>()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    /// Resolves a trait implementation.
    fn get_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let any = ScopedServiceProvider::resolve_first(self.provider(), &key_of_trait::<T>())?;
        cast_trait(any)
    }

    /// Like [`get_trait`](Self::get_trait), returning `None` when no
    /// registration is reachable.
    fn get_optional_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Option<Arc<T>> {
        self.get_trait::<T>().ok()
    }

    /// Resolves a trait implementation, panicking on failure.
    fn get_required_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Arc<T> {
        self.get_trait::<T>().unwrap_or_else(|e| {
            panic!("Failed to resolve trait {}: {}", std::any::type_name::<T>(), e)
        })
    }

    // --- Multi-registration resolution ---

    /// Lazily resolves every registration of `T` reachable from this
    /// scope: ancestors first (root down to here), then this scope's own
    /// registrations in registration order.
    ///
    /// Each item is realized as the iterator reaches it; consuming the
    /// sequence caches any unrealized non-transient call site it touches.
    fn get_all<T: 'static + Send + Sync>(&self) -> AllServices<T>
    where
        Self: Sized,
    {
        AllServices::new(self.provider(), key_of_type::<T>(), cast_concrete::<T>)
    }

    /// [`get_all`](Self::get_all) for trait registrations.
    fn get_all_trait<T: ?Sized + 'static + Send + Sync>(&self) -> AllServices<T>
    where
        Self: Sized,
    {
        AllServices::new(self.provider(), key_of_trait::<T>(), cast_trait::<T>)
    }

    // --- Disposal ---

    /// Registers a service for disposal when this resolver's scope is
    /// destroyed. Hooks run in LIFO order, so resources come down in the
    /// inverse order of their construction.
    fn register_disposer<T: Dispose>(&self, service: Arc<T>) {
        self.provider()
            .push_disposer(Box::new(move || service.dispose()));
    }

    // --- Scope derivation ---

    /// Derives an untagged child scope with [`ScopingRules::nested`].
    fn create_scope(&self) -> ServiceScope {
        ServiceScope::child_of(self.provider(), None, ScopingRules::nested(), None)
    }

    /// Derives a child scope carrying `tag`, making tag-restricted
    /// registrations visible to it.
    fn create_scope_tagged(&self, tag: ScopeTag) -> ServiceScope {
        ServiceScope::child_of(self.provider(), Some(tag), ScopingRules::nested(), None)
    }

    /// Derives an untagged child scope governed by `rules`.
    fn create_scope_with_rules(&self, rules: ScopingRules) -> ServiceScope {
        ServiceScope::child_of(self.provider(), None, rules, None)
    }

    /// The canonical scope-derivation form: `tag`, `rules`, and a
    /// configuration callback.
    ///
    /// The callback receives a fresh [`ServiceCollection`] pre-populated
    /// with a clone of this scope's registration snapshot and may append
    /// scope-local registrations; the child (and its descendants) resolve
    /// against the configured collection, invisible to this scope and to
    /// siblings.
    ///
    /// Note that a singleton appended here is unreachable under the
    /// default rules: singletons realize only where rules permit them,
    /// and the pre-existing root does not know the new registration. Give
    /// the child [`ScopingRules::permit_all`] (or a custom matrix) to
    /// host its own singletons.
    fn create_scope_with<F>(
        &self,
        tag: Option<ScopeTag>,
        rules: ScopingRules,
        configure: F,
    ) -> ServiceScope
    where
        F: FnOnce(&mut ServiceCollection),
        Self: Sized,
    {
        let mut services = ServiceCollection::from_snapshot(self.provider().snapshot());
        configure(&mut services);
        ServiceScope::child_of(self.provider(), tag, rules, Some(services.snapshot()))
    }

    /// Shorthand for [`create_scope_with`](Self::create_scope_with) with
    /// no tag and nested rules.
    fn create_configured_scope<F>(&self, configure: F) -> ServiceScope
    where
        F: FnOnce(&mut ServiceCollection),
        Self: Sized,
    {
        self.create_scope_with(None, ScopingRules::nested(), configure)
    }
}

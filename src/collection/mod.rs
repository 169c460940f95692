//! Service collection: the append-only registration builder.
//!
//! A [`ServiceCollection`] is built by the application before any
//! resolution occurs. Registration is purely declarative; no factory is
//! invoked until a derived scope resolves the service.

use std::sync::Arc;

use crate::descriptors::ServiceDescriptor;
use crate::error::DiResult;
use crate::key::{key_of_trait, key_of_type};
use crate::lifetime::Lifetime;
use crate::provider::{ResolverContext, ServiceScope};
use crate::registration::{AnyArc, Ctor, Registration, Snapshot};
use crate::rules::ScopeTag;

pub mod module_system;
pub use module_system::{ServiceCollectionExt, ServiceModule};

/// Ordered, append-only sequence of service registrations.
///
/// Re-adding the same type creates an additional registration at the next
/// slot; singular resolution observes the first, [`get_all`] walks them
/// all. [`build`](Self::build) snapshots the current registrations into an
/// independent root scope and may be called repeatedly.
///
/// [`get_all`]: crate::Resolver::get_all
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceCollection, Resolver};
///
/// struct Config { threads: usize }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Config { threads: 4 });
///
/// let root = services.build();
/// assert_eq!(root.get_required::<Config>().threads, 4);
/// ```
#[derive(Default)]
pub struct ServiceCollection {
    registrations: Vec<Registration>,
}

impl ServiceCollection {
    /// Creates a new empty service collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clones an existing snapshot into a fresh, appendable collection.
    /// Used by scope configuration callbacks.
    pub(crate) fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self { registrations: snapshot.to_vec() }
    }

    /// Freezes the current registrations into an immutable snapshot.
    pub(crate) fn snapshot(&self) -> Snapshot {
        self.registrations.clone().into()
    }

    /// Number of registrations added so far.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    // ----- Concrete type registrations -----

    /// Registers a pre-built singleton instance, shared across the whole
    /// scope tree.
    pub fn add_singleton<T: 'static + Send + Sync>(&mut self, value: T) -> &mut Self {
        let arc = Arc::new(value);
        let ctor: Ctor = Arc::new(move |_: &ResolverContext| -> DiResult<AnyArc> {
            Ok(arc.clone())
        });
        self.registrations.push(Registration::new(
            key_of_type::<T>(),
            Lifetime::Singleton,
            None,
            ctor,
        ));
        self
    }

    /// Registers a singleton factory, invoked at most once per scope tree
    /// (at the scope whose rules permit singletons, the root by default).
    pub fn add_singleton_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Singleton, None, factory)
    }

    /// Registers a scoped factory: one instance per scope that resolves
    /// it.
    pub fn add_scoped_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Scoped, None, factory)
    }

    /// Registers a transient factory: a fresh instance on every
    /// resolution, never tracked for disposal.
    pub fn add_transient_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Transient, None, factory)
    }

    /// [`add_scoped_factory`](Self::add_scoped_factory) restricted to
    /// scopes created with `tag`.
    pub fn add_scoped_factory_tagged<T, F>(&mut self, tag: ScopeTag, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Scoped, Some(tag), factory)
    }

    /// [`add_transient_factory`](Self::add_transient_factory) restricted
    /// to scopes created with `tag`.
    pub fn add_transient_factory_tagged<T, F>(&mut self, tag: ScopeTag, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Transient, Some(tag), factory)
    }

    fn add_factory<T, F>(&mut self, lifetime: Lifetime, tag: Option<ScopeTag>, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |r: &ResolverContext| -> DiResult<AnyArc> {
            Ok(Arc::new(factory(r)))
        });
        self.registrations
            .push(Registration::new(key_of_type::<T>(), lifetime, tag, ctor));
        self
    }

    // ----- Trait-object registrations -----

    /// Registers a pre-built trait implementation as a singleton.
    ///
    /// Repeated registrations of the same trait accumulate; singular
    /// resolution observes the first, [`get_all_trait`] yields them all in
    /// registration order.
    ///
    /// [`get_all_trait`]: crate::Resolver::get_all_trait
    pub fn add_singleton_trait<T>(&mut self, value: Arc<T>) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
    {
        // Stored as Arc<Arc<dyn Trait>> inside the erased Arc.
        let stored: AnyArc = Arc::new(value);
        let ctor: Ctor = Arc::new(move |_: &ResolverContext| -> DiResult<AnyArc> {
            Ok(stored.clone())
        });
        self.registrations.push(Registration::new(
            key_of_trait::<T>(),
            Lifetime::Singleton,
            None,
            ctor,
        ));
        self
    }

    /// Registers a singleton trait factory.
    pub fn add_singleton_trait_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<T> + Send + Sync + 'static,
    {
        self.add_trait_factory::<T, F>(Lifetime::Singleton, None, factory)
    }

    /// Registers a scoped trait factory.
    pub fn add_scoped_trait_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<T> + Send + Sync + 'static,
    {
        self.add_trait_factory::<T, F>(Lifetime::Scoped, None, factory)
    }

    /// Registers a transient trait factory.
    pub fn add_transient_trait_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<T> + Send + Sync + 'static,
    {
        self.add_trait_factory::<T, F>(Lifetime::Transient, None, factory)
    }

    /// [`add_scoped_trait_factory`](Self::add_scoped_trait_factory)
    /// restricted to scopes created with `tag`.
    pub fn add_scoped_trait_factory_tagged<T, F>(&mut self, tag: ScopeTag, factory: F) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<T> + Send + Sync + 'static,
    {
        self.add_trait_factory::<T, F>(Lifetime::Scoped, Some(tag), factory)
    }

    fn add_trait_factory<T, F>(&mut self, lifetime: Lifetime, tag: Option<ScopeTag>, factory: F) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<T> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |r: &ResolverContext| -> DiResult<AnyArc> {
            Ok(Arc::new(factory(r)) as AnyArc)
        });
        self.registrations
            .push(Registration::new(key_of_trait::<T>(), lifetime, tag, ctor));
        self
    }

    // ----- Introspection -----

    /// Descriptors of every registration, in registration order.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.registrations
            .iter()
            .map(|r| ServiceDescriptor {
                key: r.key,
                lifetime: r.lifetime,
                tag: r.tag,
            })
            .collect()
    }

    // ----- Building -----

    /// Snapshots the current registrations and returns the root
    /// [`ServiceScope`] of a fresh scope tree (tag none,
    /// [`ScopingRules::root`](crate::ScopingRules::root), level 0).
    ///
    /// The collection is not consumed; each call produces an independent
    /// tree.
    pub fn build(&self) -> ServiceScope {
        ServiceScope::root(self.snapshot())
    }
}

//! The scoped resolution engine.
//!
//! A [`ScopedServiceProvider`] is one node of the scope tree: it holds an
//! immutable registration snapshot, a call-site table built from that
//! snapshot filtered by its [`ScopingRules`] and tag, an ordered creation
//! log, and a shared reference to its parent. Resolution realizes call
//! sites lazily; teardown runs in LIFO order when the last owning handle
//! drops.

use std::collections::HashMap;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{DiError, DiResult};
use crate::internal::DisposeBag;
use crate::key::{CacheKey, ServiceKey};
use crate::lifetime::Lifetime;
use crate::registration::{AnyArc, Snapshot};
use crate::rules::{ScopeTag, ScopingRules};

pub mod call_site;
pub mod context;
pub mod iter;
pub mod scope;

pub(crate) use call_site::CallSite;
pub use context::ResolverContext;
pub use iter::AllServices;
pub use scope::ServiceScope;

/// One node of the scope tree: the resolution engine behind a
/// [`ServiceScope`] handle.
///
/// Not constructed directly; obtain nodes through
/// [`ServiceCollection::build`](crate::ServiceCollection::build) and the
/// `create_scope` family on [`Resolver`](crate::Resolver).
pub struct ScopedServiceProvider {
    snapshot: Snapshot,
    parent: Option<Arc<ScopedServiceProvider>>,
    rules: ScopingRules,
    tag: Option<ScopeTag>,
    level: usize,
    /// Call-site table; map shape is fixed at construction, only the
    /// per-site state behind each cell mutates.
    sites: HashMap<CacheKey, Mutex<CallSite>, RandomState>,
    /// Slots assigned per identifier among the registrations visible here.
    slots: HashMap<ServiceKey, u32, RandomState>,
    /// Creation log: instances in resolution order. Indices are stable for
    /// the scope's lifetime; entries are released in reverse at teardown.
    created: Mutex<Vec<AnyArc>>,
    disposers: Mutex<DisposeBag>,
}

impl ScopedServiceProvider {
    /// Builds a node from a snapshot: walk the registrations in order,
    /// skip those the rules or tag exclude, assign the next slot for each
    /// surviving identifier, and seed an unrealized call site.
    pub(crate) fn build_node(
        snapshot: Snapshot,
        parent: Option<Arc<ScopedServiceProvider>>,
        rules: ScopingRules,
        tag: Option<ScopeTag>,
    ) -> Arc<Self> {
        let level = parent.as_ref().map_or(0, |p| p.level + 1);
        let mut sites = HashMap::with_hasher(RandomState::new());
        let mut slots: HashMap<ServiceKey, u32, RandomState> =
            HashMap::with_hasher(RandomState::new());

        for reg in snapshot.iter() {
            if !rules.can_resolve(reg.lifetime) {
                continue;
            }
            if reg.tag.is_some() && reg.tag != tag {
                continue;
            }
            let slot = slots.entry(reg.key).or_insert(0);
            sites.insert(
                CacheKey::new(reg.key, *slot),
                Mutex::new(CallSite::Unrealized {
                    lifetime: reg.lifetime,
                    ctor: reg.ctor.clone(),
                }),
            );
            *slot += 1;
        }

        debug!(
            level,
            tag = tag.as_ref().map(|t| t.name()),
            sites = sites.len(),
            "scope created"
        );

        Arc::new(Self {
            snapshot,
            parent,
            rules,
            tag,
            level,
            sites,
            slots,
            created: Mutex::new(Vec::new()),
            disposers: Mutex::new(DisposeBag::default()),
        })
    }

    /// Depth in the scope tree; 0 at the root.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The tag this scope was created with, if any.
    pub fn tag(&self) -> Option<ScopeTag> {
        self.tag
    }

    /// The rules governing what this scope realizes locally.
    pub fn rules(&self) -> ScopingRules {
        self.rules
    }

    pub(crate) fn parent(&self) -> Option<&Arc<ScopedServiceProvider>> {
        self.parent.as_ref()
    }

    pub(crate) fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of slots this scope's table holds for `key`.
    pub(crate) fn slot_count(&self, key: &ServiceKey) -> u32 {
        self.slots.get(key).copied().unwrap_or(0)
    }

    pub(crate) fn push_disposer(&self, f: Box<dyn FnOnce() + Send>) {
        self.disposers.lock().push(f);
    }

    fn instance_at(&self, index: usize) -> AnyArc {
        self.created.lock()[index].clone()
    }

    /// Singular resolution: slot 0 locally, else walk the parent chain.
    pub(crate) fn resolve_first(node: &Arc<Self>, key: &ServiceKey) -> DiResult<AnyArc> {
        let ck = CacheKey::new(*key, 0);
        let mut current = node;
        loop {
            if current.sites.contains_key(&ck) {
                return Self::realize(current, &ck);
            }
            match current.parent() {
                Some(p) => current = p,
                None => return Err(DiError::NotFound(key.display_name())),
            }
        }
    }

    /// Resolution of one exact slot in this scope, without delegation.
    pub(crate) fn resolve_slot(node: &Arc<Self>, ck: &CacheKey) -> DiResult<AnyArc> {
        if node.sites.contains_key(ck) {
            Self::realize(node, ck)
        } else {
            Err(DiError::NotFound(ck.key.display_name()))
        }
    }

    /// Realize-or-fetch for one call site.
    ///
    /// The site lock is never held while the factory runs, so a factory
    /// may recursively resolve its own dependencies through this same
    /// scope. On factory failure the site stays unrealized and nothing is
    /// appended to the creation log.
    fn realize(node: &Arc<Self>, ck: &CacheKey) -> DiResult<AnyArc> {
        let site = match node.sites.get(ck) {
            Some(s) => s,
            None => return Err(DiError::NotFound(ck.key.display_name())),
        };

        let (lifetime, ctor) = {
            let guard = site.lock();
            match &*guard {
                CallSite::Realized { index } => return Ok(node.instance_at(*index)),
                CallSite::Unrealized { lifetime, ctor } => (*lifetime, ctor.clone()),
            }
        };

        let ctx = ResolverContext::new(node);
        let value = (ctor)(&ctx)?;

        if lifetime == Lifetime::Transient {
            // Never cached, never logged; ownership passes to the caller.
            return Ok(value);
        }

        let mut guard = site.lock();
        if let CallSite::Realized { index } = &*guard {
            // Another resolution won while the factory ran; keep the
            // first instance.
            return Ok(node.instance_at(*index));
        }
        let index = {
            let mut log = node.created.lock();
            log.push(value.clone());
            log.len() - 1
        };
        *guard = CallSite::Realized { index };
        trace!(
            key = ck.key.display_name(),
            slot = ck.slot,
            level = node.level,
            index,
            "call site realized"
        );
        Ok(value)
    }

    /// Root-to-self chain of nodes, for ancestor-first iteration.
    pub(crate) fn chain(node: &Arc<Self>) -> Vec<Arc<Self>> {
        let mut chain = Vec::with_capacity(node.level + 1);
        let mut current = node.clone();
        loop {
            chain.push(current.clone());
            let next = match current.parent() {
                Some(p) => p.clone(),
                None => break,
            };
            current = next;
        }
        chain.reverse();
        chain
    }
}

impl Drop for ScopedServiceProvider {
    fn drop(&mut self) {
        let disposers = self.disposers.get_mut();
        let hooks = disposers.len();
        disposers.run_all_reverse();

        // Release locally created instances in the inverse order of their
        // construction, then the parent reference (field drop).
        let created = self.created.get_mut();
        debug!(
            level = self.level,
            tag = self.tag.as_ref().map(|t| t.name()),
            instances = created.len(),
            hooks,
            "scope destroyed"
        );
        while created.pop().is_some() {}
    }
}

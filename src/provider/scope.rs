//! The externally visible scope handle.

use std::sync::Arc;

use super::ScopedServiceProvider;
use crate::registration::Snapshot;
use crate::rules::{ScopeTag, ScopingRules};
use crate::traits::Resolver;

/// Handle to one node of the scope tree.
///
/// Cloning a `ServiceScope` shares the underlying node; the node (and with
/// it every instance it created) is torn down when the last handle drops.
/// Child scopes keep their parent alive, so a node also outlives all of
/// its descendants.
/// Parents hold no references to children, so the tree is pure downward
/// ownership with no cycles.
///
/// Scopes are cheap to create and intended to be created per logical unit
/// of work: per frame, per render target, per script invocation.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct RequestContext { id: u32 }
///
/// let mut services = ServiceCollection::new();
/// services.add_scoped_factory::<RequestContext, _>(|_| RequestContext { id: 1 });
///
/// let root = services.build();
/// assert!(root.is_root());
///
/// let scope = root.create_scope();
/// assert_eq!(scope.level(), 1);
///
/// let a = scope.get_required::<RequestContext>();
/// let b = scope.get_required::<RequestContext>();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct ServiceScope {
    node: Arc<ScopedServiceProvider>,
}

impl ServiceScope {
    pub(crate) fn from_node(node: Arc<ScopedServiceProvider>) -> Self {
        Self { node }
    }

    /// Builds a root scope over a registration snapshot.
    pub(crate) fn root(snapshot: Snapshot) -> Self {
        Self::from_node(ScopedServiceProvider::build_node(
            snapshot,
            None,
            ScopingRules::root(),
            None,
        ))
    }

    /// Derives a child node from `parent`, reusing the parent's snapshot
    /// unless the caller supplied a configured replacement.
    pub(crate) fn child_of(
        parent: &Arc<ScopedServiceProvider>,
        tag: Option<ScopeTag>,
        rules: ScopingRules,
        snapshot: Option<Snapshot>,
    ) -> Self {
        let snapshot = snapshot.unwrap_or_else(|| parent.snapshot().clone());
        Self::from_node(ScopedServiceProvider::build_node(
            snapshot,
            Some(parent.clone()),
            rules,
            tag,
        ))
    }

    /// Depth of this scope in the tree; 0 at the root.
    pub fn level(&self) -> usize {
        self.node.level()
    }

    /// The tag this scope was created with, if any.
    pub fn tag(&self) -> Option<ScopeTag> {
        self.node.tag()
    }

    /// Whether this scope has no parent.
    pub fn is_root(&self) -> bool {
        self.level() == 0
    }

    /// The rules governing what this scope realizes locally.
    pub fn rules(&self) -> ScopingRules {
        self.node.rules()
    }
}

impl Clone for ServiceScope {
    fn clone(&self) -> Self {
        Self { node: self.node.clone() }
    }
}

impl Resolver for ServiceScope {
    fn provider(&self) -> &Arc<ScopedServiceProvider> {
        &self.node
    }
}

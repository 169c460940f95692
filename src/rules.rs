//! Scope-level resolution policy and visibility tags.

use std::fmt;

use crate::lifetime::Lifetime;

/// Policy deciding which lifetimes a scope may locally instantiate and
/// cache.
///
/// A registration whose lifetime a scope's rules disallow is simply
/// excluded from that scope's call-site table; resolving it succeeds only
/// by delegating to an ancestor whose rules permit it, or fails with
/// `NotFound` if no such ancestor exists. This is the mechanism that forces
/// singletons up to the root and pins scoped services to the scope that
/// resolves them.
///
/// The default matrix:
///
/// | preset     | Singleton | Scoped | Transient |
/// |------------|-----------|--------|-----------|
/// | `root()`   | yes       | no     | yes       |
/// | `nested()` | no        | yes    | yes       |
///
/// Both presets are plain values; embedders can substitute their own via
/// [`ScopingRules::custom`], [`allow`](ScopingRules::allow) or
/// [`deny`](ScopingRules::deny) on any scope they create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopingRules {
    singleton: bool,
    scoped: bool,
    transient: bool,
}

impl ScopingRules {
    /// Rules for the root of a scope tree: singletons and transients
    /// realize here, scoped registrations are excluded.
    pub const fn root() -> Self {
        Self { singleton: true, scoped: false, transient: true }
    }

    /// Rules for a nested scope: scoped and transient registrations
    /// realize locally, singletons delegate up toward the root.
    pub const fn nested() -> Self {
        Self { singleton: false, scoped: true, transient: true }
    }

    /// Rules permitting every lifetime. Useful for self-contained scopes
    /// that introduce their own singletons via scope-local registrations.
    pub const fn permit_all() -> Self {
        Self { singleton: true, scoped: true, transient: true }
    }

    /// An explicit matrix.
    pub const fn custom(singleton: bool, scoped: bool, transient: bool) -> Self {
        Self { singleton, scoped, transient }
    }

    /// Returns a copy of these rules with `lifetime` permitted.
    pub const fn allow(mut self, lifetime: Lifetime) -> Self {
        match lifetime {
            Lifetime::Singleton => self.singleton = true,
            Lifetime::Scoped => self.scoped = true,
            Lifetime::Transient => self.transient = true,
        }
        self
    }

    /// Returns a copy of these rules with `lifetime` excluded.
    pub const fn deny(mut self, lifetime: Lifetime) -> Self {
        match lifetime {
            Lifetime::Singleton => self.singleton = false,
            Lifetime::Scoped => self.scoped = false,
            Lifetime::Transient => self.transient = false,
        }
        self
    }

    /// Whether a scope governed by these rules may locally realize a
    /// registration with the given lifetime.
    #[inline(always)]
    pub const fn can_resolve(&self, lifetime: Lifetime) -> bool {
        match lifetime {
            Lifetime::Singleton => self.singleton,
            Lifetime::Scoped => self.scoped,
            Lifetime::Transient => self.transient,
        }
    }
}

/// Label restricting a registration's visibility to scopes carrying the
/// matching tag.
///
/// Untagged registrations are visible to every scope; a tagged registration
/// enters only the call-site tables of scopes created with the same tag.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceCollection, ScopeTag, Resolver};
///
/// const RENDER: ScopeTag = ScopeTag::new("render");
///
/// struct CommandList;
///
/// let mut services = ServiceCollection::new();
/// services.add_scoped_factory_tagged::<CommandList, _>(RENDER, |_| CommandList);
///
/// let root = services.build();
/// let render = root.create_scope_tagged(RENDER);
/// let job = root.create_scope();
///
/// assert!(render.get_optional::<CommandList>().is_some());
/// assert!(job.get_optional::<CommandList>().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeTag(&'static str);

impl ScopeTag {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ScopeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

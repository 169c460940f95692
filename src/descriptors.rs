//! Read-only views of registrations, for diagnostics and tooling.

use std::fmt;

use crate::key::ServiceKey;
use crate::lifetime::Lifetime;
use crate::rules::ScopeTag;

/// Snapshot of one registration: identity, lifetime, and tag restriction.
///
/// Obtained from [`ServiceCollection::descriptors`] in registration order.
/// Carries no factory and cannot resolve anything.
///
/// [`ServiceCollection::descriptors`]: crate::ServiceCollection::descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub(crate) key: ServiceKey,
    pub(crate) lifetime: Lifetime,
    pub(crate) tag: Option<ScopeTag>,
}

impl ServiceDescriptor {
    /// The identifier this registration answers to.
    pub fn key(&self) -> ServiceKey {
        self.key
    }

    /// Human-readable name of the registered abstraction.
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// The tag restricting which scopes see this registration, if any.
    pub fn tag(&self) -> Option<ScopeTag> {
        self.tag
    }

    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{} [{:?}, tag={}]", self.type_name(), self.lifetime, tag),
            None => write!(f, "{} [{:?}]", self.type_name(), self.lifetime),
        }
    }
}

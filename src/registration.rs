//! Service registration entries and the immutable snapshot they form.

use std::any::Any;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::ServiceKey;
use crate::lifetime::Lifetime;
use crate::provider::ResolverContext;
use crate::rules::ScopeTag;

/// Type-erased Arc for storage.
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Type-erased constructor: builds one instance, resolving its own
/// dependencies through the provider it receives.
pub(crate) type Ctor =
    Arc<dyn for<'a> Fn(&ResolverContext<'a>) -> DiResult<AnyArc> + Send + Sync>;

/// One entry of a [`ServiceCollection`](crate::ServiceCollection): a key
/// bound to a lifetime-tagged constructor, optionally restricted to scopes
/// carrying a tag. Immutable once appended; pre-built instances are
/// expressed as a ctor that clones a captured `Arc`.
#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) key: ServiceKey,
    pub(crate) lifetime: Lifetime,
    pub(crate) tag: Option<ScopeTag>,
    pub(crate) ctor: Ctor,
}

impl Registration {
    pub(crate) fn new(
        key: ServiceKey,
        lifetime: Lifetime,
        tag: Option<ScopeTag>,
        ctor: Ctor,
    ) -> Self {
        Self { key, lifetime, tag, ctor }
    }
}

/// Frozen, ordered view of a collection's registrations. Shared by every
/// scope derived from it; cheap to clone.
pub(crate) type Snapshot = Arc<[Registration]>;

//! Service identity keys and per-scope cache keys.

use std::any::TypeId;

/// Identity token for a registered abstraction.
///
/// Keys uniquely identify services in the container. Concrete types are
/// identified by their `TypeId`; trait objects have no `TypeId`, so they
/// are identified by their `type_name` string, which is stable within one
/// compilation.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceKey, key_of_type};
///
/// let key = key_of_type::<String>();
/// assert_eq!(key, key_of_type::<String>());
/// assert_ne!(key, key_of_type::<u32>());
/// assert!(key.display_name().contains("String"));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum ServiceKey {
    /// Concrete type key with TypeId and name for diagnostics.
    Type(TypeId, &'static str),
    /// Trait-object key, identified by the `dyn Trait` type name.
    Trait(&'static str),
}

impl ServiceKey {
    /// Human-readable type or trait name, for error messages and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKey::Type(_, name) => name,
            ServiceKey::Trait(name) => name,
        }
    }
}

// Identity-only equality: the type name string is carried for diagnostics
// and never participates in comparison.
impl PartialEq for ServiceKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ServiceKey::Type(a, _), ServiceKey::Type(b, _)) => a == b,
            (ServiceKey::Trait(a), ServiceKey::Trait(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ServiceKey {}

impl std::hash::Hash for ServiceKey {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            ServiceKey::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            ServiceKey::Trait(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

/// Key of a scope's call-site table: a service identity plus the slot
/// disambiguating multiple registrations of that identity.
///
/// Slots are assigned densely, in registration order, among the
/// registrations visible to a given scope. Slot 0 is the one singular
/// resolution observes; `get_all` walks every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub key: ServiceKey,
    pub slot: u32,
}

impl CacheKey {
    #[inline(always)]
    pub(crate) fn new(key: ServiceKey, slot: u32) -> Self {
        Self { key, slot }
    }
}

/// Builds the [`ServiceKey`] for a concrete type.
#[inline(always)]
pub fn key_of_type<T: 'static>() -> ServiceKey {
    ServiceKey::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}

/// Builds the [`ServiceKey`] for a trait object.
#[inline(always)]
pub fn key_of_trait<T: ?Sized + 'static>() -> ServiceKey {
    ServiceKey::Trait(std::any::type_name::<T>())
}

//! # strata-di
//!
//! Hierarchical, deterministic dependency injection for engine-style
//! applications.
//!
//! ## Features
//!
//! - **Type-safe lifetimes**: Singleton, Scoped, and Transient services
//! - **Hierarchical scopes**: arbitrarily deep scope trees with parent
//!   delegation; children own their parents, never the reverse
//! - **Scoping rules**: per-scope policy over which lifetimes realize
//!   locally, with tag-restricted registrations
//! - **Deterministic teardown**: instances released in the inverse order
//!   of their construction, disposal hooks run LIFO
//! - **Trait support**: single and multi-binding trait resolution
//! - **Thread-safe**: Arc-based sharing with interior locking per call site
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_di::{ServiceCollection, Resolver};
//! use std::sync::Arc;
//!
//! struct Device {
//!     name: String,
//! }
//!
//! struct CommandQueue {
//!     device: Arc<Device>,
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_singleton(Device {
//!     name: "primary".to_string(),
//! });
//! services.add_transient_factory::<CommandQueue, _>(|resolver| {
//!     CommandQueue {
//!         device: resolver.get_required::<Device>(),
//!     }
//! });
//!
//! let root = services.build();
//! let queue = root.get_required::<CommandQueue>();
//! assert_eq!(queue.device.name, "primary");
//! ```
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: realized once per scope tree, at the scope whose rules
//!   permit singletons (the root under the defaults)
//! - **Scoped**: realized once per scope that resolves it
//! - **Transient**: a fresh instance on every resolution, never tracked
//!
//! ## Scopes and Delegation
//!
//! ```rust
//! use strata_di::{ServiceCollection, Resolver};
//! use std::sync::Arc;
//!
//! struct Clock;
//! struct FrameContext {
//!     frame: u64,
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_singleton(Clock);
//! services.add_scoped_factory::<FrameContext, _>(|_| FrameContext { frame: 0 });
//!
//! let root = services.build();
//! let frame_scope = root.create_scope();
//!
//! // The singleton delegates up to the root; the scoped service lives in
//! // the frame scope and is released when the scope drops.
//! let clock_a = root.get_required::<Clock>();
//! let clock_b = frame_scope.get_required::<Clock>();
//! assert!(Arc::ptr_eq(&clock_a, &clock_b));
//!
//! let ctx_a = frame_scope.get_required::<FrameContext>();
//! let ctx_b = frame_scope.get_required::<FrameContext>();
//! assert!(Arc::ptr_eq(&ctx_a, &ctx_b));
//! ```
//!
//! ## Trait Resolution
//!
//! ```rust
//! use strata_di::{ServiceCollection, Resolver};
//! use std::sync::Arc;
//!
//! trait Backend: Send + Sync {
//!     fn name(&self) -> &str;
//! }
//!
//! struct Vulkan;
//! impl Backend for Vulkan {
//!     fn name(&self) -> &str { "vulkan" }
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_singleton_trait::<dyn Backend>(Arc::new(Vulkan));
//!
//! let root = services.build();
//! assert_eq!(root.get_required_trait::<dyn Backend>().name(), "vulkan");
//! ```

pub mod collection;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod provider;
pub mod rules;
pub mod traits;

mod internal;
mod registration;

pub use collection::{ServiceCollection, ServiceCollectionExt, ServiceModule};
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult};
pub use key::{key_of_trait, key_of_type, CacheKey, ServiceKey};
pub use lifetime::Lifetime;
pub use provider::{AllServices, ResolverContext, ScopedServiceProvider, ServiceScope};
pub use rules::{ScopeTag, ScopingRules};
pub use traits::{Dispose, Resolver};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn singleton_resolution() {
        let mut sc = ServiceCollection::new();
        sc.add_singleton(42usize);

        let root = sc.build();
        let a = root.get_required::<usize>();
        let b = root.get_required::<usize>();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn transient_resolution() {
        let mut sc = ServiceCollection::new();
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        sc.add_transient_factory::<String, _>(move |_| {
            let mut c = counter_clone.lock().unwrap();
            *c += 1;
            format!("instance-{}", *c)
        });

        let root = sc.build();
        let a = root.get_required::<String>();
        let b = root.get_required::<String>();

        assert_eq!(a.as_str(), "instance-1");
        assert_eq!(b.as_str(), "instance-2");
        assert!(!Arc::ptr_eq(&a, &b)); // Different instances
    }

    #[test]
    fn scoped_resolution() {
        let mut sc = ServiceCollection::new();
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        sc.add_scoped_factory::<String, _>(move |_| {
            let mut c = counter_clone.lock().unwrap();
            *c += 1;
            format!("scoped-{}", *c)
        });

        let root = sc.build();

        // Same scope should have same instance
        let scope1 = root.create_scope();
        let s1a = scope1.get_required::<String>();
        let s1b = scope1.get_required::<String>();
        assert!(Arc::ptr_eq(&s1a, &s1b));

        // Different scope should have different instance
        let scope2 = root.create_scope();
        let s2 = scope2.get_required::<String>();
        assert!(!Arc::ptr_eq(&s1a, &s2));
    }

    #[test]
    fn trait_resolution() {
        trait Sampler: Send + Sync {
            fn taps(&self) -> u32;
        }

        struct Bilinear;
        impl Sampler for Bilinear {
            fn taps(&self) -> u32 {
                4
            }
        }

        let mut sc = ServiceCollection::new();
        sc.add_singleton_trait::<dyn Sampler>(Arc::new(Bilinear));

        let root = sc.build();
        let sampler = root.get_required_trait::<dyn Sampler>();
        assert_eq!(sampler.taps(), 4);
    }

    #[test]
    fn not_found_agrees_across_accessors() {
        struct Unregistered;

        let sc = ServiceCollection::new();
        let root = sc.build();

        assert!(root.get::<Unregistered>().is_err());
        assert!(root.get_optional::<Unregistered>().is_none());
    }
}

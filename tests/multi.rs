use std::sync::{Arc, Mutex};
use strata_di::{DiResult, Resolver, ServiceCollection};

#[test]
fn test_multi_binding_basics() {
    trait RenderPass: Send + Sync {
        fn name(&self) -> &str;
    }

    struct ShadowPass;
    impl RenderPass for ShadowPass {
        fn name(&self) -> &str {
            "shadow"
        }
    }

    struct OpaquePass;
    impl RenderPass for OpaquePass {
        fn name(&self) -> &str {
            "opaque"
        }
    }

    struct PostPass;
    impl RenderPass for PostPass {
        fn name(&self) -> &str {
            "post"
        }
    }

    let mut sc = ServiceCollection::new();

    sc.add_singleton_trait::<dyn RenderPass>(Arc::new(ShadowPass));
    sc.add_singleton_trait::<dyn RenderPass>(Arc::new(OpaquePass));
    sc.add_singleton_trait::<dyn RenderPass>(Arc::new(PostPass));

    let root = sc.build();
    let passes: Vec<_> = root
        .get_all_trait::<dyn RenderPass>()
        .collect::<DiResult<_>>()
        .unwrap();

    assert_eq!(passes.len(), 3);
    assert_eq!(passes[0].name(), "shadow");
    assert_eq!(passes[1].name(), "opaque");
    assert_eq!(passes[2].name(), "post");

    // A second walk yields the same singleton instances.
    let passes2: Vec<_> = root
        .get_all_trait::<dyn RenderPass>()
        .collect::<DiResult<_>>()
        .unwrap();
    assert!(Arc::ptr_eq(&passes[0], &passes2[0]));
    assert!(Arc::ptr_eq(&passes[1], &passes2[1]));
    assert!(Arc::ptr_eq(&passes[2], &passes2[2]));
}

#[test]
fn test_multi_binding_lazy_realization() {
    trait Stage: Send + Sync {
        fn id(&self) -> usize;
    }

    struct CountingStage {
        id: usize,
    }
    impl Stage for CountingStage {
        fn id(&self) -> usize {
            self.id
        }
    }

    let built = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    for id in 0..3 {
        let built_clone = built.clone();
        sc.add_singleton_trait_factory::<dyn Stage, _>(move |_| {
            built_clone.lock().unwrap().push(id);
            Arc::new(CountingStage { id })
        });
    }

    let root = sc.build();
    let mut iter = root.get_all_trait::<dyn Stage>();

    // Nothing realized until the iterator is driven.
    assert!(built.lock().unwrap().is_empty());

    let first = iter.next().unwrap().unwrap();
    assert_eq!(first.id(), 0);
    assert_eq!(*built.lock().unwrap(), vec![0]);

    // Abandoning the iterator leaves the remaining sites untouched.
    drop(iter);
    assert_eq!(*built.lock().unwrap(), vec![0]);
}

#[test]
fn test_get_all_ordering_across_scopes() {
    struct Layer {
        name: &'static str,
    }

    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory::<Layer, _>(|_| Layer { name: "root" });

    let root = sc.build();

    // The child appends two registrations of its own; ancestors come
    // first, then the child's in registration order.
    let child = root.create_configured_scope(|services| {
        services.add_scoped_factory::<Layer, _>(|_| Layer { name: "child-a" });
        services.add_scoped_factory::<Layer, _>(|_| Layer { name: "child-b" });
    });

    let layers: Vec<_> = child
        .get_all::<Layer>()
        .collect::<DiResult<_>>()
        .unwrap();

    let names: Vec<_> = layers.iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["root", "child-a", "child-b"]);

    // The parent sees only its own registration.
    let from_root: Vec<_> = root.get_all::<Layer>().collect::<DiResult<_>>().unwrap();
    assert_eq!(from_root.len(), 1);
    assert_eq!(from_root[0].name, "root");
}

#[test]
fn test_multi_binding_mixed_lifetimes() {
    trait Emitter: Send + Sync {
        fn id(&self) -> i32;
    }

    struct FixedEmitter;
    impl Emitter for FixedEmitter {
        fn id(&self) -> i32 {
            1
        }
    }

    struct FreshEmitter {
        count: i32,
    }
    impl Emitter for FreshEmitter {
        fn id(&self) -> i32 {
            self.count
        }
    }

    let counter = Arc::new(Mutex::new(100));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();

    sc.add_singleton_trait::<dyn Emitter>(Arc::new(FixedEmitter));
    sc.add_transient_trait_factory::<dyn Emitter, _>(move |_| {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        Arc::new(FreshEmitter { count: *c })
    });

    let root = sc.build();

    let emitters1: Vec<_> = root
        .get_all_trait::<dyn Emitter>()
        .collect::<DiResult<_>>()
        .unwrap();
    assert_eq!(emitters1.len(), 2);
    assert_eq!(emitters1[0].id(), 1);
    assert_eq!(emitters1[1].id(), 101);

    let emitters2: Vec<_> = root
        .get_all_trait::<dyn Emitter>()
        .collect::<DiResult<_>>()
        .unwrap();
    assert_eq!(emitters2[0].id(), 1);
    assert_eq!(emitters2[1].id(), 102);

    // Singleton cached, transient fresh per walk.
    assert!(Arc::ptr_eq(&emitters1[0], &emitters2[0]));
    assert!(!Arc::ptr_eq(&emitters1[1], &emitters2[1]));
}

#[test]
fn test_multi_binding_empty() {
    trait Unbound: Send + Sync {}

    let sc = ServiceCollection::new();
    let root = sc.build();

    assert_eq!(root.get_all_trait::<dyn Unbound>().count(), 0);
}

#[test]
fn test_singular_trait_lookup_observes_first_slot() {
    trait Backend: Send + Sync {
        fn value(&self) -> i32;
    }

    struct Impl {
        val: i32,
    }
    impl Backend for Impl {
        fn value(&self) -> i32 {
            self.val
        }
    }

    let mut sc = ServiceCollection::new();
    sc.add_singleton_trait::<dyn Backend>(Arc::new(Impl { val: 10 }));
    sc.add_singleton_trait::<dyn Backend>(Arc::new(Impl { val: 20 }));

    let root = sc.build();

    // Singular lookup observes slot 0.
    let single = root.get_required_trait::<dyn Backend>();
    assert_eq!(single.value(), 10);

    let all: Vec<_> = root
        .get_all_trait::<dyn Backend>()
        .collect::<DiResult<_>>()
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].value(), 10);
    assert_eq!(all[1].value(), 20);
    assert!(Arc::ptr_eq(&single, &all[0]));
}

#[test]
fn test_multi_binding_with_dependencies() {
    struct Palette {
        prefix: String,
    }

    trait Painter: Send + Sync {
        fn paint(&self, input: &str) -> String;
    }

    struct PrefixPainter {
        palette: Arc<Palette>,
    }
    impl Painter for PrefixPainter {
        fn paint(&self, input: &str) -> String {
            format!("{}: {}", self.palette.prefix, input)
        }
    }

    struct UppercasePainter;
    impl Painter for UppercasePainter {
        fn paint(&self, input: &str) -> String {
            input.to_uppercase()
        }
    }

    let mut sc = ServiceCollection::new();

    sc.add_singleton(Palette {
        prefix: ">>".to_string(),
    });

    sc.add_singleton_trait_factory::<dyn Painter, _>(|r| {
        Arc::new(PrefixPainter {
            palette: r.get_required::<Palette>(),
        })
    });

    sc.add_singleton_trait::<dyn Painter>(Arc::new(UppercasePainter));

    let root = sc.build();
    let painters: Vec<_> = root
        .get_all_trait::<dyn Painter>()
        .collect::<DiResult<_>>()
        .unwrap();

    assert_eq!(painters.len(), 2);
    assert_eq!(painters[0].paint("hello"), ">>: hello");
    assert_eq!(painters[1].paint("hello"), "HELLO");
}

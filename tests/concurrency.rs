//! Concurrent resolution across threads sharing one scope tree.

use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use strata_di::{Resolver, ServiceCollection, ServiceScope};

#[test]
fn test_concurrent_singleton_resolution_yields_one_instance() {
    struct Registry {
        entries: Vec<u32>,
    }

    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory::<Registry, _>(|_| Registry {
        entries: (0..64).collect(),
    });

    let root = Arc::new(sc.build());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let root = root.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                root.get_required::<Registry>()
            })
        })
        .collect();

    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Racing resolutions may run the factory more than once, but every
    // caller observes the same cached instance.
    for instance in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], instance));
    }
    assert_eq!(instances[0].entries.len(), 64);
}

#[test]
fn test_scopes_resolved_from_worker_threads() {
    struct JobState {
        id: usize,
    }

    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();
    sc.add_scoped_factory::<JobState, _>(move |_| {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        JobState { id: *c }
    });

    let root = sc.build();

    // One scope per worker; each worker owns its scope for the job's
    // duration.
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scope: ServiceScope = root.create_scope();
            thread::spawn(move || {
                let a = scope.get_required::<JobState>();
                let b = scope.get_required::<JobState>();
                assert!(Arc::ptr_eq(&a, &b));
                a.id
            })
        })
        .collect();

    let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_transient_resolution_under_contention() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scratch {
        _serial: usize,
    }

    let serial = Arc::new(AtomicUsize::new(0));
    let serial_clone = serial.clone();

    let mut sc = ServiceCollection::new();
    sc.add_transient_factory::<Scratch, _>(move |_| Scratch {
        _serial: serial_clone.fetch_add(1, Ordering::SeqCst),
    });

    let root = Arc::new(sc.build());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let root = root.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let _ = root.get_required::<Scratch>();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(serial.load(std::sync::atomic::Ordering::SeqCst), 400);
}

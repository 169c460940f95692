//! Per-scope call-site state machine.

use crate::lifetime::Lifetime;
use crate::registration::Ctor;

/// Mutable per-scope state of one registration.
///
/// A call site starts `Unrealized` and transitions in place, at most once,
/// to `Realized` when its factory first runs in this scope. Transient call
/// sites never transition: every resolution re-invokes the factory and the
/// result bypasses the creation log entirely.
pub(crate) enum CallSite {
    /// The factory has not yet run in this scope.
    Unrealized {
        lifetime: Lifetime,
        ctor: Ctor,
    },
    /// Cached; `index` points into the owning scope's creation log.
    Realized {
        index: usize,
    },
}

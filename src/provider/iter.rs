//! Lazy multi-registration resolution.

use std::sync::Arc;

use super::ScopedServiceProvider;
use crate::error::DiResult;
use crate::key::{CacheKey, ServiceKey};
use crate::registration::AnyArc;

/// Lazy, finite sequence over every registration of one identifier
/// reachable from a scope.
///
/// Yields ancestors first (root down to the originating scope), then the
/// originating scope's own slots in registration order. Each call site is
/// realized on demand as the iterator reaches it, with the usual caching
/// side effect for non-transient lifetimes. Consumed by value, so a
/// sequence cannot be restarted; obtain a fresh one from
/// [`Resolver::get_all`](crate::Resolver::get_all).
pub struct AllServices<T: ?Sized> {
    chain: Vec<Arc<ScopedServiceProvider>>,
    key: ServiceKey,
    node_idx: usize,
    slot: u32,
    cast: fn(AnyArc) -> DiResult<Arc<T>>,
}

impl<T: ?Sized> AllServices<T> {
    pub(crate) fn new(
        start: &Arc<ScopedServiceProvider>,
        key: ServiceKey,
        cast: fn(AnyArc) -> DiResult<Arc<T>>,
    ) -> Self {
        Self {
            chain: ScopedServiceProvider::chain(start),
            key,
            node_idx: 0,
            slot: 0,
            cast,
        }
    }
}

impl<T: ?Sized> Iterator for AllServices<T> {
    type Item = DiResult<Arc<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let cast = self.cast;
        while self.node_idx < self.chain.len() {
            let node = &self.chain[self.node_idx];
            if self.slot < node.slot_count(&self.key) {
                let ck = CacheKey::new(self.key, self.slot);
                self.slot += 1;
                let resolved = ScopedServiceProvider::resolve_slot(node, &ck);
                return Some(resolved.and_then(cast));
            }
            self.node_idx += 1;
            self.slot = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining: usize = self.chain[self.node_idx..]
            .iter()
            .map(|n| n.slot_count(&self.key) as usize)
            .sum::<usize>()
            .saturating_sub(self.slot as usize);
        (remaining, Some(remaining))
    }
}

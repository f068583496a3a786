use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;

/// Snapshot of a pool's lifetime counters.
///
/// Exists so tests (and curious callers) can assert that
/// `idle_count + outstanding_handles == materialized` holds for every
/// sequence of acquires and releases, without the pool exposing its
/// internal queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolStats {
    /// Total number of `R` values the factory has ever produced.
    pub materialized: u64,
    /// Resources currently sitting in the idle queue.
    pub idle: usize,
}

/// Shared, reference-counted state behind a [`Pool`](super::store::Pool).
///
/// `Pool` holds the only strong reference; every outstanding
/// [`Handle`](super::handle::Handle) holds a [`Weak`](std::sync::Weak)
/// one. Once the pool is dropped the strong count falls to zero and the
/// idle queue and factory are dropped immediately, even though the
/// allocation backing this struct may briefly outlive it while weak
/// references still exist. `Weak::upgrade` is therefore the pool's
/// liveness marker — no separate atomic flag is needed.
pub(crate) struct PoolInner<R> {
    pub(crate) idle: Mutex<VecDeque<R>>,
    pub(crate) factory: Box<dyn Fn() -> R + Send + Sync>,
    pub(crate) materialized: AtomicU64,
}

impl<R> PoolInner<R> {
    pub(crate) fn new(factory: Box<dyn Fn() -> R + Send + Sync>) -> Self {
        Self {
            idle: Mutex::new(VecDeque::new()),
            factory,
            materialized: AtomicU64::new(0),
        }
    }
}

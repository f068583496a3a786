use super::handle::Handle;
use super::types::{PoolInner, PoolStats};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// A recycling container for expensive-to-build objects.
///
/// `Pool<R>` hands out [`Handle<R>`] borrows that return their `R` to the
/// idle queue on drop — or destroy it, if the pool itself is already
/// gone. See the module's [`handle`](super::handle) for the handoff
/// protocol.
///
/// `Pool` is not `Clone`: it uniquely owns its [`PoolInner`], which is
/// itself held behind an `Arc` so that moving the `Pool` (e.g. returning
/// it from a function, storing it in a struct field) never invalidates
/// the weak references already handed out to outstanding handles — only
/// the pointer moves, not the allocation it points to.
pub struct Pool<R> {
    inner: Arc<PoolInner<R>>,
}

impl<R: 'static> Pool<R> {
    /// Builds a pool whose factory is the given closure.
    ///
    /// Use this when `R` has no meaningful [`Default`], or construction
    /// needs parameters (a connection string, a buffer size, ...).
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(PoolInner::new(Box::new(factory))),
        }
    }

    /// Borrows an idle `R`, or builds a fresh one via the factory if the
    /// idle queue is empty.
    ///
    /// This never fails: both construction modes ([`Pool::default`] and
    /// [`Pool::with_factory`]) guarantee a way to produce `R`, so there is
    /// no "can't construct a replacement" case to surface at runtime —
    /// it is rejected at compile time by requiring `R: Default` on the
    /// `Default` impl below.
    pub fn acquire(&self) -> Handle<R> {
        let mut idle = self.inner.idle.lock().unwrap();
        if let Some(resource) = idle.pop_front() {
            return Handle::new(resource, Arc::downgrade(&self.inner));
        }
        drop(idle);

        self.inner.materialized.fetch_add(1, Ordering::Relaxed);
        let resource = (self.inner.factory)();
        Handle::new(resource, Arc::downgrade(&self.inner))
    }

    /// Number of idle `R` instances currently queued.
    pub fn idle_count(&self) -> usize {
        self.inner.idle.lock().unwrap().len()
    }

    /// Destroys every idle `R`. Outstanding handles are unaffected — each
    /// still returns its resource (or fails to, if the pool has since
    /// been dropped) independently on its own drop.
    pub fn drain(&self) {
        self.inner.idle.lock().unwrap().clear();
    }

    /// Lifetime counters for this pool; see [`PoolStats`].
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            materialized: self.inner.materialized.load(Ordering::Relaxed),
            idle: self.idle_count(),
        }
    }
}

impl<R: Default + 'static> Default for Pool<R> {
    /// The `default` construction mode: builds fresh `R`s with
    /// `R::default()` whenever the idle queue runs dry.
    fn default() -> Self {
        Self::with_factory(R::default)
    }
}

impl<R> fmt::Debug for Pool<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.idle_count())
            .field(
                "materialized",
                &self.inner.materialized.load(Ordering::Relaxed),
            )
            .finish()
    }
}

use super::types::PoolInner;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Weak;

/// A unique ownership token over one pooled `R`.
///
/// Created by [`Pool::acquire`](super::store::Pool::acquire), consumed by
/// `Drop`. While a `Handle` is alive the `R` it wraps is reachable from
/// nowhere else — it is either idle in the pool's queue or held by
/// exactly one `Handle`, never both.
pub struct Handle<R> {
    resource: Option<R>,
    pool: Weak<PoolInner<R>>,
}

impl<R> Handle<R> {
    pub(crate) fn new(resource: R, pool: Weak<PoolInner<R>>) -> Self {
        Self {
            resource: Some(resource),
            pool,
        }
    }
}

impl<R> Deref for Handle<R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.resource
            .as_ref()
            .expect("resource only ever taken in Drop")
    }
}

impl<R> DerefMut for Handle<R> {
    fn deref_mut(&mut self) -> &mut R {
        self.resource
            .as_mut()
            .expect("resource only ever taken in Drop")
    }
}

impl<R: fmt::Debug> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.resource).finish()
    }
}

impl<R> Drop for Handle<R> {
    fn drop(&mut self) {
        let Some(resource) = self.resource.take() else {
            return;
        };
        if let Some(inner) = self.pool.upgrade() {
            inner.idle.lock().unwrap().push_back(resource);
        }
        // Else: the pool is gone, `resource` is dropped here.
    }
}

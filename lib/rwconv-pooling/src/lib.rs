//! Object pooling.
//!
//! Pools hand out exclusively-owned items and take them back when the caller is done with them. Whether or not a
//! returned item is kept for reuse depends only on its capacity: items that have grown beyond the pool's configured
//! maximum are dropped so that a single oversized request cannot pin memory in the pool forever.
#![deny(missing_docs)]

mod bounded;
pub use self::bounded::{BoundedObjectPool, BoundedObjectPoolBuilder, PoolBuildError};

mod helpers;
pub use self::helpers::recycle_vec;

mod telemetry;

/// An item that can be cleared.
pub trait Clearable {
    /// Clears the item.
    ///
    /// Any owned values held by the item must be dropped, so that a pooled item never keeps them alive.
    fn clear(&mut self);
}

/// An item that is poolable.
///
/// Poolable items are containers whose allocation is the valuable part: the pool keeps the allocation around, while the
/// contents are cleared every time the item is returned.
pub trait Poolable: Clearable + Send + 'static {
    /// Creates a new, empty item able to hold at least `capacity` elements without reallocating.
    fn with_capacity(capacity: usize) -> Self;

    /// Returns the number of elements the item can hold without reallocating.
    fn capacity(&self) -> usize;
}

impl<T> Clearable for Vec<T> {
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

impl<T: Send + 'static> Poolable for Vec<T> {
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }
}

/// An object pool.
pub trait ObjectPool: Send + Sync {
    /// The pooled value.
    type Item: Send;

    /// Acquires an item from the object pool.
    ///
    /// The item is empty, but may have less capacity than the caller needs. Callers are responsible for growing it.
    fn acquire(&self) -> Self::Item;

    /// Returns an item to the object pool.
    ///
    /// The item is cleared, and may be dropped instead of being retained.
    fn release(&self, item: Self::Item);
}

impl<P> ObjectPool for &P
where
    P: ObjectPool,
{
    type Item = P::Item;

    fn acquire(&self) -> Self::Item {
        (**self).acquire()
    }

    fn release(&self, item: Self::Item) {
        (**self).release(item)
    }
}

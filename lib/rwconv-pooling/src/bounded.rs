use std::sync::Arc;

use crossbeam_queue::ArrayQueue;
use snafu::{ensure, Snafu};
use tracing::trace;

use crate::{telemetry::PoolMetrics, ObjectPool, Poolable};

const DEFAULT_MAX_IDLE_ITEMS: usize = 1024;

/// An error that occurred while building a [`BoundedObjectPool`].
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(context(suffix(false)))]
pub enum PoolBuildError {
    /// The pool name was empty.
    #[snafu(display("Pool name must not be empty."))]
    EmptyName,

    /// The configured capacities can never produce a retained item.
    #[snafu(display(
        "Pool '{}' has invalid capacities: initial capacity {} must not exceed maximum capacity {}, and maximum capacity must be non-zero.",
        pool_name,
        initial,
        max
    ))]
    InvalidCapacity {
        /// Name of the pool.
        pool_name: String,

        /// Configured initial capacity.
        initial: usize,

        /// Configured maximum capacity.
        max: usize,
    },

    /// The pool was configured to retain no idle items.
    #[snafu(display("Pool '{}' must be allowed to retain at least one idle item.", pool_name))]
    ZeroIdleItems {
        /// Name of the pool.
        pool_name: String,
    },
}

/// Builder for creating a [`BoundedObjectPool`].
pub struct BoundedObjectPoolBuilder<T> {
    name: String,
    initial_capacity: usize,
    max_capacity: usize,
    max_idle_items: Option<usize>,
    _item: std::marker::PhantomData<fn() -> T>,
}

impl<T: Poolable> BoundedObjectPoolBuilder<T> {
    /// Sets the capacity used when constructing brand new items.
    ///
    /// Defaults to 0.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the maximum capacity of items that are retained when released.
    ///
    /// Items whose capacity exceeds this value are dropped when released rather than being returned to the pool.
    ///
    /// Defaults to `usize::MAX`.
    pub fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the maximum number of idle items held by the pool.
    ///
    /// When the pool already holds this many idle items, released items are dropped.
    ///
    /// Defaults to 1024.
    pub fn with_max_idle_items(mut self, max_idle_items: usize) -> Self {
        self.max_idle_items = Some(max_idle_items);
        self
    }

    /// Builds a [`BoundedObjectPool`] from the current configuration.
    ///
    /// # Errors
    ///
    /// If the pool name is empty, if the initial capacity exceeds the maximum capacity, if the maximum capacity is zero,
    /// or if the pool may not retain any idle items, an error is returned.
    pub fn build(self) -> Result<BoundedObjectPool<T>, PoolBuildError> {
        ensure!(!self.name.is_empty(), EmptyName);
        ensure!(
            self.max_capacity > 0 && self.initial_capacity <= self.max_capacity,
            InvalidCapacity {
                pool_name: self.name.clone(),
                initial: self.initial_capacity,
                max: self.max_capacity,
            }
        );

        let max_idle_items = self.max_idle_items.unwrap_or(DEFAULT_MAX_IDLE_ITEMS);
        ensure!(
            max_idle_items > 0,
            ZeroIdleItems {
                pool_name: self.name.clone(),
            }
        );

        let metrics = PoolMetrics::new(&self.name);

        Ok(BoundedObjectPool {
            state: Arc::new(PoolState {
                items: ArrayQueue::new(max_idle_items),
                initial_capacity: self.initial_capacity,
                max_capacity: self.max_capacity,
                metrics,
                name: self.name,
            }),
        })
    }
}

struct PoolState<T> {
    name: String,
    items: ArrayQueue<T>,
    initial_capacity: usize,
    max_capacity: usize,
    metrics: PoolMetrics,
}

/// A thread-safe object pool with bounded retention.
///
/// Items are created on demand when the pool has no idle items. Released items are cleared and kept for reuse, unless
/// they have no capacity at all, they have grown beyond the configured maximum capacity, or the pool already holds its
/// maximum number of idle items. In those cases, the item is simply dropped.
///
/// Cloning the pool is cheap, and all clones share the same idle items.
pub struct BoundedObjectPool<T> {
    state: Arc<PoolState<T>>,
}

impl<T: Poolable> BoundedObjectPool<T> {
    /// Creates a new `BoundedObjectPoolBuilder` with the given pool name.
    ///
    /// The pool name is used to label the pool's metrics.
    pub fn builder<S: Into<String>>(name: S) -> BoundedObjectPoolBuilder<T> {
        BoundedObjectPoolBuilder {
            name: name.into(),
            initial_capacity: 0,
            max_capacity: usize::MAX,
            max_idle_items: None,
            _item: std::marker::PhantomData,
        }
    }

    /// Returns the name of the pool.
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Returns the capacity used when constructing brand new items.
    pub fn initial_capacity(&self) -> usize {
        self.state.initial_capacity
    }

    /// Returns the maximum capacity of items that are retained when released.
    pub fn max_capacity(&self) -> usize {
        self.state.max_capacity
    }

    /// Returns the number of idle items currently held by the pool.
    pub fn idle(&self) -> usize {
        self.state.items.len()
    }
}

impl<T> Clone for BoundedObjectPool<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Poolable> ObjectPool for BoundedObjectPool<T> {
    type Item = T;

    fn acquire(&self) -> T {
        let state = &self.state;
        state.metrics.acquired().increment(1);

        match state.items.pop() {
            Some(item) => {
                state.metrics.idle().decrement(1.0);
                item
            }
            None => {
                state.metrics.created().increment(1);
                T::with_capacity(state.initial_capacity)
            }
        }
    }

    fn release(&self, mut item: T) {
        let state = &self.state;
        state.metrics.released().increment(1);

        item.clear();

        let capacity = item.capacity();
        if capacity == 0 || capacity > state.max_capacity {
            trace!(
                pool_name = %state.name,
                capacity,
                max_capacity = state.max_capacity,
                "Discarding released item outside of retainable capacity."
            );
            state.metrics.discarded().increment(1);
            return;
        }

        match state.items.push(item) {
            Ok(()) => state.metrics.idle().increment(1.0),
            Err(_) => {
                trace!(pool_name = %state.name, "Pool is full. Discarding released item.");
                state.metrics.discarded().increment(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use metrics::{SharedString, Unit};
    use metrics_util::{
        debugging::{DebugValue, DebuggingRecorder},
        CompositeKey,
    };
    use proptest::prelude::*;

    use super::*;
    use crate::{telemetry, Clearable};

    type Snapshot = Vec<(CompositeKey, Option<Unit>, Option<SharedString>, DebugValue)>;

    fn get_counter_value(metrics: &Snapshot, key: &str) -> u64 {
        metrics
            .iter()
            .find(|(k, _, _, _)| k.key().name() == key)
            .map(|(_, _, _, value)| match value {
                DebugValue::Counter(value) => *value,
                other => panic!("expected a counter, got: {:?}", other),
            })
            .unwrap_or_else(|| panic!("no metric found with key: {}", key))
    }

    fn get_gauge_value(metrics: &Snapshot, key: &str) -> f64 {
        metrics
            .iter()
            .find(|(k, _, _, _)| k.key().name() == key)
            .map(|(_, _, _, value)| match value {
                DebugValue::Gauge(value) => value.into_inner(),
                other => panic!("expected a gauge, got: {:?}", other),
            })
            .unwrap_or_else(|| panic!("no metric found with key: {}", key))
    }

    fn refs_pool(initial: usize, max: usize) -> BoundedObjectPool<Vec<u32>> {
        BoundedObjectPool::builder("test_refs")
            .with_initial_capacity(initial)
            .with_max_capacity(max)
            .with_max_idle_items(8)
            .build()
            .expect("valid pool configuration")
    }

    #[test]
    fn acquire_from_empty_pool_uses_initial_capacity() {
        let pool = refs_pool(20, 200);

        let item = pool.acquire();
        assert!(item.is_empty());
        assert!(item.capacity() >= 20);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn released_item_is_reused() {
        let pool = refs_pool(20, 200);

        let mut item = pool.acquire();
        item.extend(0..50);
        let capacity = item.capacity();
        pool.release(item);
        assert_eq!(pool.idle(), 1);

        let item = pool.acquire();
        assert!(item.is_empty());
        assert_eq!(item.capacity(), capacity);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn oversized_item_is_discarded() {
        let pool = refs_pool(20, 200);

        let mut item = pool.acquire();
        item.extend(0..1000);
        assert!(item.capacity() > 200);
        pool.release(item);
        assert_eq!(pool.idle(), 0);

        let item = pool.acquire();
        assert!(item.capacity() <= 200);
    }

    #[test]
    fn zero_capacity_item_is_discarded() {
        let pool = refs_pool(0, 200);

        let item = pool.acquire();
        assert_eq!(item.capacity(), 0);
        pool.release(item);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn full_pool_discards_released_items() {
        let pool = BoundedObjectPool::<Vec<u32>>::builder("tiny")
            .with_initial_capacity(4)
            .with_max_capacity(16)
            .with_max_idle_items(2)
            .build()
            .expect("valid pool configuration");

        let items = (0..4).map(|_| pool.acquire()).collect::<Vec<_>>();
        for item in items {
            pool.release(item);
        }
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn release_clears_nested_ownership() {
        let pool = BoundedObjectPool::<Vec<Vec<u32>>>::builder("nested")
            .with_initial_capacity(4)
            .with_max_capacity(16)
            .build()
            .expect("valid pool configuration");

        let mut item = pool.acquire();
        item.push(vec![1, 2, 3]);
        item.push(vec![4, 5, 6]);
        pool.release(item);

        let item = pool.acquire();
        assert!(item.is_empty());
    }

    #[test]
    fn clones_share_idle_items() {
        let pool = refs_pool(20, 200);
        let other = pool.clone();

        pool.release(pool.acquire());
        assert_eq!(other.idle(), 1);
        assert_eq!(other.name(), "test_refs");
    }

    #[test]
    fn invalid_configurations() {
        let result = BoundedObjectPool::<Vec<u32>>::builder("").build();
        assert_eq!(result.err(), Some(PoolBuildError::EmptyName));

        let result = BoundedObjectPool::<Vec<u32>>::builder("bad")
            .with_initial_capacity(300)
            .with_max_capacity(200)
            .build();
        assert_eq!(
            result.err(),
            Some(PoolBuildError::InvalidCapacity {
                pool_name: "bad".to_string(),
                initial: 300,
                max: 200,
            })
        );

        let result = BoundedObjectPool::<Vec<u32>>::builder("bad").with_max_capacity(0).build();
        assert!(matches!(result, Err(PoolBuildError::InvalidCapacity { .. })));

        let result = BoundedObjectPool::<Vec<u32>>::builder("bad").with_max_idle_items(0).build();
        assert_eq!(
            result.err(),
            Some(PoolBuildError::ZeroIdleItems {
                pool_name: "bad".to_string()
            })
        );
    }

    #[test]
    fn concurrent_acquire_release() {
        let pool = refs_pool(20, 200);

        std::thread::scope(|s| {
            for worker in 0..4u32 {
                let pool = pool.clone();
                s.spawn(move || {
                    for i in 0..1000u32 {
                        let mut item = pool.acquire();
                        assert!(item.is_empty());
                        item.push(worker);
                        item.push(i);
                        pool.release(item);
                    }
                });
            }
        });

        assert!(pool.idle() <= 4);
    }

    #[test]
    fn telemetry() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let pool = refs_pool(20, 200);

            let small = pool.acquire();
            let mut large = pool.acquire();
            large.extend(0..1000);

            pool.release(small);
            pool.release(large);
            let _reused = pool.acquire();
        });

        let metrics = snapshotter.snapshot().into_vec();
        assert_eq!(get_counter_value(&metrics, telemetry::ACQUIRED_TOTAL), 3);
        assert_eq!(get_counter_value(&metrics, telemetry::CREATED_TOTAL), 2);
        assert_eq!(get_counter_value(&metrics, telemetry::RELEASED_TOTAL), 2);
        assert_eq!(get_counter_value(&metrics, telemetry::DISCARDED_TOTAL), 1);
        assert_eq!(get_gauge_value(&metrics, telemetry::IDLE), 0.0);
    }

    struct Marker {
        cleared: bool,
        capacity: usize,
    }

    impl Clearable for Marker {
        fn clear(&mut self) {
            self.cleared = true;
        }
    }

    impl Poolable for Marker {
        fn with_capacity(capacity: usize) -> Self {
            Self {
                cleared: false,
                capacity,
            }
        }

        fn capacity(&self) -> usize {
            self.capacity
        }
    }

    #[test]
    fn custom_poolable_is_cleared_on_release() {
        let pool = BoundedObjectPool::<Marker>::builder("markers")
            .with_initial_capacity(1)
            .with_max_capacity(1)
            .build()
            .expect("valid pool configuration");

        let item = pool.acquire();
        assert!(!item.cleared);
        pool.release(item);

        let item = pool.acquire();
        assert!(item.cleared);
    }

    proptest! {
        #[test]
        fn property_test_retained_capacity_is_bounded(lens in proptest::collection::vec(0usize..600, 1..32)) {
            // Whatever sizes callers grow their buffers to, nothing above the maximum capacity ever comes back out of
            // the pool.
            let pool = refs_pool(20, 200);

            for len in &lens {
                let mut item = pool.acquire();
                item.extend(0..*len as u32);
                pool.release(item);
            }

            for _ in 0..lens.len() {
                let item = pool.acquire();
                prop_assert!(item.capacity() <= 200);
            }
        }
    }
}

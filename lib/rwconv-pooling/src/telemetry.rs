use metrics::{counter, gauge, Counter, Gauge};

pub(crate) const ACQUIRED_TOTAL: &str = "object_pool_acquired_total";
pub(crate) const CREATED_TOTAL: &str = "object_pool_created_total";
pub(crate) const RELEASED_TOTAL: &str = "object_pool_released_total";
pub(crate) const DISCARDED_TOTAL: &str = "object_pool_discarded_total";
pub(crate) const IDLE: &str = "object_pool_idle";

/// Per-pool metrics, all labelled with the pool name.
#[derive(Clone)]
pub(crate) struct PoolMetrics {
    acquired: Counter,
    created: Counter,
    released: Counter,
    discarded: Counter,
    idle: Gauge,
}

impl PoolMetrics {
    pub fn new(pool_name: &str) -> Self {
        let pool_name = pool_name.to_string();

        Self {
            acquired: counter!(ACQUIRED_TOTAL, "pool_name" => pool_name.clone()),
            created: counter!(CREATED_TOTAL, "pool_name" => pool_name.clone()),
            released: counter!(RELEASED_TOTAL, "pool_name" => pool_name.clone()),
            discarded: counter!(DISCARDED_TOTAL, "pool_name" => pool_name.clone()),
            idle: gauge!(IDLE, "pool_name" => pool_name),
        }
    }

    pub fn acquired(&self) -> &Counter {
        &self.acquired
    }

    pub fn created(&self) -> &Counter {
        &self.created
    }

    pub fn released(&self) -> &Counter {
        &self.released
    }

    pub fn discarded(&self) -> &Counter {
        &self.discarded
    }

    pub fn idle(&self) -> &Gauge {
        &self.idle
    }
}

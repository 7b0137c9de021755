use rwconv_pooling::{BoundedObjectPool, PoolBuildError};
use rwconv_symbols::SymbolTableStorage;

use crate::{config::ConversionConfiguration, model::TimeSeriesRw2};

/// The object pools used during conversion.
///
/// Pools are shared between clones, so a single set of pools can back any number of converters across threads.
#[derive(Clone)]
pub struct ConversionPools {
    label_refs: BoundedObjectPool<Vec<u32>>,
    series: BoundedObjectPool<Vec<TimeSeriesRw2<'static>>>,
    symbols: BoundedObjectPool<Vec<&'static str>>,
    symbol_tables: BoundedObjectPool<SymbolTableStorage>,
}

impl ConversionPools {
    /// Creates a new `ConversionPools` from the given configuration.
    ///
    /// # Errors
    ///
    /// If any pool is configured with an initial capacity larger than its maximum capacity, a maximum capacity of zero,
    /// or no idle items, an error is returned.
    pub fn from_configuration(config: &ConversionConfiguration) -> Result<Self, PoolBuildError> {
        Ok(Self {
            label_refs: BoundedObjectPool::builder("rw2_label_refs")
                .with_initial_capacity(config.label_refs_initial_capacity)
                .with_max_capacity(config.label_refs_max_capacity)
                .with_max_idle_items(config.pool_max_idle_items)
                .build()?,
            series: BoundedObjectPool::builder("rw2_series")
                .with_initial_capacity(config.series_initial_capacity)
                .with_max_capacity(config.series_max_capacity)
                .with_max_idle_items(config.pool_max_idle_items)
                .build()?,
            symbols: BoundedObjectPool::builder("rw2_symbols")
                .with_initial_capacity(config.symbols_initial_capacity)
                .with_max_capacity(config.symbols_max_capacity)
                .with_max_idle_items(config.pool_max_idle_items)
                .build()?,
            symbol_tables: BoundedObjectPool::builder("rw2_symbol_tables")
                .with_initial_capacity(config.symbol_tables_initial_capacity)
                .with_max_capacity(config.symbol_tables_max_capacity)
                .with_max_idle_items(config.pool_max_idle_items)
                .build()?,
        })
    }

    /// Returns the pool of per-series label reference buffers.
    pub fn label_refs(&self) -> &BoundedObjectPool<Vec<u32>> {
        &self.label_refs
    }

    /// Returns the pool of converted series buffers.
    pub fn series(&self) -> &BoundedObjectPool<Vec<TimeSeriesRw2<'static>>> {
        &self.series
    }

    /// Returns the pool of exported symbol list buffers.
    pub fn symbols(&self) -> &BoundedObjectPool<Vec<&'static str>> {
        &self.symbols
    }

    /// Returns the pool of symbol table storage.
    pub fn symbol_tables(&self) -> &BoundedObjectPool<SymbolTableStorage> {
        &self.symbol_tables
    }
}

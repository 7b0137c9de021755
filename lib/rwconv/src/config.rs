//! Conversion configuration.
use rwconv_config::{ConfigurationError, ConfigurationLoader};
use serde::Deserialize;

const DEFAULT_LABEL_REFS_INITIAL_CAPACITY: usize = 20;
const DEFAULT_LABEL_REFS_MAX_CAPACITY: usize = 200;
const DEFAULT_SERIES_INITIAL_CAPACITY: usize = 100;
const DEFAULT_SERIES_MAX_CAPACITY: usize = 10_000;
const DEFAULT_SYMBOLS_INITIAL_CAPACITY: usize = 256;
const DEFAULT_SYMBOLS_MAX_CAPACITY: usize = 10_000;
const DEFAULT_SYMBOL_TABLES_INITIAL_CAPACITY: usize = 256;
const DEFAULT_SYMBOL_TABLES_MAX_CAPACITY: usize = 10_000;
const DEFAULT_POOL_MAX_IDLE_ITEMS: usize = 1024;

/// Conversion configuration.
///
/// Controls the sizing of the object pools used during conversion. Every pool has an initial capacity, used when a new
/// buffer has to be created, and a maximum capacity: buffers that grow beyond it are dropped instead of being pooled.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConversionConfiguration {
    /// Initial capacity of per-series label reference buffers.
    ///
    /// Defaults to 20.
    pub label_refs_initial_capacity: usize,

    /// Maximum capacity of pooled per-series label reference buffers.
    ///
    /// Defaults to 200.
    pub label_refs_max_capacity: usize,

    /// Initial capacity of converted series buffers.
    ///
    /// Defaults to 100.
    pub series_initial_capacity: usize,

    /// Maximum capacity of pooled converted series buffers.
    ///
    /// Defaults to 10,000.
    pub series_max_capacity: usize,

    /// Initial capacity of exported symbol list buffers.
    ///
    /// Defaults to 256.
    pub symbols_initial_capacity: usize,

    /// Maximum capacity of pooled exported symbol list buffers.
    ///
    /// Defaults to 10,000.
    pub symbols_max_capacity: usize,

    /// Initial capacity, in symbols, of symbol tables.
    ///
    /// Defaults to 256.
    pub symbol_tables_initial_capacity: usize,

    /// Maximum capacity, in symbols, of pooled symbol tables.
    ///
    /// Defaults to 10,000.
    pub symbol_tables_max_capacity: usize,

    /// Maximum number of idle buffers held by each pool.
    ///
    /// Defaults to 1024.
    pub pool_max_idle_items: usize,
}

impl Default for ConversionConfiguration {
    fn default() -> Self {
        Self {
            label_refs_initial_capacity: DEFAULT_LABEL_REFS_INITIAL_CAPACITY,
            label_refs_max_capacity: DEFAULT_LABEL_REFS_MAX_CAPACITY,
            series_initial_capacity: DEFAULT_SERIES_INITIAL_CAPACITY,
            series_max_capacity: DEFAULT_SERIES_MAX_CAPACITY,
            symbols_initial_capacity: DEFAULT_SYMBOLS_INITIAL_CAPACITY,
            symbols_max_capacity: DEFAULT_SYMBOLS_MAX_CAPACITY,
            symbol_tables_initial_capacity: DEFAULT_SYMBOL_TABLES_INITIAL_CAPACITY,
            symbol_tables_max_capacity: DEFAULT_SYMBOL_TABLES_MAX_CAPACITY,
            pool_max_idle_items: DEFAULT_POOL_MAX_IDLE_ITEMS,
        }
    }
}

impl ConversionConfiguration {
    /// Resolves a `ConversionConfiguration` from the given configuration loader.
    ///
    /// Fields missing from every configuration source take their default value.
    ///
    /// # Errors
    ///
    /// If a configured value has the wrong type, or a configuration source could not be read, an error is returned.
    pub fn from_loader(loader: ConfigurationLoader) -> Result<Self, ConfigurationError> {
        loader.into_typed()
    }
}

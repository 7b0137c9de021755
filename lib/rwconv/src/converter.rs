use metrics::{counter, Counter};
use rwconv_pooling::{recycle_vec, ObjectPool as _, PoolBuildError};
use rwconv_symbols::{CommonSymbols, SymbolTable, Symbolizer as _};
use snafu::Snafu;
use tracing::{debug, trace};

use crate::{
    config::ConversionConfiguration,
    convert::{convert_metadata, convert_series},
    model::{Payload, TimeSeriesRw2, WriteRequest, METRIC_NAME_LABEL},
    pools::ConversionPools,
};

/// Conversion error.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(context(suffix(false)))]
pub enum ConversionError {
    /// The write request already holds symbol-referenced series data.
    ///
    /// Conversion is not re-entrant: a converted request must never be fed back into the converter.
    #[snafu(display(
        "write request has already been converted ({} symbols, {} series)",
        symbols,
        series
    ))]
    AlreadyConverted {
        /// Number of symbols in the request.
        symbols: usize,

        /// Number of symbol-referenced series in the request.
        series: usize,
    },
}

#[derive(Clone)]
struct Telemetry {
    requests: Counter,
    series: Counter,
    metadata: Counter,
    symbols: Counter,
    errors: Counter,
}

impl Telemetry {
    fn new() -> Self {
        Self {
            requests: counter!("rw2_conversion_requests_total"),
            series: counter!("rw2_conversion_series_total"),
            metadata: counter!("rw2_conversion_metadata_total"),
            symbols: counter!("rw2_conversion_symbols_total"),
            errors: counter!("rw2_conversion_errors_total"),
        }
    }
}

/// Converts legacy write requests into their symbol-referenced form.
///
/// All buffers used by a conversion are drawn from a shared set of [`ConversionPools`]. Converted requests own pooled
/// buffers of their own, which should be handed back through [`RequestConverter::release`] once the request has been
/// consumed. Converted requests that are simply dropped are not leaked, but their buffers are not reused either.
///
/// Converters are cheap to clone, and clones share the same pools.
#[derive(Clone)]
pub struct RequestConverter {
    pools: ConversionPools,
    telemetry: Telemetry,
}

impl RequestConverter {
    /// Creates a new `RequestConverter` backed by the given pools.
    pub fn new(pools: ConversionPools) -> Self {
        Self {
            pools,
            telemetry: Telemetry::new(),
        }
    }

    /// Creates a new `RequestConverter` with pools sized according to the given configuration.
    ///
    /// # Errors
    ///
    /// If the pool configuration is invalid, an error is returned.
    pub fn from_configuration(config: &ConversionConfiguration) -> Result<Self, PoolBuildError> {
        let pools = ConversionPools::from_configuration(config)?;
        debug!(
            label_refs_max_capacity = config.label_refs_max_capacity,
            series_max_capacity = config.series_max_capacity,
            symbols_max_capacity = config.symbols_max_capacity,
            symbol_tables_max_capacity = config.symbol_tables_max_capacity,
            pool_max_idle_items = config.pool_max_idle_items,
            "Created request converter."
        );

        Ok(Self::new(pools))
    }

    /// Returns the pools backing this converter.
    pub fn pools(&self) -> &ConversionPools {
        &self.pools
    }

    /// Converts a legacy write request into its symbol-referenced form.
    ///
    /// Strings found in `common` are given references starting at `offset`, and occupy that range of the output symbol
    /// list. Every other string is given the next free reference in the order it is first seen. When `common` is
    /// `None` or empty, `offset` has no effect.
    ///
    /// Each metric family metadata entry is folded into a synthetic series of its own, holding only the metric name
    /// label and the converted metadata. These are appended after all of the input series.
    ///
    /// The output borrows samples, histograms, and strings from `input` (and strings from `common`), so both must
    /// outlive it. The input is left untouched.
    ///
    /// If `input` is `None`, `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// If `input` already holds symbol-referenced series or symbols, an error is returned. Nothing is acquired from the
    /// pools in this case.
    pub fn convert<'a>(
        &self, input: Option<&'a WriteRequest<'_>>, common: Option<&'a CommonSymbols>, offset: u32,
    ) -> Result<Option<WriteRequest<'a>>, ConversionError> {
        let Some(input) = input else {
            return Ok(None);
        };

        if let Payload::Symbolized { symbols, timeseries } = &input.payload {
            if !symbols.is_empty() || !timeseries.is_empty() {
                self.telemetry.errors.increment(1);
                return AlreadyConverted {
                    symbols: symbols.len(),
                    series: timeseries.len(),
                }
                .fail();
            }
        }

        let input_series = input.timeseries();
        let input_metadata = input.metadata();

        let mut table = SymbolTable::from_storage(self.pools.symbol_tables().acquire());
        if let Some(common) = common {
            table.configure_common_symbols(offset, common);
        }

        let expected_series = input_series.len() + input_metadata.len();
        let pooled = self.pools.series().acquire();
        let mut timeseries: Vec<TimeSeriesRw2<'a>> = if pooled.capacity() < expected_series {
            self.pools.series().release(pooled);
            Vec::with_capacity(expected_series)
        } else {
            pooled
        };

        for series in input_series {
            timeseries.push(convert_series(series, &mut table, self.pools.label_refs()));
        }

        for metadata in input_metadata {
            let mut labels_refs = self.pools.label_refs().acquire();
            labels_refs.push(table.symbolize(METRIC_NAME_LABEL));
            labels_refs.push(table.symbolize(&metadata.metric_family_name));

            timeseries.push(TimeSeriesRw2 {
                labels_refs,
                samples: &[],
                histograms: &[],
                exemplars: None,
                metadata: convert_metadata(Some(metadata), &mut table),
                created_timestamp: 0,
            });
        }

        let symbols = table.export_into(self.pools.symbols().acquire());
        self.pools.symbol_tables().release(table.into_storage());

        self.telemetry.requests.increment(1);
        self.telemetry.series.increment(input_series.len() as u64);
        self.telemetry.metadata.increment(input_metadata.len() as u64);
        self.telemetry.symbols.increment(symbols.len() as u64);

        trace!(
            series = input_series.len(),
            metadata = input_metadata.len(),
            symbols = symbols.len(),
            "Converted write request."
        );

        Ok(Some(WriteRequest {
            source: input.source,
            skip_label_validation: input.skip_label_validation,
            skip_label_count_validation: input.skip_label_count_validation,
            skip_unmarshaling_exemplars: input.skip_unmarshaling_exemplars,
            payload: Payload::Symbolized { symbols, timeseries },
        }))
    }

    /// Releases the pooled buffers held by a converted write request.
    ///
    /// Legacy requests are simply dropped.
    pub fn release(&self, request: WriteRequest<'_>) {
        let Payload::Symbolized {
            symbols,
            mut timeseries,
        } = request.payload
        else {
            return;
        };

        for series in timeseries.drain(..) {
            self.pools.label_refs().release(series.labels_refs);
        }

        self.pools.series().release(recycle_vec(timeseries));
        self.pools.symbols().release(recycle_vec(symbols));
    }
}

//! Write request data model.

mod legacy;
pub use self::legacy::{
    BucketSpan, Exemplar, Histogram, HistogramCount, Label, MetricMetadata, MetricType, ResetHint, Sample, TimeSeries,
};

mod request;
pub use self::request::{Payload, WriteRequest, WriteSource};

mod symbolized;
pub use self::symbolized::{ExemplarRw2, MetadataRw2, MetricTypeRw2, TimeSeriesRw2};

/// Name of the reserved label holding the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

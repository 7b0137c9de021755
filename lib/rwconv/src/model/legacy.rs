//! Legacy (string-labelled) write request types.

/// A label pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Label {
    /// Label name.
    pub name: String,

    /// Label value.
    pub value: String,
}

impl Label {
    /// Creates a new `Label` from the given name and value.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A float sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    /// Sample value.
    pub value: f64,

    /// Timestamp of the sample, in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// A native histogram count, either integer or float.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HistogramCount {
    /// Integer count, used by integer histograms.
    Int(u64),

    /// Float count, used by float histograms.
    Float(f64),
}

impl Default for HistogramCount {
    fn default() -> Self {
        Self::Int(0)
    }
}

/// Hint about whether a native histogram sample follows a counter reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetHint {
    /// Unknown whether there was a counter reset.
    #[default]
    Unknown,

    /// There was a counter reset.
    Yes,

    /// There was no counter reset.
    No,

    /// The histogram is a gauge histogram, where counter resets do not apply.
    Gauge,
}

/// A span of consecutive native histogram buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BucketSpan {
    /// Gap to the previous span, or the starting bucket index for the first span.
    pub offset: i32,

    /// Number of consecutive buckets.
    pub length: u32,
}

/// A native histogram sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram {
    /// Total number of observations.
    pub count: HistogramCount,

    /// Sum of all observations.
    pub sum: f64,

    /// Resolution of the bucket boundaries.
    pub schema: i32,

    /// Width of the zero bucket.
    pub zero_threshold: f64,

    /// Number of observations in the zero bucket.
    pub zero_count: HistogramCount,

    /// Negative bucket spans.
    pub negative_spans: Vec<BucketSpan>,

    /// Delta-encoded negative bucket counts, for integer histograms.
    pub negative_deltas: Vec<i64>,

    /// Absolute negative bucket counts, for float histograms.
    pub negative_counts: Vec<f64>,

    /// Positive bucket spans.
    pub positive_spans: Vec<BucketSpan>,

    /// Delta-encoded positive bucket counts, for integer histograms.
    pub positive_deltas: Vec<i64>,

    /// Absolute positive bucket counts, for float histograms.
    pub positive_counts: Vec<f64>,

    /// Counter reset hint.
    pub reset_hint: ResetHint,

    /// Timestamp of the sample, in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,

    /// Custom bucket boundaries, for histograms with custom buckets.
    pub custom_values: Vec<f64>,
}

/// An exemplar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Exemplar {
    /// Exemplar labels, such as a trace ID.
    pub labels: Vec<Label>,

    /// Exemplar value.
    pub value: f64,

    /// Timestamp of the exemplar, in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// A time series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    /// Labels identifying the series, in order.
    pub labels: Vec<Label>,

    /// Float samples.
    pub samples: Vec<Sample>,

    /// Native histogram samples.
    pub histograms: Vec<Histogram>,

    /// Exemplars.
    ///
    /// `None` and `Some(vec![])` are distinct: callers may branch on whether exemplars were present at all.
    pub exemplars: Option<Vec<Exemplar>>,

    /// Created timestamp of the series, in milliseconds since the Unix epoch, or zero when unset.
    pub created_timestamp: i64,
}

impl TimeSeries {
    /// Creates a new `TimeSeries` with the given labels and no data.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Label>,
    {
        Self {
            labels: labels.into_iter().collect(),
            ..Default::default()
        }
    }
}

/// Metric type of a metric family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MetricType {
    /// Unknown metric type.
    #[default]
    Unknown,

    /// Counter.
    Counter,

    /// Gauge.
    Gauge,

    /// Histogram.
    Histogram,

    /// Gauge histogram.
    GaugeHistogram,

    /// Summary.
    Summary,

    /// Info.
    Info,

    /// State set.
    StateSet,
}

/// Metadata about a metric family.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricMetadata {
    /// Metric type.
    pub metric_type: MetricType,

    /// Name of the metric family.
    pub metric_family_name: String,

    /// Help text.
    pub help: String,

    /// Unit.
    pub unit: String,
}

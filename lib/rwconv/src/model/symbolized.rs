//! Symbol-referenced write request types.
//!
//! Every string is replaced by a `u32` reference into the symbol list of the request it belongs to. References are
//! meaningless outside of that symbol list.
use super::legacy::{Histogram, MetricType, Sample};

/// Metric type of a metric family, in symbol-referenced form.
///
/// Variants line up one-to-one with [`MetricType`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MetricTypeRw2 {
    /// Unspecified metric type.
    #[default]
    Unspecified,

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

impl From<MetricType> for MetricTypeRw2 {
    fn from(metric_type: MetricType) -> Self {
        match metric_type {
            MetricType::Unknown => Self::Unspecified,
            MetricType::Counter => Self::Counter,
            MetricType::Gauge => Self::Gauge,
            MetricType::Histogram => Self::Histogram,
            MetricType::GaugeHistogram => Self::GaugeHistogram,
            MetricType::Summary => Self::Summary,
            MetricType::Info => Self::Info,
            MetricType::StateSet => Self::StateSet,
        }
    }
}

/// Metric family metadata, in symbol-referenced form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetadataRw2 {
    /// Metric type.
    pub metric_type: MetricTypeRw2,

    /// Reference to the help text.
    pub help_ref: u32,

    /// Reference to the unit.
    pub unit_ref: u32,
}

impl MetadataRw2 {
    /// Returns `true` if this is the zero value, carrying no metadata.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An exemplar, in symbol-referenced form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExemplarRw2 {
    /// Interleaved name/value label references.
    pub labels_refs: Vec<u32>,

    /// Exemplar value.
    pub value: f64,

    /// Timestamp of the exemplar, in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// A time series, in symbol-referenced form.
///
/// Samples and histograms are borrowed from the legacy series this was converted from, so the legacy request must
/// outlive it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeriesRw2<'a> {
    /// Interleaved name/value label references, in the order of the original labels.
    pub labels_refs: Vec<u32>,

    /// Float samples.
    pub samples: &'a [Sample],

    /// Native histogram samples.
    pub histograms: &'a [Histogram],

    /// Exemplars.
    pub exemplars: Option<Vec<ExemplarRw2>>,

    /// Metric family metadata.
    ///
    /// Only populated on series synthesized from metric metadata.
    pub metadata: MetadataRw2,

    /// Created timestamp of the series, in milliseconds since the Unix epoch, or zero when unset.
    pub created_timestamp: i64,
}

impl<'a> TimeSeriesRw2<'a> {
    /// Returns an iterator over the `(name, value)` pairs of this series, resolved against the given symbol list.
    ///
    /// Returns `None` for a pair if either reference is out of bounds.
    pub fn labels<'s>(&'s self, symbols: &'s [&'a str]) -> impl Iterator<Item = Option<(&'a str, &'a str)>> + 's {
        self.labels_refs.chunks(2).map(move |pair| match pair {
            [name, value] => Some((*symbols.get(*name as usize)?, *symbols.get(*value as usize)?)),
            _ => None,
        })
    }
}

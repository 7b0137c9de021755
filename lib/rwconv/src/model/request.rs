use super::{
    legacy::{MetricMetadata, TimeSeries},
    symbolized::TimeSeriesRw2,
};

/// Origin of a write request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteSource {
    /// Written through the public API.
    #[default]
    Api,

    /// Written by rule evaluation.
    Rule,
}

/// Series data of a write request.
///
/// A request holds either legacy or symbol-referenced series, never both.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload<'a> {
    /// String-labelled series and metric family metadata.
    Legacy {
        /// Series.
        timeseries: Vec<TimeSeries>,

        /// Metric family metadata.
        metadata: Vec<MetricMetadata>,
    },

    /// Symbol-referenced series, with metric family metadata folded into series of their own.
    Symbolized {
        /// Symbol list that every reference in `timeseries` indexes into.
        symbols: Vec<&'a str>,

        /// Series.
        timeseries: Vec<TimeSeriesRw2<'a>>,
    },
}

impl Default for Payload<'_> {
    fn default() -> Self {
        Self::Legacy {
            timeseries: Vec::new(),
            metadata: Vec::new(),
        }
    }
}

/// A batch of series to write.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteRequest<'a> {
    /// Origin of the request.
    pub source: WriteSource,

    /// Whether label validation should be skipped.
    pub skip_label_validation: bool,

    /// Whether label count validation should be skipped.
    pub skip_label_count_validation: bool,

    /// Whether exemplars were skipped when the request was decoded.
    pub skip_unmarshaling_exemplars: bool,

    /// Series data.
    pub payload: Payload<'a>,
}

impl WriteRequest<'static> {
    /// Creates a new legacy `WriteRequest` from the given series and metadata.
    pub fn legacy(timeseries: Vec<TimeSeries>, metadata: Vec<MetricMetadata>) -> Self {
        Self {
            payload: Payload::Legacy { timeseries, metadata },
            ..Default::default()
        }
    }
}

impl<'a> WriteRequest<'a> {
    /// Returns `true` if the request holds symbol-referenced series data.
    pub fn is_symbolized(&self) -> bool {
        matches!(self.payload, Payload::Symbolized { .. })
    }

    /// Returns the legacy series, or an empty slice if the request is symbolized.
    pub fn timeseries(&self) -> &[TimeSeries] {
        match &self.payload {
            Payload::Legacy { timeseries, .. } => timeseries,
            Payload::Symbolized { .. } => &[],
        }
    }

    /// Returns the legacy metric family metadata, or an empty slice if the request is symbolized.
    pub fn metadata(&self) -> &[MetricMetadata] {
        match &self.payload {
            Payload::Legacy { metadata, .. } => metadata,
            Payload::Symbolized { .. } => &[],
        }
    }

    /// Returns the symbol list, or an empty slice if the request is legacy.
    pub fn symbols(&self) -> &[&'a str] {
        match &self.payload {
            Payload::Symbolized { symbols, .. } => symbols,
            Payload::Legacy { .. } => &[],
        }
    }

    /// Returns the symbol-referenced series, or an empty slice if the request is legacy.
    pub fn timeseries_rw2(&self) -> &[TimeSeriesRw2<'a>] {
        match &self.payload {
            Payload::Symbolized { timeseries, .. } => timeseries,
            Payload::Legacy { .. } => &[],
        }
    }
}

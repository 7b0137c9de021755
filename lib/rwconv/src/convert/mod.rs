//! Structural conversion of legacy series, exemplars, and metadata into their symbol-referenced forms.
use rwconv_pooling::ObjectPool;
use rwconv_symbols::Symbolizer;

use crate::model::{Exemplar, ExemplarRw2, Label, MetadataRw2, MetricMetadata, TimeSeries, TimeSeriesRw2};

const STRINGS_PER_LABEL: usize = 2;

fn symbolize_labels<'a, S>(labels: &'a [Label], symbols: &mut S, refs: &mut Vec<u32>)
where
    S: Symbolizer<'a>,
{
    for label in labels {
        refs.push(symbols.symbolize(&label.name));
        refs.push(symbols.symbolize(&label.value));
    }
}

/// Converts a legacy series into its symbol-referenced form.
///
/// The label references are written into a buffer acquired from `label_refs_pool`, which is grown to fit the series if
/// the pooled buffer is too small. Samples and histograms are borrowed from `series` rather than copied.
pub fn convert_series<'a, S, P>(series: &'a TimeSeries, symbols: &mut S, label_refs_pool: &P) -> TimeSeriesRw2<'a>
where
    S: Symbolizer<'a>,
    P: ObjectPool<Item = Vec<u32>>,
{
    let expected_refs = series.labels.len() * STRINGS_PER_LABEL;
    let mut labels_refs = label_refs_pool.acquire();
    if labels_refs.capacity() < expected_refs {
        labels_refs.reserve_exact(expected_refs);
    }

    symbolize_labels(&series.labels, symbols, &mut labels_refs);

    TimeSeriesRw2 {
        labels_refs,
        samples: &series.samples,
        histograms: &series.histograms,
        exemplars: convert_exemplars(series.exemplars.as_deref(), symbols),
        metadata: MetadataRw2::default(),
        created_timestamp: series.created_timestamp,
    }
}

/// Converts legacy exemplars into their symbol-referenced form.
///
/// An absent exemplar list stays absent, and an empty list stays empty.
pub fn convert_exemplars<'a, S>(exemplars: Option<&'a [Exemplar]>, symbols: &mut S) -> Option<Vec<ExemplarRw2>>
where
    S: Symbolizer<'a>,
{
    let exemplars = exemplars?;

    let converted = exemplars
        .iter()
        .map(|exemplar| {
            let mut labels_refs = Vec::with_capacity(exemplar.labels.len() * STRINGS_PER_LABEL);
            symbolize_labels(&exemplar.labels, symbols, &mut labels_refs);

            ExemplarRw2 {
                labels_refs,
                value: exemplar.value,
                timestamp_ms: exemplar.timestamp_ms,
            }
        })
        .collect();

    Some(converted)
}

/// Converts legacy metric family metadata into its symbol-referenced form.
///
/// Absent metadata converts to the zero value. Help and unit are always symbolized, even when empty.
pub fn convert_metadata<'a, S>(metadata: Option<&'a MetricMetadata>, symbols: &mut S) -> MetadataRw2
where
    S: Symbolizer<'a>,
{
    let Some(metadata) = metadata else {
        return MetadataRw2::default();
    };

    MetadataRw2 {
        metric_type: metadata.metric_type.into(),
        help_ref: symbols.symbolize(&metadata.help),
        unit_ref: symbols.symbolize(&metadata.unit),
    }
}

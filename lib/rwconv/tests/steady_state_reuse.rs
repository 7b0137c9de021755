use std::collections::HashMap;

use metrics::{Key, Label as MetricLabel, SharedString, Unit};
use metrics_util::{
    debugging::{DebugValue, DebuggingRecorder},
    CompositeKey, MetricKind,
};
use rwconv::{
    model::{Label, MetricMetadata, MetricType, TimeSeries, WriteRequest},
    CommonSymbols, ConversionConfiguration, RequestConverter,
};

const SERIES_PER_REQUEST: usize = 8;

type Snapshot = HashMap<CompositeKey, (Option<Unit>, Option<SharedString>, DebugValue)>;

fn pool_counter(snapshot: &Snapshot, name: &'static str, pool_name: &'static str) -> u64 {
    let key = CompositeKey::new(
        MetricKind::Counter,
        Key::from_parts(name, vec![MetricLabel::new("pool_name", pool_name)]),
    );

    match snapshot.get(&key) {
        Some((_, _, DebugValue::Counter(value))) => *value,
        _ => 0,
    }
}

fn request(round: usize) -> WriteRequest<'static> {
    let timeseries = (0..SERIES_PER_REQUEST)
        .map(|i| {
            TimeSeries::from_labels([
                Label::new("__name__", "http_requests_total"),
                Label::new("path", format!("/api/{}", i)),
                Label::new("round", round.to_string()),
            ])
        })
        .collect();

    let metadata = vec![MetricMetadata {
        metric_type: MetricType::Counter,
        metric_family_name: "http_requests_total".to_string(),
        help: "Total number of HTTP requests.".to_string(),
        unit: String::new(),
    }];

    WriteRequest::legacy(timeseries, metadata)
}

#[test]
fn released_buffers_are_reused() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let converter = RequestConverter::from_configuration(&ConversionConfiguration::default()).unwrap();
        let common = CommonSymbols::new(["__name__", "path"]);

        for round in 0..100 {
            let input = request(round);
            let output = converter.convert(Some(&input), Some(&common), 0).unwrap().unwrap();
            assert_eq!(output.timeseries_rw2().len(), SERIES_PER_REQUEST + 1);
            assert_eq!(&output.symbols()[..2], &["__name__", "path"]);
            converter.release(output);
        }
    });

    // Taking a snapshot resets counters, so all assertions read from this one.
    let snapshot = snapshotter.snapshot().into_hashmap();

    assert_eq!(pool_counter(&snapshot, "object_pool_created_total", "rw2_symbol_tables"), 1);
    assert_eq!(pool_counter(&snapshot, "object_pool_created_total", "rw2_series"), 1);
    assert_eq!(pool_counter(&snapshot, "object_pool_created_total", "rw2_symbols"), 1);
    assert_eq!(
        pool_counter(&snapshot, "object_pool_created_total", "rw2_label_refs"),
        SERIES_PER_REQUEST as u64 + 1
    );
    assert_eq!(
        pool_counter(&snapshot, "object_pool_acquired_total", "rw2_symbol_tables"),
        100
    );
    assert_eq!(pool_counter(&snapshot, "object_pool_discarded_total", "rw2_label_refs"), 0);
}

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rwconv::{
    model::{Label, MetricMetadata, MetricType, Sample, TimeSeries, WriteRequest},
    CommonSymbols, ConversionConfiguration, RequestConverter,
};

fn build_request(series_count: usize) -> WriteRequest<'static> {
    let timeseries = (0..series_count)
        .map(|i| {
            let mut series = TimeSeries::from_labels([
                Label::new("__name__", format!("metric_{}", i % 16)),
                Label::new("job", "bench"),
                Label::new("instance", format!("host-{}", i % 64)),
                Label::new("shard", i.to_string()),
            ]);
            series.samples = vec![Sample {
                value: i as f64,
                timestamp_ms: 1_700_000_000_000,
            }];
            series
        })
        .collect();

    let metadata = (0..16)
        .map(|i| MetricMetadata {
            metric_type: MetricType::Counter,
            metric_family_name: format!("metric_{}", i),
            help: "Benchmark metric.".to_string(),
            unit: String::new(),
        })
        .collect();

    WriteRequest::legacy(timeseries, metadata)
}

fn bench_convert(c: &mut Criterion) {
    let converter =
        RequestConverter::from_configuration(&ConversionConfiguration::default()).expect("default configuration is valid");
    let common = CommonSymbols::new(["", "__name__", "job", "instance"]);

    let mut group = c.benchmark_group("convert");
    for series_count in [10, 100, 1000] {
        let request = build_request(series_count);
        group.throughput(Throughput::Elements(series_count as u64));
        group.bench_with_input(BenchmarkId::new("pooled", series_count), &request, |b, request| {
            b.iter(|| {
                let output = converter
                    .convert(Some(request), Some(&common), 0)
                    .expect("request is not converted")
                    .expect("request is present");
                converter.release(output);
            });
        });
        group.bench_with_input(BenchmarkId::new("unreleased", series_count), &request, |b, request| {
            b.iter(|| converter.convert(Some(request), Some(&common), 0).expect("request is not converted"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);

use criterion::{criterion_group, Criterion};
use faultline::{
    ErrorClassifier, ErrorHandler, ErrorKind, ErrorOccurrence, HandlerConfig, LogRecord, LogSink,
    RequestMeta, SinkError,
};
use std::hint::black_box;

struct DiscardSink;

impl LogSink for DiscardSink {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        black_box(record);
        Ok(())
    }
}

/// Benchmarks for classification and the full report + render path
pub fn bench_handling(c: &mut Criterion) {
    let mut group = c.benchmark_group("handling");

    let classifier = ErrorClassifier::new();
    let validation = ErrorOccurrence::new(ErrorKind::ValidationFailure, "email is required");
    group.bench_function("classify", |b| b.iter(|| black_box(classifier.classify(black_box(&validation)))));

    let handler = ErrorHandler::new(HandlerConfig::default()).with_sink(DiscardSink);
    let html = RequestMeta::html();
    let json = RequestMeta::json();

    group.bench_function("handle/page", |b| {
        b.iter(|| {
            let occurrence = ErrorOccurrence::new(ErrorKind::other("db"), "connection refused");
            black_box(handler.handle(&occurrence, &html, &()))
        })
    });

    group.bench_function("handle/json", |b| {
        b.iter(|| {
            let occurrence = ErrorOccurrence::new(ErrorKind::other("db"), "connection refused");
            black_box(handler.handle(&occurrence, &json, &()))
        })
    });

    group.finish();
}

criterion_group!(handling_benches, bench_handling);

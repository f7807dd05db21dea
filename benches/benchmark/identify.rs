use criterion::{criterion_group, Criterion};
use faultline::{ErrorIdentifier, ErrorKind, ErrorOccurrence, IdentifierStrategy};
use std::hint::black_box;

/// Benchmarks for correlation id derivation
pub fn bench_identify(c: &mut Criterion) {
    let mut group = c.benchmark_group("identify");

    let short = ErrorOccurrence::new(ErrorKind::ValidationFailure, "email is required");
    let deep = ErrorOccurrence::new(ErrorKind::other("db"), "SQLSTATE[40001]: serialization failure")
        .with_trace((0..32).map(|depth| format!("frame #{depth}")));

    for strategy in [IdentifierStrategy::ContentAddressed, IdentifierStrategy::PerOccurrence] {
        let identifier = ErrorIdentifier::new(strategy);
        group.bench_function(format!("{strategy:?}/short"), |b| {
            b.iter(|| black_box(identifier.identify(black_box(&short))))
        });
        group.bench_function(format!("{strategy:?}/deep_trace"), |b| {
            b.iter(|| black_box(identifier.identify(black_box(&deep))))
        });
    }

    group.finish();
}

criterion_group!(identify_benches, bench_identify);

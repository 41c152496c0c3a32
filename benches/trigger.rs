use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use deprecations::{format_message, DeprecationRegistry};

/// Benchmark template rendering speed
fn bench_template_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_rendering");

    group.bench_function("no_placeholders", |b| {
        b.iter(|| format_message(black_box("this call is deprecated"), &[]))
    });

    group.bench_function("two_placeholders", |b| {
        b.iter(|| format_message(black_box("this is deprecated %s %d"), &[&"foo", &1234]))
    });

    group.finish();
}

/// Benchmark the trigger hot paths
fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger");
    group.throughput(Throughput::Elements(1));

    // Fully disabled registry: trigger must be cheap even when inert.
    group.bench_function("disabled", |b| {
        let registry = DeprecationRegistry::new();
        registry.disable();

        b.iter(|| {
            registry.trigger(
                black_box("acme/orm"),
                black_box("https://github.com/acme/orm/issues/1"),
                black_box("old API"),
                &[],
            )
        });
    });

    // Default state: counting only, no delivery.
    group.bench_function("tracking_only", |b| {
        let registry = DeprecationRegistry::new();

        b.iter(|| {
            registry.trigger(
                black_box("acme/orm"),
                black_box("https://github.com/acme/orm/issues/1"),
                black_box("old API"),
                &[],
            )
        });
    });

    // Warning backend active with deduplication: everything after the
    // first call takes the dedup early-out.
    group.bench_function("deduplicated", |b| {
        let registry = DeprecationRegistry::new();
        registry.enable_suppressed_warnings();
        registry.trigger("acme/orm", "https://github.com/acme/orm/issues/1", "warm", &[]);

        b.iter(|| {
            registry.trigger(
                black_box("acme/orm"),
                black_box("https://github.com/acme/orm/issues/1"),
                black_box("old API %s"),
                &[&"arg"],
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_template_rendering, bench_trigger);
criterion_main!(benches);

//! Request-Path Benchmarks — Per-Request Overhead Validation
//!
//! Benchmarks the two pieces of work added to every request: counter
//! observation and name validation, plus the `/metrics` encode path.
//!
//! Run with: cargo bench --bench metrics_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use user_directory::adapters::metrics::MetricsRegistry;
use user_directory::domain::user::NewUser;

/// Benchmark a single counter observation (runs on every request).
fn bench_observe_request(c: &mut Criterion) {
    let metrics = MetricsRegistry::new().unwrap();

    c.bench_function("observe_request", |b| {
        b.iter(|| {
            metrics.observe_request(black_box("GET"), black_box("/users"), black_box(200));
        });
    });
}

/// Benchmark the text exposition with a populated registry.
fn bench_text_encode(c: &mut Criterion) {
    let metrics = MetricsRegistry::new().unwrap();
    for route in ["/healthz", "/readiness", "/users", "/metrics"] {
        for status in [200u16, 400, 500, 503] {
            metrics.observe_request("GET", route, status);
            metrics.observe_request("POST", route, status);
        }
    }

    c.bench_function("metrics_text_encode", |b| {
        b.iter(|| {
            let _text = metrics.encode().unwrap();
        });
    });
}

/// Benchmark name validation (runs on every create).
fn bench_name_validation(c: &mut Criterion) {
    let request = NewUser {
        name: "Alice Liddell".to_string(),
    };

    c.bench_function("name_validation", |b| {
        b.iter(|| {
            let _ok = black_box(&request).validate().is_ok();
        });
    });
}

criterion_group!(
    benches,
    bench_observe_request,
    bench_text_encode,
    bench_name_validation,
);
criterion_main!(benches);

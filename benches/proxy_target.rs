//! Benchmark for upstream target URL construction and chart aggregation

use axum::http::Uri;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relay::api::target::{build_target_url, ProxyTarget};
use relay::client::{aggregate_daily, DailyData};

const BASE: &str = "https://n8n.example.com/webhook/";

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("proxy_target_resolve");

    let cases = [
        ("root", "/"),
        ("two_segments", "/tiktok/analytics"),
        ("query", "/tiktok/best-performers?limit=10&from=2024-01-01"),
        ("messy", "//a//b/c/d/e/f/?x=1&y=2&z=3"),
    ];

    for (name, path) in cases {
        let uri: Uri = path.parse().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &uri, |b, uri| {
            b.iter(|| ProxyTarget::resolve(black_box(BASE), black_box(uri)))
        });
    }

    group.finish();
}

fn bench_build_target_url(c: &mut Criterion) {
    c.bench_function("build_target_url", |b| {
        b.iter(|| {
            build_target_url(
                black_box(BASE),
                black_box("tiktok/analytics"),
                black_box(Some("from=2024-01-01&to=2024-01-31")),
            )
        })
    });
}

fn bench_aggregate_daily(c: &mut Criterion) {
    let rows: Vec<DailyData> = (0..365)
        .flat_map(|day| {
            let date = format!("2024-{:02}-{:02}", day % 12 + 1, day % 28 + 1);
            (0..4).map(move |i| DailyData {
                graph_date: date.clone(),
                daily_revenue: 100.0 + i as f64,
                daily_ad_spend: 25.0,
            })
        })
        .collect();

    c.bench_function("aggregate_daily_1460_rows", |b| {
        b.iter(|| aggregate_daily(black_box(&rows)))
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_build_target_url,
    bench_aggregate_daily
);
criterion_main!(benches);

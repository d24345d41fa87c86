//! Throughput of line classification and log aggregation

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use vpnwatch::logs::{aggregate, classify, render_text, DEFAULT_RECENT_LIMIT};

fn sample_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 5 {
            0 => format!(
                "2024-01-15 10:{:02}:{:02} wg0: Handshake for peer {} (10.0.{}.{}:51820) completed",
                (i / 60) % 60,
                i % 60,
                i,
                (i / 250) % 250,
                i % 250
            ),
            1 => format!("2024-01-15 10:30:00 peer 192.168.1.{} connected", i % 250),
            2 => "wg0: peer disconnected after keepalive timeout".to_string(),
            3 => format!("ERROR: handshake failed for 172.16.0.{}", i % 250),
            _ => "wg0: sending keepalive packet".to_string(),
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let lines = sample_lines(5);
    let mut group = c.benchmark_group("classify");

    for (i, line) in lines.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("line_kind", i), line, |b, line| {
            b.iter(|| classify(black_box(line)))
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in &[1_000, 10_000, 100_000] {
        let lines = sample_lines(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            b.iter(|| aggregate(black_box(lines.iter()), DEFAULT_RECENT_LIMIT))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let summary = aggregate(sample_lines(10_000), DEFAULT_RECENT_LIMIT);
    c.bench_function("render_text", |b| {
        b.iter(|| render_text(black_box("/var/log/wireguard.log"), black_box(&summary)))
    });
}

criterion_group!(benches, bench_classify, bench_aggregate, bench_render);
criterion_main!(benches);

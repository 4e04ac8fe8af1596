use checkbox_sync_engine::{Settings, parse_forest, sync_text};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
mod common;

fn bench_parse_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_forest");
    let settings = Settings::default();

    for roots in [10, 100, 1000] {
        let content = common::generate_checklist(roots, 3, 3);
        group.bench_with_input(BenchmarkId::from_parameter(roots), &content, |b, content| {
            b.iter(|| parse_forest(std::hint::black_box(content), &settings));
        });
    }

    group.finish();
}

fn bench_sync_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_text");
    group.sample_size(20);
    let settings = Settings::default();

    for roots in [10, 100, 1000] {
        let previous = common::generate_checklist(roots, 3, 3);
        let current = common::toggle_first_checkbox(&previous);

        group.bench_with_input(BenchmarkId::new("fresh", roots), &current, |b, current| {
            b.iter(|| sync_text(std::hint::black_box(current), None, &settings));
        });
        group.bench_with_input(BenchmarkId::new("toggle", roots), &current, |b, current| {
            b.iter(|| {
                sync_text(
                    std::hint::black_box(current),
                    Some(previous.as_str()),
                    &settings,
                )
            });
        });
    }

    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let settings = Settings::default();
    // One long chain exercises the explicit-stack traversal
    let previous = (0..2000)
        .map(|level| format!("{}- [ ] Level {level}", "  ".repeat(level)))
        .collect::<Vec<_>>()
        .join("\n");
    let current = previous.replacen("- [ ]", "- [x]", 1);

    c.bench_function("sync_text_deep_chain", |b| {
        b.iter(|| sync_text(std::hint::black_box(&current), Some(previous.as_str()), &settings));
    });
}

criterion_group!(benches, bench_parse_forest, bench_sync_text, bench_deep_nesting);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tabula_query::{SortDirection, SortMapping, compute_window, resolve_mapping};

// ── Window ──────────────────────────────────────────────────

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("window/compute");
    for total in [5usize, 12, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(total), &total, |b, &total| {
            b.iter(|| {
                for current in [0, total / 2, total - 1] {
                    std::hint::black_box(compute_window(total, current));
                }
            })
        });
    }
    group.finish();
}

// ── Resolve ─────────────────────────────────────────────────

fn bench_resolve(c: &mut Criterion) {
    let mapping = SortMapping::Nested {
        relation: "order.branch".into(),
        leaf: Some("branch_name".into()),
    };
    c.bench_function("resolve/nested", |b| {
        b.iter(|| resolve_mapping("branch", &mapping, SortDirection::Asc))
    });
}

criterion_group!(benches, bench_window, bench_resolve);
criterion_main!(benches);

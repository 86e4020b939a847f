use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use similarity::{Item, Ranker};

const TAGS: &[&str] = &[
    "architecture", "urban", "food", "nature", "landscape", "ocean", "forest", "portrait",
    "wildlife", "pets", "travel", "abstract", "macro", "night photography",
];

fn sample_item(i: usize, dim: usize) -> Item {
    let tags = (0..3).map(|k| TAGS[(i * 7 + k * 3) % TAGS.len()]);
    let embedding = (0..dim)
        .map(|d| (((i * 31 + d * 17) % 97) as f32 / 97.0) - 0.5)
        .collect();
    Item::new(format!("img-{i}"), "bench-admin")
        .with_tags(tags)
        .with_embedding(embedding)
}

fn bench_rank_pool_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_pool_size");
    let ranker = Ranker::default();
    let reference = sample_item(0, 512);

    for size in [100usize, 1_000, 10_000] {
        let pool: Vec<Item> = (1..=size).map(|i| sample_item(i, 512)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            b.iter(|| {
                let hits = ranker.rank(black_box(&reference), pool.iter().cloned(), 3);
                black_box(hits);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank_pool_size);
criterion_main!(benches);

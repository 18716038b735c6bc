use cultevo_sim::base::{PopulationSnapshot, Variant, VariantArena};
use cultevo_sim::evolution::{next_generation, CopyDistribution, GenerationBias, InnovationModel};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// A snapshot of `richness` variants with geometrically decaying counts.
fn skewed_snapshot(richness: usize) -> (PopulationSnapshot, VariantArena) {
    let mut arena = VariantArena::new();
    let pairs: Vec<(Variant, usize)> = (0..richness)
        .map(|i| (arena.mint(), 1 + (1000 >> (i % 10))))
        .collect();
    (PopulationSnapshot::from_counts(pairs), arena)
}

fn bench_copy_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_distribution");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    for &richness in &[10, 100, 1_000] {
        let (snapshot, _) = skewed_snapshot(richness);
        let counts = snapshot.counts();

        group.bench_with_input(BenchmarkId::new("build", richness), &counts, |b, counts| {
            b.iter(|| CopyDistribution::new(black_box(counts), black_box(0.3)))
        });

        let dist = CopyDistribution::new(&counts, 0.3);
        group.bench_with_input(BenchmarkId::new("sample", richness), &dist, |b, dist| {
            b.iter(|| dist.sample(&mut rng))
        });
    }

    group.finish();
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let innovation = InnovationModel::new(0.01).unwrap();
    let (snapshot, arena) = skewed_snapshot(50);

    group.throughput(Throughput::Elements(snapshot.size() as u64));

    let biases = [
        ("neutral", GenerationBias::Fixed(0.0)),
        ("conformist", GenerationBias::Fixed(0.5)),
        ("per_birth", GenerationBias::PerBirth { mean: 0.0, sd: 0.2 }),
    ];

    for (name, bias) in biases {
        group.bench_function(name, |b| {
            b.iter_batched(
                || arena.clone(),
                |mut arena| {
                    next_generation(&snapshot, &innovation, &bias, &mut arena, &mut rng)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_copy_distribution, bench_next_generation);
criterion_main!(benches);

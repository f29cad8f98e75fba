// Ranking benchmarks over synthetic county-sized tables
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use placesim_core::{AttributeId, Dataset, EntityId, EntityTable, EntityType, YearRange};
use placesim_similarity::{MultiRequest, SimilarityEngine, SimilarityRanker, SingleRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ATTRIBUTES: [AttributeId; 4] = [
    AttributeId::TOTAL_REVENUE,
    AttributeId::TOTAL_TAXES,
    AttributeId::TOTAL_EXPENDITURE,
    AttributeId::TOTAL_DEBT,
];

fn generate_table(entities: u64) -> EntityTable {
    let mut rng = StdRng::seed_from_u64(1967);
    let mut builder = EntityTable::builder(EntityType::County);

    for id in 0..entities {
        for year in 1967..=2016 {
            // roughly one year in ten is missing, except for the reference
            if id != 0 && rng.random_range(0..10) == 0 {
                continue;
            }
            let population = rng.random_range(1_000.0..5_000_000.0);
            builder
                .insert(EntityId(id), AttributeId::POPULATION, year, Some(population))
                .unwrap();
            for attribute in ATTRIBUTES {
                let per_capita = rng.random_range(100.0..10_000.0);
                builder
                    .insert(EntityId(id), attribute, year, Some(per_capita * population))
                    .unwrap();
            }
        }
    }
    builder.build()
}

fn benchmark_rank_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_single");

    for size in [100u64, 1000, 3000].iter() {
        let table = generate_table(*size);
        let ranker = SimilarityRanker::new(&table);
        let range = YearRange::new(1990, 2010).unwrap();

        group.bench_with_input(BenchmarkId::new("full_range", size), size, |b, _| {
            b.iter(|| {
                let result = ranker.rank_single(
                    black_box(EntityId(0)),
                    AttributeId::TOTAL_REVENUE,
                    AttributeId::POPULATION,
                    range,
                    10,
                );
                black_box(result)
            });
        });
    }

    group.finish();
}

fn benchmark_rank_multi(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_multi");
    let table = generate_table(3000);
    let ranker = SimilarityRanker::new(&table);

    for width in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::new("attributes", width), &width, |b, &width| {
            b.iter(|| {
                let result = ranker.rank_multi(
                    black_box(EntityId(0)),
                    &ATTRIBUTES[..width],
                    AttributeId::POPULATION,
                    2000,
                    10,
                );
                black_box(result)
            });
        });
    }

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let engine = SimilarityEngine::new(Dataset::from_tables([generate_table(3000)]));
    let single = SingleRequest::new(0u64, 1, AttributeId::TOTAL_TAXES).years(2000, 2005).count(5);
    let multi = MultiRequest::new(0u64, 1, ATTRIBUTES, 2005).count(5);

    c.bench_function("engine_single_validated", |b| {
        b.iter(|| black_box(engine.explain_single(black_box(&single))))
    });
    c.bench_function("engine_multi_validated", |b| {
        b.iter(|| black_box(engine.explain_multi(black_box(&multi))))
    });
}

criterion_group!(benches, benchmark_rank_single, benchmark_rank_multi, benchmark_engine);
criterion_main!(benches);

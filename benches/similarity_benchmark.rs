use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use single_exercises::loss::{l1_loss, l2_loss};
use single_exercises::similarity::cosine_similarity_matrix;
use single_exercises::utils::{random_matrix, random_vector};
use std::time::Duration;

#[derive(Clone)]
pub struct SimilarityConfig {
    seed: u64,
    matrix_sizes: Vec<(usize, usize)>,
    vector_lengths: Vec<usize>,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            matrix_sizes: vec![(10, 4), (100, 16), (500, 64), (2000, 128)],
            vector_lengths: vec![5, 1_000, 100_000],
            measurement_time: 5,
            sample_size: 20,
        }
    }
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &SimilarityConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_cosine_matrix(c: &mut Criterion) {
    let config = SimilarityConfig::default();
    let mut group = configure_group(c, "Cosine_Similarity_Matrix", &config);

    for &(rows, cols) in config.matrix_sizes.iter() {
        let vectors = random_matrix(rows, cols, Some(config.seed + (rows * cols) as u64));
        group.bench_with_input(
            BenchmarkId::new("cosine", format!("{}x{}", rows, cols)),
            &(rows, cols),
            |b, _| {
                b.iter(|| cosine_similarity_matrix(vectors.view()).unwrap());
            },
        );
    }
    group.finish();
}

pub fn bench_losses(c: &mut Criterion) {
    let config = SimilarityConfig::default();
    let mut group = configure_group(c, "Loss_Metrics", &config);

    for &len in config.vector_lengths.iter() {
        let u = random_vector(len, Some(config.seed));
        let v = random_vector(len, Some(config.seed + 1));

        group.bench_with_input(BenchmarkId::new("l1", len), &len, |b, _| {
            b.iter(|| l1_loss(u.view(), v.view()).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("l2", len), &len, |b, _| {
            b.iter(|| l2_loss(u.view(), v.view()).unwrap());
        });
    }
    group.finish();
}

criterion_group!(similarity_benches, bench_cosine_matrix, bench_losses);
criterion_main!(similarity_benches);

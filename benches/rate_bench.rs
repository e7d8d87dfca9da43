use aes5_rates::frequency::{closest_standard_frequency, FrequencyValidator};
use aes5_rates::rate_category::{classify_frequency, RateCategoryManager};
use aes5_rates::validation::{ValidationCore, ValidationOutcome};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MIXED_INPUTS: [u32; 8] = [44_100, 48_000, 48_100, 47_952, 96_000, 88_210, 192_000, 12_345];

fn bench_validate_frequency(c: &mut Criterion) {
    let validator = FrequencyValidator::with_defaults();

    c.bench_function("validate_frequency_48k", |b| {
        b.iter(|| black_box(validator.validate_frequency(black_box(48_000), black_box(100))))
    });

    c.bench_function("validate_frequency_mixed", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % MIXED_INPUTS.len();
            black_box(validator.validate_frequency(black_box(MIXED_INPUTS[i]), 100))
        })
    });
}

fn bench_closest_standard(c: &mut Criterion) {
    c.bench_function("closest_standard_frequency", |b| {
        let mut f = 30_000u32;
        b.iter(|| {
            f = if f > 400_000 { 30_000 } else { f + 977 };
            black_box(closest_standard_frequency(black_box(f)))
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let manager = RateCategoryManager::with_defaults();

    c.bench_function("classify_rate_category_cached", |b| {
        b.iter(|| black_box(manager.classify_rate_category(black_box(96_000))))
    });

    c.bench_function("classify_rate_category_alternating", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % MIXED_INPUTS.len();
            black_box(manager.classify_rate_category(black_box(MIXED_INPUTS[i])))
        })
    });

    c.bench_function("classify_frequency_table_vs_range", |b| {
        b.iter(|| {
            black_box(classify_frequency(black_box(192_000)));
            black_box(classify_frequency(black_box(192_001)))
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let core = ValidationCore::new();
    let check = |f: u32| {
        if f == 0 {
            ValidationOutcome::InvalidInput
        } else {
            ValidationOutcome::Valid
        }
    };
    let block = [48_000u32; 16];

    c.bench_function("batch_validate_16", |b| {
        b.iter(|| black_box(core.batch_validate(black_box(&block), Some(&check))))
    });
}

criterion_group!(
    benches,
    bench_validate_frequency,
    bench_closest_standard,
    bench_classify,
    bench_batch
);
criterion_main!(benches);

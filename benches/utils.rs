//! 工具函数性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linkmeter::utils::{generate_random_code, is_reserved_short_code, is_valid_short_code};

// ============== is_valid_short_code 基准测试 ==============

fn bench_is_valid_short_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_short_code");

    group.bench_function("valid_simple", |b| {
        b.iter(|| {
            assert!(is_valid_short_code("abc123"));
        });
    });

    group.bench_function("invalid_empty", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code(""));
        });
    });

    group.bench_function("invalid_special_chars", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code("'; DROP TABLE--"));
        });
    });

    let long_code = "a".repeat(128);
    group.bench_function("valid_long", |b| {
        b.iter(|| {
            assert!(is_valid_short_code(&long_code));
        });
    });

    group.bench_function("reserved_lookup", |b| {
        b.iter(|| {
            assert!(is_reserved_short_code("metrics"));
        });
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [4, 6, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &len| {
            b.iter(|| generate_random_code(len));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_is_valid_short_code, bench_generate_random_code);
criterion_main!(benches);

//! 聚合纯函数性能基准测试

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use collateral_insights::analytics::{RecruitmentTally, TierDistribution, trend_percentage};
use collateral_insights::storage::{HistogramBucket, Registration};

/// 模拟注册流：约 10% 的手机号被另一位代表重复注册
fn registrations(count: usize, field_reps: usize) -> Vec<Registration> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let phone = if i % 10 == 9 { i - 5 } else { i };
            Registration {
                id: i as i64 + 1,
                field_id: format!("FR{:04}", i % field_reps),
                phone: format!("98{:08}", phone),
                name: format!("Dr {}", i),
                registered_at: base + Duration::minutes(i as i64),
            }
        })
        .collect()
}

// ============== RecruitmentTally 基准测试 ==============

fn bench_recruitment_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics/recruitment_tally");

    for size in [1_000usize, 10_000, 100_000] {
        let rows = registrations(size, 200);
        let roster: Vec<String> = (0..200).map(|i| format!("FR{:04}", i)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let mut tally = RecruitmentTally::with_roster(roster.iter().cloned());
                for row in rows {
                    tally.observe(row).unwrap();
                }
                black_box(tally.finish())
            });
        });
    }

    group.finish();
}

// ============== TierDistribution 基准测试 ==============

fn bench_tier_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics/tier_distribution");

    // 直方图桶数上限约等于 collateral 总数
    let buckets: Vec<HistogramBucket> = (1..=300u64)
        .map(|n| HistogramBucket {
            collateral_count: n,
            doctors: 1_000 / n,
        })
        .collect();

    group.bench_function("from_histogram_300", |b| {
        b.iter(|| black_box(TierDistribution::from_histogram(black_box(&buckets))));
    });

    group.bench_function("trend_percentage", |b| {
        b.iter(|| black_box(trend_percentage(black_box(1_250), black_box(1_000))));
    });

    group.finish();
}

criterion_group!(benches, bench_recruitment_tally, bench_tier_distribution);
criterion_main!(benches);

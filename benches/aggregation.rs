use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use smartcalc_core::{AggregationService, EntryBuilder, FixedClock, NetWorthService};
use smartcalc_domain::{BudgetCategory, LedgerSet, NetWorthBounds, Owner, RawBreakdown};
use smartcalc_export::entries_csv;

fn raw(pairs: &[(&str, f64)]) -> RawBreakdown {
    pairs
        .iter()
        .map(|(label, amount)| (label.to_string(), Some(*amount)))
        .collect()
}

fn build_sample_ledgers(entry_count: usize) -> LedgerSet {
    let mut ledgers = LedgerSet::new();
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    for idx in 0..entry_count {
        let clock = FixedClock(start + chrono::Duration::minutes(idx as i64));
        let category = BudgetCategory::ALL[idx % 3];
        let spread = (idx % 100) as f64;
        let entry = EntryBuilder::build(
            &clock,
            category,
            &raw(&[("Salary", 4_000.0 + spread), ("Other", 250.0)]),
            &raw(&[("Housing", 1_200.0), ("Food", 300.0 + spread)]),
            &raw(&[("Emergency", 200.0)]),
            Owner::new("bench"),
        );
        ledgers.append(entry);
    }
    ledgers
}

fn bench_aggregate(c: &mut Criterion) {
    let ledgers = build_sample_ledgers(black_box(10_000));

    c.bench_function("aggregate_10k", |b| {
        b.iter(|| {
            let report = AggregationService::aggregate(&ledgers);
            black_box(report);
        })
    });

    c.bench_function("entries_csv_10k", |b| {
        b.iter(|| {
            let bytes = entries_csv(&ledgers).expect("csv");
            black_box(bytes);
        })
    });
}

fn bench_net_worth(c: &mut Criterion) {
    let assets: Vec<f64> = (0..1_000).map(|idx| 1_000.0 + idx as f64).collect();
    let liabilities: Vec<f64> = (0..1_000).map(|idx| 500.0 + idx as f64).collect();
    let bounds = NetWorthBounds::default();

    c.bench_function("net_worth_score_1k", |b| {
        b.iter(|| {
            let result = NetWorthService::score(&assets, &liabilities, &bounds);
            black_box(result);
        })
    });
}

criterion_group!(benches, bench_aggregate, bench_net_worth);
criterion_main!(benches);

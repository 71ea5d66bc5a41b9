use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use vatcharge::core::*;
use vatcharge::rules::RuleRegistry;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 6, 1).unwrap()
}

fn bench_determine_charge(c: &mut Criterion) {
    let registry = RuleRegistry::eu().unwrap();

    let destination = Sale::new(
        test_date(),
        ItemCategory::EBook,
        Party::consumer("FR"),
        Party::business("DE"),
    );
    c.bench_function("determine_charge_destination", |b| {
        b.iter(|| registry.determine_charge(black_box(&destination)).unwrap())
    });

    let fallback = Sale::new(
        NaiveDate::from_ymd_opt(2014, 6, 1).unwrap(),
        ItemCategory::GenericPhysicalGood,
        Party::consumer("FR"),
        Party::business("DE"),
    );
    c.bench_function("determine_charge_origin_fallback", |b| {
        b.iter(|| registry.determine_charge(black_box(&fallback)).unwrap())
    });
}

fn bench_build_registry(c: &mut Criterion) {
    c.bench_function("build_eu_registry", |b| {
        b.iter(|| RuleRegistry::eu().unwrap())
    });
}

criterion_group!(benches, bench_determine_charge, bench_build_registry);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hc_holidays::{catalog, date_only, Calendar, KnownHoliday, Locality};
use hc_time::Date;

fn bench_easter(c: &mut Criterion) {
    c.bench_function("easter_sunday_1583_to_2583", |b| {
        b.iter(|| {
            for year in 1583..=2583 {
                black_box(KnownHoliday::Easter.date(black_box(year)).unwrap());
            }
        })
    });
}

fn bench_derived(c: &mut Criterion) {
    let us = Locality::country("US", "United States").unwrap();
    let good_friday = catalog::good_friday([us]).unwrap();
    c.bench_function("good_friday_date_only", |b| {
        b.iter(|| date_only(black_box(&good_friday), black_box(2024)).unwrap())
    });
}

fn bench_calendar(c: &mut Criterion) {
    let federal = catalog::united_states_federal().unwrap();
    let us = Locality::country("US", "United States").unwrap();
    let cal = federal.for_locality(us);
    let from = Date::from_ymd(2024, 1, 1).unwrap();
    let to = Date::from_ymd(2024, 12, 31).unwrap();
    c.bench_function("us_federal_business_days_2024", |b| {
        b.iter(|| cal.business_days_between(black_box(from), black_box(to)).unwrap())
    });
}

criterion_group!(benches, bench_easter, bench_derived, bench_calendar);
criterion_main!(benches);

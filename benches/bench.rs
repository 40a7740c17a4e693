// Criterion benchmarks for Servio Algo

use chrono::{NaiveDate, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use servio_algo::core::{availability, haversine_distance, Matcher, WorkingSchedule};
use servio_algo::models::{
    CompanyPreference, CompanyRecord, Coordinate, RangeSpec, RateType, SearchCriteria,
    ServiceListing, ServiceLocation, ServiceRecord,
};

fn create_listing(i: usize, lat: f64, lon: f64) -> ServiceListing {
    let weekdays = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    ServiceListing {
        service: ServiceRecord {
            id: i as i64,
            name: format!("Service {}", i),
            description: "benchmark service".to_string(),
            location: ServiceLocation::Both,
            rate_type: RateType::FixedPrice,
            price: 20.0 + (i % 50) as f64,
            time_duration: None,
            number_of_rooms: None,
            number_of_windows: None,
            image_url: "https://cdn.test/s.jpg".to_string(),
        },
        company: CompanyRecord {
            // Three services per company
            id: (i / 3) as i64,
            business_name: Some(format!("Business {}", i / 3)),
            business_type: Some(if i % 2 == 0 { "Cleaning" } else { "Repair" }.to_string()),
            image_url: None,
            cover_image_url: None,
        },
        preference: Some(CompanyPreference {
            coordinate: Some(Coordinate::new(lat, lon)),
            range: Some(RangeSpec::kilometers(25.0)),
            schedule: Some(WorkingSchedule::Weekly {
                working_days: vec![weekdays[i % 7], weekdays[(i + 2) % 7]],
                start_time: None,
                end_time: None,
            }),
        }),
    }
}

fn create_directory(count: usize) -> Vec<ServiceListing> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.001) % 0.5;
            create_listing(i, 40.7128 + lat_offset, -74.0060 + lon_offset)
        })
        .collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_availability(c: &mut Criterion) {
    let weekly = WorkingSchedule::Weekly {
        working_days: vec![Weekday::Sat, Weekday::Sun],
        start_time: None,
        end_time: None,
    };
    let band = WorkingSchedule::DateBand {
        start_day: Weekday::Fri,
        end_day: Weekday::Mon,
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
    };

    c.bench_function("availability_weekly", |b| {
        b.iter(|| availability(black_box(Some(&weekly)), black_box(today())));
    });

    c.bench_function("availability_date_band", |b| {
        b.iter(|| availability(black_box(Some(&band)), black_box(today())));
    });
}

fn bench_discover(c: &mut Criterion) {
    let matcher = Matcher::new();
    let customer = Coordinate::new(40.7128, -74.0060);

    let mut group = c.benchmark_group("discover");

    for listing_count in [10, 50, 100, 500, 1000].iter() {
        let directory = create_directory(*listing_count);

        group.bench_with_input(
            BenchmarkId::new("discover", listing_count),
            listing_count,
            |b, _| {
                b.iter(|| {
                    matcher.discover(
                        black_box(customer),
                        black_box(directory.clone()),
                        black_box(today()),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_filter_pipeline(c: &mut Criterion) {
    let matcher = Matcher::new();
    let directory = create_directory(1000);

    let criteria = SearchCriteria {
        position: Some(Coordinate::new(40.7128, -74.0060)),
        business_type: Some("Cleaning".to_string()),
        working_days: Some(vec![Weekday::Mon, Weekday::Sat]),
        availability: Some("Available Now".to_string()),
    };

    c.bench_function("filter_pipeline_1000_listings", |b| {
        b.iter(|| {
            matcher.filter(
                black_box(&criteria),
                black_box(directory.clone()),
                black_box(today()),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_availability,
    bench_discover,
    bench_filter_pipeline
);
criterion_main!(benches);

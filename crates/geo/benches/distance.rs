//! Benchmarks for distance, ranking and shipping quotes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shopfusion_geo::{
    distance_km, rank_locations, Coordinate, FulfillmentLocation, LocationRegistry, ShippingPolicy,
};

fn create_registry(count: usize) -> LocationRegistry {
    let stores = (0..count)
        .map(|i| {
            // Grid of stores around central Jakarta
            let lat = -6.4 + (i as f64 * 0.001) % 0.4;
            let lng = 106.6 + (i as f64 * 0.0017) % 0.5;
            FulfillmentLocation::new(
                format!("store-{i}"),
                format!("Store {i}"),
                "Jakarta",
                Coordinate::new(lat, lng),
                "021-0000000",
            )
        })
        .collect();
    LocationRegistry::new(stores).expect("unique ids")
}

fn bench_single_distance(c: &mut Criterion) {
    let pusat = Coordinate::new(-6.1944, 106.8229);
    let selatan = Coordinate::new(-6.2088, 106.8456);

    c.bench_function("haversine_single", |b| {
        b.iter(|| distance_km(black_box(&pusat), black_box(&selatan)))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_locations");
    let origin = Coordinate::new(-6.2, 106.83);

    for size in [5, 100, 1000, 10000].iter() {
        let registry = create_registry(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| rank_locations(black_box(&registry), black_box(&origin)))
        });
    }

    group.finish();
}

fn bench_quote(c: &mut Criterion) {
    let policy = ShippingPolicy::jakarta();
    c.bench_function("shipping_quote", |b| {
        b.iter(|| policy.quote(black_box(17.4), black_box(250_000)))
    });
}

criterion_group!(benches, bench_single_distance, bench_ranking, bench_quote);
criterion_main!(benches);

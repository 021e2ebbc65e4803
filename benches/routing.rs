use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use dev_utils::{build_example_network, get_example_scenario};
use metro::{fastest_route, fewest_transfers};

fn fewest_transfers_benchmark(c: &mut Criterion) {
    let (network, start, end) = get_example_scenario();
    c.bench_function("Fewest transfers", |b| b.iter(|| fewest_transfers(&network, black_box(&start), black_box(&end))));
}

fn fastest_route_benchmark(c: &mut Criterion) {
    let (network, start, end) = get_example_scenario();
    c.bench_function("Fastest route", |b| b.iter(|| fastest_route(&network, black_box(&start), black_box(&end))));
}

fn example_network_benchmark(c: &mut Criterion) {
    let network = build_example_network();
    c.bench_function("Fastest route (example)", |b| b.iter(|| fastest_route(&network, black_box("T4"), black_box("M1"))));
}

criterion_group!(benches, fewest_transfers_benchmark, fastest_route_benchmark, example_network_benchmark);
criterion_main!(benches);

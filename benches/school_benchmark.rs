/*
 * Fish School Benchmark
 *
 * This file contains benchmarks for the fish school simulation.
 * It measures a full tick (move then sense) for several school sizes, with
 * one and two species, and compares the parallel and sequential sense pass.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use fish_school::{Simulation, SimulationParams};

fn simulation(count: usize, two_species: bool, enable_parallel: bool) -> Simulation {
    let mut params = SimulationParams {
        two_species,
        enable_parallel,
        rng_seed: Some(7),
        ..SimulationParams::default()
    };
    params.species[0].count = count;
    params.species[1].count = count;
    Simulation::new(params).expect("benchmark parameters are valid")
}

// Benchmark one tick with a single species
fn bench_step_one_species(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_one_species");

    for count in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &n| {
            let mut sim = simulation(n, false, true);
            b.iter(|| {
                sim.step();
                black_box(sim.tick());
            });
        });
    }

    group.finish();
}

// Benchmark one tick with both species sensing each other
fn bench_step_two_species(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_two_species");

    for count in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &n| {
            let mut sim = simulation(n, true, true);
            b.iter(|| {
                sim.step();
                black_box(sim.tick());
            });
        });
    }

    group.finish();
}

// Compare the sequential sense pass with the rayon one
fn bench_sense_parallelism(c: &mut Criterion) {
    let mut group = c.benchmark_group("sense_parallelism");

    for (label, parallel) in [("sequential", false), ("parallel", true)] {
        group.bench_function(label, |b| {
            let mut sim = simulation(1000, true, parallel);
            b.iter(|| {
                sim.step();
                black_box(sim.tick());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_step_one_species, bench_step_two_species, bench_sense_parallelism
}
criterion_main!(benches);

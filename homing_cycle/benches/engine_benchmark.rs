//! Engine loop benchmark.
//!
//! Measures the per-pulse overhead of the homing loop (limit snapshot,
//! debouncing, output writes) with a virtual clock, so only the compute
//! and port-access cost is timed.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use homing_common::axis::{Axis, AxisSet};
use homing_common::hal::config::SimulationConfig;
use homing_common::hal::pins::PinMap;
use homing_common::settings::HomingSettings;
use homing_cycle::HomingCycleEngine;
use homing_hal::{SimulatedMachine, VirtualClock};
use std::hint::black_box;

/// Switches `distance` steps away on every axis.
fn machine(distance: u32, settings: &HomingSettings) -> SimulatedMachine {
    let config = SimulationConfig {
        switch_distance_steps: [distance; 4],
        switch_width_steps: 200,
        bounce_samples: 0,
    };
    SimulatedMachine::new(PinMap::default(), settings, &config)
}

fn bench_approach(c: &mut Criterion) {
    let settings = HomingSettings::default();
    let pins = PinMap::default();
    let mut group = c.benchmark_group("approach_1000_steps");

    for axes in [AxisSet::X, AxisSet::X | AxisSet::Y, AxisSet::all()] {
        group.bench_with_input(BenchmarkId::from_parameter(axes), &axes, |b, &axes| {
            b.iter(|| {
                let mut port = machine(1000, &settings);
                let mut clock = VirtualClock::new();
                let report = HomingCycleEngine::new(&mut port, &mut clock, &settings, &pins)
                    .run(axes, false, 600)
                    .unwrap();
                black_box(report.pulses_for(Axis::X))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_approach);
criterion_main!(benches);

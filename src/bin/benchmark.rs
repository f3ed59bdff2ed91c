//! Stepping throughput benchmark comparing step strategies

use std::time::Instant;
use sparse_life::{LifeConfig, ManualClock, Simulation, StepStrategy};

fn benchmark(preset: usize, strategy: StepStrategy, generations: u32) -> (f64, usize) {
    let config = LifeConfig {
        step_strategy: strategy,
        ..LifeConfig::default()
    };
    let Ok(mut sim) = Simulation::new(&config, Box::new(ManualClock::new())) else {
        return (0.0, 0);
    };
    if sim.load_preset(preset).is_err() {
        return (0.0, 0);
    }

    let start = Instant::now();
    for _ in 0..generations {
        sim.step();
    }
    let ms_per_gen = start.elapsed().as_secs_f64() * 1000.0 / generations as f64;
    (ms_per_gen, sim.population())
}

fn main() {
    println!("=== Sparse Life Step Benchmark ===\n");

    // (preset index, generations)
    let runs = [(1, 500), (1, 2000), (2, 1000), (2, 5000)];

    println!("{:>20} {:>8} {:>12} {:>12} {:>12} {:>9}",
        "Preset", "Gens", "Population", "Serial", "Parallel", "Speedup");
    println!("{:-<80}", "");

    let names: Vec<String> = match Simulation::new(&LifeConfig::default(), Box::new(ManualClock::new())) {
        Ok(sim) => sim.presets().iter().map(|p| p.name.clone()).collect(),
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    for (preset, generations) in runs {
        let (serial_ms, population) = benchmark(preset, StepStrategy::Serial, generations);
        let (parallel_ms, _) = benchmark(preset, StepStrategy::Parallel, generations);

        let speedup = if parallel_ms > 0.0 { serial_ms / parallel_ms } else { 0.0 };

        println!(
            "{:>20} {:>8} {:>12} {:>12.3} {:>12.3} {:>8.2}x",
            names.get(preset).map_or("?", String::as_str),
            generations,
            population,
            serial_ms,
            parallel_ms,
            speedup
        );
    }
}

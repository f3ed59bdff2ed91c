use std::time::{Duration, Instant};

use rand::Rng;
use rand::distr::Bernoulli;
use tracing::{debug, info, warn};

use crate::config::LifeConfig;
use crate::domain::{Coordinate, Grid, Preset, StepStrategy, plan_step, presets};
use crate::error::{LifeError, LifeResult};

use super::events::{EventBus, SimulationEvent, SubscriptionId};
use super::scheduler::{Scheduler, TimerHandle};

/// Most steps a single `tick` will run after the caller stalled
pub const MAX_STEPS_PER_TICK: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Outcome of a single generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

/// Simulation orchestrates the grid, the generation counter and automatic stepping.
///
/// All mutation goes through `&mut self`, so a step and a user edit can never
/// interleave. Hosts that share a simulation across threads must wrap it in
/// a single lock. The live set grows without limit for spreading patterns;
/// memory use follows population.
pub struct Simulation {
    grid: Grid,
    generation: u64,
    state: RunState,
    step_interval: Duration,
    min_step_interval: Duration,
    strategy: StepStrategy,
    presets: Vec<Preset>,
    scheduler: Box<dyn Scheduler>,
    timer: Option<TimerHandle>,
    events: EventBus,
    last_step_duration: Duration,
}

impl Simulation {
    /// Build a stopped simulation at generation 0.
    /// Presets are the built-in library followed by any configured ones.
    pub fn new(config: &LifeConfig, scheduler: Box<dyn Scheduler>) -> LifeResult<Self> {
        config.validate()?;

        let cell_size = config.cell_size();
        let mut presets = presets::builtin(cell_size);
        presets.extend(config.presets.iter().map(Preset::from));

        Ok(Self {
            grid: Grid::new(cell_size, config.bounds()),
            generation: 0,
            state: RunState::Stopped,
            step_interval: config.step_interval(),
            min_step_interval: config.min_step_interval(),
            strategy: config.step_strategy,
            presets,
            scheduler,
            timer: None,
            events: EventBus::default(),
            last_step_duration: Duration::ZERO,
        })
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn run_state(&self) -> RunState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running)
    }

    pub const fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub const fn min_step_interval(&self) -> Duration {
        self.min_step_interval
    }

    pub const fn strategy(&self) -> StepStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: StepStrategy) {
        self.strategy = strategy;
    }

    pub const fn last_step_duration(&self) -> Duration {
        self.last_step_duration
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Snapshot of the live cells
    pub fn live_cells(&self) -> Vec<Coordinate> {
        self.grid.live_cells()
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Register a callback for every subsequent event
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SimulationEvent) + 'static,
    {
        self.events.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.len()
    }

    /// Begin automatic stepping. No-op if already running.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }

        self.timer = Some(self.scheduler.start_periodic(self.step_interval));
        self.state = RunState::Running;
        info!(generation = self.generation, interval = ?self.step_interval, "Simulation started");
        self.events.emit(SimulationEvent::Started { generation: self.generation });
    }

    /// Cancel automatic stepping. No-op if already stopped.
    pub fn stop(&mut self) {
        let Some(handle) = self.timer.take() else {
            return;
        };

        self.scheduler.cancel(handle);
        self.state = RunState::Stopped;
        info!(generation = self.generation, "Simulation stopped");
        self.events.emit(SimulationEvent::Stopped { generation: self.generation });
    }

    /// Stop, clear every live cell and return to generation 0
    pub fn reset(&mut self) {
        self.stop();
        self.grid.clear();
        self.generation = 0;
        info!("Simulation reset");
        self.events.emit(SimulationEvent::Reset { generation: 0 });
    }

    /// Change the automatic stepping cadence.
    /// Intervals below the floor are declined and leave everything unchanged.
    /// A running simulation is restarted so the new cadence applies at once.
    pub fn set_step_interval(&mut self, interval: Duration) -> LifeResult<()> {
        if interval < self.min_step_interval {
            warn!(requested = ?interval, floor = ?self.min_step_interval, "Step interval declined");
            return Err(LifeError::IntervalBelowFloor {
                requested: interval,
                floor: self.min_step_interval,
            });
        }

        let was_running = self.is_running();
        if was_running {
            self.stop();
        }
        self.step_interval = interval;
        if was_running {
            self.start();
        }
        debug!(interval = ?interval, "Step interval set");
        Ok(())
    }

    /// Advance exactly one generation.
    /// Every death and birth is decided against the live set as it was on
    /// entry, then all of them are applied.
    pub fn step(&mut self) -> StepReport {
        let started = Instant::now();

        let plan = plan_step(self.grid.cells(), self.grid.cell_size(), self.strategy);
        for cell in &plan.deaths {
            self.grid.unfill_cell(*cell);
        }
        for cell in &plan.births {
            self.grid.fill_cell(*cell);
        }
        self.generation += 1;
        self.last_step_duration = started.elapsed();

        let report = StepReport {
            generation: self.generation,
            births: plan.births.len(),
            deaths: plan.deaths.len(),
            population: self.grid.population(),
        };
        debug!(
            generation = report.generation,
            births = report.births,
            deaths = report.deaths,
            population = report.population,
            elapsed = ?self.last_step_duration,
            "Step"
        );
        self.events.emit(SimulationEvent::Changed { generation: self.generation });
        report
    }

    /// Run one step per timer period elapsed since the last tick, up to
    /// `MAX_STEPS_PER_TICK`. Periods beyond the cap are dropped, not replayed.
    /// Returns how many steps ran. Does nothing while stopped.
    pub fn tick(&mut self) -> u32 {
        let Some(handle) = self.timer else {
            return 0;
        };

        let due = self.scheduler.due(handle);
        let steps = due.min(MAX_STEPS_PER_TICK);
        if due > steps {
            debug!(due, steps, "Dropping missed periods");
        }
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Fill a cell from user interaction. Emits `Changed` if the cell was dead.
    pub fn fill_cell(&mut self, coord: Coordinate) -> bool {
        let changed = self.grid.fill_cell(coord);
        if changed {
            self.events.emit(SimulationEvent::Changed { generation: self.generation });
        }
        changed
    }

    /// Clear a cell from user interaction. Emits `Changed` if the cell was live.
    pub fn unfill_cell(&mut self, coord: Coordinate) -> bool {
        let changed = self.grid.unfill_cell(coord);
        if changed {
            self.events.emit(SimulationEvent::Changed { generation: self.generation });
        }
        changed
    }

    /// Reset, then fill every given cell as a single batch
    pub fn load_cells(&mut self, cells: &[Coordinate]) {
        self.reset();
        for cell in cells {
            self.grid.fill_cell(*cell);
        }
        self.events.emit(SimulationEvent::Changed { generation: self.generation });
    }

    /// Load the preset at `index`. Out of range indices leave the simulation untouched.
    pub fn load_preset(&mut self, index: usize) -> LifeResult<()> {
        let Some(preset) = self.presets.get(index) else {
            warn!(index, available = self.presets.len(), "Unknown preset");
            return Err(LifeError::UnknownPreset {
                index,
                available: self.presets.len(),
            });
        };

        let (name, cells) = (preset.name.clone(), preset.cells.clone());
        info!(preset = %name, cells = cells.len(), "Loading preset");
        self.load_cells(&cells);
        Ok(())
    }

    /// Reset, then fill each cell of the visible window with probability `density`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> LifeResult<usize> {
        let dist = Bernoulli::new(density).map_err(|_| LifeError::InvalidDensity(density))?;

        self.reset();
        let filled = self.grid.randomize(rng, &dist);
        info!(filled, density, "Randomized grid");
        self.events.emit(SimulationEvent::Changed { generation: self.generation });
        Ok(filled)
    }
}

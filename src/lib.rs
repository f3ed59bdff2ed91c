// Domain layer - Coordinates, cell storage and the Life rules
pub mod domain;

// Application layer - Simulation lifecycle, timing and notifications
pub mod application;

pub mod config;
pub mod error;
pub mod telemetry;

// Infrastructure layer - macroquad driver
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{CellSet, CellSize, Coordinate, Grid, GridBounds, Preset, StepStrategy, presets};
pub use application::{ManualClock, RunState, Scheduler, Simulation, SimulationEvent, SystemClock};
pub use config::LifeConfig;
pub use error::{LifeError, LifeResult};

mod coordinate;
mod cell_set;
mod grid;
mod rules;
mod patterns;
pub mod evolution;

pub use coordinate::{CellSize, Coordinate};
pub use cell_set::CellSet;
pub use grid::{Grid, GridBounds};
pub use rules::CellState;
pub use patterns::{Pattern, Preset, presets};
pub use evolution::{StepPlan, StepStrategy, plan_step};

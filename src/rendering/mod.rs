use macroquad::prelude::*;
use crate::application::{Simulation, SimulationEvent};
use crate::domain::{Grid, GridBounds, StepStrategy};

/// Height of the status panel under the grid
pub const STATUS_HEIGHT: f32 = 90.0;

const GRID_LINE_COLOR: Color = Color::new(0.93, 0.93, 0.93, 1.0); // #eee
const LIVE_COLOR: Color = BLACK;

/// Status text kept up to date from simulation events
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub running: bool,
    pub generation: u64,
    /// Hidden until the first start, like the generation counter it labels
    pub show_generation: bool,
}

impl Status {
    pub const fn new() -> Self {
        Self {
            running: false,
            generation: 0,
            show_generation: false,
        }
    }

    pub fn apply(&mut self, event: &SimulationEvent) {
        match *event {
            SimulationEvent::Started { generation } => {
                self.running = true;
                self.show_generation = true;
                self.generation = generation;
            }
            SimulationEvent::Stopped { generation } => {
                self.running = false;
                self.generation = generation;
            }
            SimulationEvent::Reset { generation } | SimulationEvent::Changed { generation } => {
                self.generation = generation;
            }
        }
    }

    pub const fn label(&self) -> &'static str {
        if self.running { "Running" } else { "Stopped" }
    }

    pub fn generation_text(&self) -> Option<String> {
        self.show_generation
            .then(|| format!("Generation: {}", self.generation))
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

/// Window size in pixels that fits the grid plus the status panel
pub fn window_size(bounds: GridBounds) -> (i32, i32) {
    (bounds.width_px, bounds.height_px + STATUS_HEIGHT as i32)
}

fn strategy_text(strategy: StepStrategy) -> String {
    format!("{} ({})", strategy.name(), strategy.description())
}

/// Draw grid lines and live cells inside the visible window
pub fn draw_grid(grid: &Grid) {
    let size = grid.cell_size();
    let bounds = grid.bounds();
    let (width, height) = (bounds.width_px as f32, bounds.height_px as f32);

    let mut x = 0.5;
    while x < width {
        draw_line(x, 0.0, x, height, 1.0, GRID_LINE_COLOR);
        x += size.width as f32;
    }

    let mut y = 0.5;
    while y < height {
        draw_line(0.0, y, width, y, 1.0, GRID_LINE_COLOR);
        y += size.height as f32;
    }

    // Leave the one pixel grid line visible around each cell
    grid.visible_cells().for_each(|c| {
        draw_rectangle(
            c.x() as f32 + 1.0,
            c.y() as f32 + 1.0,
            (size.width - 1) as f32,
            (size.height - 1) as f32,
            LIVE_COLOR,
        );
    });
}

/// Draw the status panel below the grid
pub fn draw_status(status: &Status, sim: &Simulation) {
    let top = sim.grid().bounds().height_px as f32 + 20.0;

    let status_color = if status.running {
        Color::from_rgba(0, 160, 0, 255)
    } else {
        Color::from_rgba(200, 60, 60, 255)
    };
    draw_text(status.label(), 10.0, top, 22.0, status_color);

    if let Some(text) = status.generation_text() {
        draw_text(&text, 120.0, top, 22.0, DARKGRAY);
    }

    let details = format!(
        "Cells: {} | Step: {}ms ({:.2}ms last) | {}",
        sim.population(),
        sim.step_interval().as_millis(),
        sim.last_step_duration().as_secs_f64() * 1000.0,
        strategy_text(sim.strategy()),
    );
    draw_text(&details, 10.0, top + 25.0, 16.0, GRAY);

    let presets = sim
        .presets()
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}:{}", i + 1, p.name))
        .collect::<Vec<_>>()
        .join("  ");
    draw_text(
        "LMB fill | RMB clear | Space run | N step | C reset | R random | Up/Down speed | P strategy",
        10.0,
        top + 45.0,
        14.0,
        GRAY,
    );
    draw_text(&presets, 10.0, top + 62.0, 14.0, GRAY);
}

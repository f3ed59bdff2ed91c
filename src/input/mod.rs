use std::time::Duration;

use macroquad::prelude::*;
use tracing::warn;

use crate::application::Simulation;
use crate::domain::{Coordinate, StepStrategy};

/// Interval change per Up/Down key press
const INTERVAL_STEP: Duration = Duration::from_millis(10);

const PRESET_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Cell under the cursor, if the cursor is over the visible grid
pub fn cell_under_cursor(sim: &Simulation, mouse_pos: (f32, f32)) -> Option<Coordinate> {
    let grid = sim.grid();
    let cell = grid.snap(mouse_pos.0.floor() as i32, mouse_pos.1.floor() as i32);
    grid.bounds().contains(cell).then_some(cell)
}

/// Left click fills, right click clears the cell under the cursor
pub fn handle_mouse(sim: &mut Simulation, mouse_pos: (f32, f32)) {
    let Some(cell) = cell_under_cursor(sim, mouse_pos) else {
        return;
    };

    if is_mouse_button_pressed(MouseButton::Left) {
        sim.fill_cell(cell);
    } else if is_mouse_button_pressed(MouseButton::Right) {
        sim.unfill_cell(cell);
    }
}

fn toggle_running(sim: &mut Simulation) {
    if sim.is_running() {
        sim.stop();
    } else {
        sim.start();
    }
}

fn step_once(sim: &mut Simulation) {
    sim.step();
}

fn change_interval(sim: &mut Simulation, interval: Duration) {
    // Requests below the floor are declined and logged by the simulation
    let _ = sim.set_step_interval(interval);
}

fn slower(sim: &mut Simulation) {
    change_interval(sim, sim.step_interval() + INTERVAL_STEP);
}

fn faster(sim: &mut Simulation) {
    change_interval(sim, sim.step_interval().saturating_sub(INTERVAL_STEP));
}

fn toggle_strategy(sim: &mut Simulation) {
    let next = match sim.strategy() {
        StepStrategy::Serial => StepStrategy::Parallel,
        StepStrategy::Parallel => StepStrategy::Serial,
    };
    sim.set_strategy(next);
}

/// Process keyboard shortcuts. `density` is used by R (randomize).
pub fn process_keyboard_input(sim: &mut Simulation, density: f64) {
    type KeyAction = (KeyCode, fn(&mut Simulation));

    let actions: [KeyAction; 6] = [
        (KeyCode::Space, toggle_running),
        (KeyCode::N, step_once),
        (KeyCode::C, Simulation::reset),
        (KeyCode::Up, slower),
        (KeyCode::Down, faster),
        (KeyCode::P, toggle_strategy),
    ];

    for (key, action) in &actions {
        if is_key_pressed(*key) {
            action(&mut *sim);
        }
    }

    if is_key_pressed(KeyCode::R) {
        if let Err(e) = sim.randomize(&mut ::rand::rng(), density) {
            warn!("{e}");
        }
    }

    PRESET_KEYS
        .iter()
        .enumerate()
        .filter(|(_, key)| is_key_pressed(**key))
        .for_each(|(index, _)| {
            if let Err(e) = sim.load_preset(index) {
                warn!("{e}");
            }
        });
}

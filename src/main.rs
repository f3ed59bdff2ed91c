use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use macroquad::prelude::*;
use sparse_life::{
    LifeConfig, Simulation, SystemClock,
    input, rendering::{self, Status}, telemetry,
};
use tracing::{error, info};

/// Config file read when `LIFE_CONFIG` is not set
const DEFAULT_CONFIG_PATH: &str = "life.toml";

fn window_conf(config: &LifeConfig) -> Conf {
    let (window_width, window_height) = rendering::window_size(config.bounds());
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width,
        window_height,
        window_resizable: true,
        ..Default::default()
    }
}

// The window size depends on the grid size, so config is loaded before the
// window opens instead of through `#[macroquad::main]`.
fn main() {
    telemetry::init();

    let path = std::env::var_os("LIFE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match LifeConfig::load(Some(&path)) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return;
        }
    };

    macroquad::Window::from_config(window_conf(&config), run(config));
}

async fn run(config: LifeConfig) {
    let mut sim = match Simulation::new(&config, Box::new(SystemClock::new())) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Failed to create simulation: {e}");
            return;
        }
    };

    let status = Rc::new(RefCell::new(Status::new()));
    let sink = Rc::clone(&status);
    sim.subscribe(move |event| sink.borrow_mut().apply(event));

    info!(presets = sim.presets().len(), "Game of Life ready");

    loop {
        let mouse_pos = mouse_position();

        input::handle_mouse(&mut sim, mouse_pos);
        input::process_keyboard_input(&mut sim, config.random_density);

        sim.tick();

        clear_background(WHITE);
        rendering::draw_grid(sim.grid());
        rendering::draw_status(&status.borrow(), &sim);

        next_frame().await;
    }
}

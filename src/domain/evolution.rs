//! One-generation update over a sparse cell set.
//!
//! The update is split into a pure planning phase, which reads only the
//! live set as it was when the step began, and an apply phase the caller
//! runs afterwards. No rule ever sees a partially updated grid.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{CellSet, CellSize, CellState, Coordinate};

/// How neighbour counting is scheduled. Both produce identical plans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStrategy {
    /// Single thread
    Serial,
    /// Rayon over the live snapshot and the birth frontier
    #[default]
    Parallel,
}

impl StepStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            StepStrategy::Serial => "Serial",
            StepStrategy::Parallel => "Parallel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StepStrategy::Serial => "Hash-set lookups, single thread",
            StepStrategy::Parallel => "Hash-set lookups, rayon work stealing",
        }
    }
}

/// Cells that change in the next generation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepPlan {
    /// Live cells with fewer than 2 or more than 3 live neighbours
    pub deaths: Vec<Coordinate>,
    /// Dead frontier cells with exactly 3 live neighbours
    pub births: Vec<Coordinate>,
}

impl StepPlan {
    pub fn is_empty(&self) -> bool {
        self.deaths.is_empty() && self.births.is_empty()
    }
}

/// Live neighbours of `coord` in `cells`
pub fn live_neighbours(cells: &CellSet, coord: Coordinate, size: CellSize) -> u8 {
    coord
        .neighbours(size)
        .iter()
        .fold(0, |count, n| count + u8::from(cells.contains(*n)))
}

fn dies(cells: &CellSet, coord: Coordinate, size: CellSize) -> bool {
    !CellState::Live.next(live_neighbours(cells, coord, size)).is_live()
}

fn is_born(cells: &CellSet, coord: Coordinate, size: CellSize) -> bool {
    CellState::Dead.next(live_neighbours(cells, coord, size)).is_live()
}

/// Dead cells adjacent to at least one live cell, deduplicated
pub fn frontier(cells: &CellSet, live: &[Coordinate], size: CellSize) -> HashSet<Coordinate> {
    live.iter()
        .flat_map(|c| c.neighbours(size))
        .filter(|n| !cells.contains(*n))
        .collect()
}

fn frontier_parallel(cells: &CellSet, live: &[Coordinate], size: CellSize) -> HashSet<Coordinate> {
    live.par_iter()
        .fold(HashSet::new, |mut acc, c| {
            acc.extend(c.neighbours(size).into_iter().filter(|n| !cells.contains(*n)));
            acc
        })
        .reduce(HashSet::new, |a, b| {
            let (mut big, small) = if a.len() >= b.len() { (a, b) } else { (b, a) };
            big.extend(small);
            big
        })
}

/// Compute the next generation's changes without touching `cells`
pub fn plan_step(cells: &CellSet, size: CellSize, strategy: StepStrategy) -> StepPlan {
    let live = cells.all();

    match strategy {
        StepStrategy::Serial => StepPlan {
            deaths: live.iter().copied().filter(|c| dies(cells, *c, size)).collect(),
            births: frontier(cells, &live, size)
                .into_iter()
                .filter(|c| is_born(cells, *c, size))
                .collect(),
        },
        StepStrategy::Parallel => StepPlan {
            deaths: live.par_iter().copied().filter(|c| dies(cells, *c, size)).collect(),
            births: frontier_parallel(cells, &live, size)
                .into_par_iter()
                .filter(|c| is_born(cells, *c, size))
                .collect(),
        },
    }
}

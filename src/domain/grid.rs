use rand::Rng;
use rand::distr::{Bernoulli, Distribution};

use super::{CellSet, CellSize, Coordinate};

/// Visible window in pixels, anchored at the origin.
/// Only the renderer and `randomize` look at it; the simulation plane is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBounds {
    pub width_px: i32,
    pub height_px: i32,
}

impl GridBounds {
    pub const fn new(width_px: i32, height_px: i32) -> Self {
        Self { width_px, height_px }
    }

    pub const fn columns(&self, size: CellSize) -> i32 {
        self.width_px / size.width
    }

    pub const fn rows(&self, size: CellSize) -> i32 {
        self.height_px / size.height
    }

    pub const fn contains(&self, coord: Coordinate) -> bool {
        coord.x() >= 0 && coord.y() >= 0 && coord.x() < self.width_px && coord.y() < self.height_px
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(900, 600)
    }
}

/// Grid owns the live cell set and is its only mutator.
pub struct Grid {
    cells: CellSet,
    cell_size: CellSize,
    bounds: GridBounds,
}

impl Grid {
    pub fn new(cell_size: CellSize, bounds: GridBounds) -> Self {
        Self {
            cells: CellSet::new(),
            cell_size,
            bounds,
        }
    }

    pub const fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub const fn cells(&self) -> &CellSet {
        &self.cells
    }

    /// Mark a cell live. Returns true if it was dead before.
    pub fn fill_cell(&mut self, coord: Coordinate) -> bool {
        self.cells.add(coord)
    }

    /// Mark a cell dead. Returns true if it was live before.
    pub fn unfill_cell(&mut self, coord: Coordinate) -> bool {
        self.cells.remove(coord)
    }

    pub fn filled(&self, coord: Coordinate) -> bool {
        self.cells.contains(coord)
    }

    pub fn unfilled(&self, coord: Coordinate) -> bool {
        !self.filled(coord)
    }

    /// Snapshot of the live cells
    pub fn live_cells(&self) -> Vec<Coordinate> {
        self.cells.all()
    }

    pub fn population(&self) -> usize {
        self.cells.size()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Coordinate of the cell containing a pixel position.
    /// Floors towards negative infinity so positions left of or above the
    /// origin land in the right cell.
    pub const fn snap(&self, px: i32, py: i32) -> Coordinate {
        Coordinate::new(
            px.div_euclid(self.cell_size.width) * self.cell_size.width,
            py.div_euclid(self.cell_size.height) * self.cell_size.height,
        )
    }

    /// Live cells inside the visible window
    pub fn visible_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells
            .iter()
            .copied()
            .filter(move |c| self.bounds.contains(*c))
    }

    /// Fill every cell in the visible window with probability given by `dist`.
    /// Returns how many cells were filled.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, dist: &Bernoulli) -> usize {
        let size = self.cell_size;
        let (columns, rows) = (self.bounds.columns(size), self.bounds.rows(size));

        (0..rows)
            .flat_map(|row| (0..columns).map(move |col| (col, row)))
            .map(|(col, row)| Coordinate::new(col * size.width, row * size.height))
            .filter(|_| dist.sample(rng))
            .fold(0, |filled, c| filled + usize::from(self.cells.add(c)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(CellSize::default(), GridBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fill_and_unfill() {
        let mut grid = Grid::default();
        let c = Coordinate::new(30, 15);

        assert!(grid.unfilled(c));
        assert!(grid.fill_cell(c));
        assert!(grid.filled(c));
        assert!(!grid.fill_cell(c));
        assert_eq!(grid.population(), 1);

        assert!(grid.unfill_cell(c));
        assert!(grid.unfilled(c));
        assert!(!grid.unfill_cell(c));
    }

    #[test]
    fn test_no_bounds_check_on_fill() {
        let mut grid = Grid::default();
        let far = Coordinate::new(-15_000, 90_000);
        grid.fill_cell(far);
        assert!(grid.filled(far));
        assert_eq!(grid.visible_cells().count(), 0);
    }

    #[test]
    fn test_snap_floors_negative_positions() {
        let grid = Grid::default();
        assert_eq!(grid.snap(0, 0), Coordinate::new(0, 0));
        assert_eq!(grid.snap(29, 14), Coordinate::new(15, 0));
        assert_eq!(grid.snap(-1, -16), Coordinate::new(-15, -30));
    }

    #[test]
    fn test_bounds_dimensions() {
        let bounds = GridBounds::new(900, 600);
        let size = CellSize::square(15);
        assert_eq!(bounds.columns(size), 60);
        assert_eq!(bounds.rows(size), 40);
        assert!(bounds.contains(Coordinate::new(885, 585)));
        assert!(!bounds.contains(Coordinate::new(900, 0)));
        assert!(!bounds.contains(Coordinate::new(0, -15)));
    }

    #[test]
    fn test_randomize_stays_in_bounds() {
        let mut grid = Grid::new(CellSize::square(10), GridBounds::new(100, 50));
        let mut rng = StdRng::seed_from_u64(7);
        let dist = Bernoulli::new(0.5).unwrap();

        let filled = grid.randomize(&mut rng, &dist);

        assert_eq!(filled, grid.population());
        assert!(filled > 0 && filled < 50);
        assert!(grid.live_cells().iter().all(|c| grid.bounds().contains(*c)));
        assert!(grid.live_cells().iter().all(|c| c.x() % 10 == 0 && c.y() % 10 == 0));
    }

    #[test]
    fn test_randomize_full_density() {
        let mut grid = Grid::new(CellSize::square(15), GridBounds::new(150, 150));
        let mut rng = StdRng::seed_from_u64(1);
        let dist = Bernoulli::new(1.0).unwrap();
        assert_eq!(grid.randomize(&mut rng, &dist), 100);
    }
}

use std::collections::HashSet;

use super::Coordinate;

/// Sparse set of live cells.
/// Backed by a hash set, so membership, insertion and removal are amortized O(1)
/// regardless of how far apart the cells are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellSet {
    cells: HashSet<Coordinate>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell. Returns false if it was already present.
    pub fn add(&mut self, coord: Coordinate) -> bool {
        self.cells.insert(coord)
    }

    /// Remove a cell. Returns false if it was not present.
    pub fn remove(&mut self, coord: Coordinate) -> bool {
        self.cells.remove(&coord)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Owned snapshot of the live cells.
    /// Mutating the set afterwards does not affect the returned vector.
    pub fn all(&self) -> Vec<Coordinate> {
        self.cells.iter().copied().collect()
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Borrowing iterator; the set cannot be mutated while it is alive
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.cells.iter()
    }
}

impl FromIterator<Coordinate> for CellSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coordinate> for CellSet {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

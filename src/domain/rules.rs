/// State of a single cell as seen by the Life rules.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Dead,
    Live,
}

impl CellState {
    pub const fn is_live(self) -> bool {
        matches!(self, CellState::Live)
    }

    /// Conway's B3/S23 rules:
    /// 1. Live cell with fewer than 2 live neighbours dies
    /// 2. Live cell with 2 or 3 live neighbours survives
    /// 3. Live cell with more than 3 live neighbours dies
    /// 4. Dead cell with exactly 3 live neighbours becomes live
    pub const fn next(self, live_neighbours: u8) -> Self {
        match (self, live_neighbours) {
            (CellState::Live, 2 | 3) => CellState::Live,
            (CellState::Dead, 3) => CellState::Live,
            _ => CellState::Dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underpopulation() {
        assert_eq!(CellState::Live.next(0), CellState::Dead);
        assert_eq!(CellState::Live.next(1), CellState::Dead);
    }

    #[test]
    fn test_survival() {
        assert_eq!(CellState::Live.next(2), CellState::Live);
        assert_eq!(CellState::Live.next(3), CellState::Live);
    }

    #[test]
    fn test_overpopulation() {
        for n in 4..=8 {
            assert_eq!(CellState::Live.next(n), CellState::Dead);
        }
    }

    #[test]
    fn test_birth_needs_exactly_three() {
        assert_eq!(CellState::Dead.next(3), CellState::Live);
        assert_eq!(CellState::Dead.next(2), CellState::Dead);
        assert_eq!(CellState::Dead.next(4), CellState::Dead);
    }
}

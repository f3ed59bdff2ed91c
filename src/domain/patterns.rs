use super::{CellSize, Coordinate};

/// A named list of live coordinates, ready to be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub cells: Vec<Coordinate>,
}

impl Preset {
    pub fn new(name: impl Into<String>, cells: Vec<Coordinate>) -> Self {
        Self { name: name.into(), cells }
    }
}

/// A pattern expressed in whole cells, anchored at a cell position.
/// It only becomes concrete coordinates once a cell size is known.
#[derive(Clone)]
pub struct Pattern {
    pub name: &'static str,
    pub anchor: (i32, i32),
    pub cells: Vec<(i32, i32)>, // Offsets from the anchor, in cells
}

impl Pattern {
    pub fn new(name: &'static str, anchor: (i32, i32), cells: Vec<(i32, i32)>) -> Self {
        Self { name, anchor, cells }
    }

    /// Concrete coordinates of the pattern at its anchor
    pub fn coordinates(&self, size: CellSize) -> Vec<Coordinate> {
        let origin = Coordinate::new(0, 0).offset(self.anchor.0, self.anchor.1, size);
        self.cells
            .iter()
            .map(|&(dx, dy)| origin.offset(dx, dy, size))
            .collect()
    }

    pub fn to_preset(&self, size: CellSize) -> Preset {
        Preset::new(self.name, self.coordinates(size))
    }
}

/// Built-in pattern library. The first three keep their classic positions
/// and order so preset indices 0..=2 stay stable.
pub mod presets {
    use super::*;

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            (18, 9),
            vec![(0, 0), (1, 0), (2, 0)],
        )
    }

    /// Gosper Glider Gun - emits a glider every 30 generations
    pub fn glider_gun() -> Pattern {
        Pattern::new(
            "Gosper Glider Gun",
            (12, 9),
            vec![
                (24, 0),
                (22, 1), (24, 1),
                (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
                (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
                (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
                (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
                (10, 6), (16, 6), (24, 6),
                (11, 7), (15, 7),
                (12, 8), (13, 8),
            ],
        )
    }

    /// Acorn - methuselah that stabilizes after 5206 generations
    pub fn acorn() -> Pattern {
        Pattern::new(
            "Acorn",
            (26, 14),
            vec![
                (0, 2), (1, 2),
                (1, 0),
                (3, 1),
                (4, 2), (5, 2), (6, 2),
            ],
        )
    }

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            (4, 4),
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            (29, 19),
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }

    /// R-pentomino - stabilizes after 1103 generations
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            (29, 19),
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            (4, 28),
            vec![
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
        )
    }

    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            blinker(),
            glider_gun(),
            acorn(),
            glider(),
            block(),
            r_pentomino(),
            lwss(),
        ]
    }

    /// Built-in presets resolved for a cell size
    pub fn builtin(size: CellSize) -> Vec<Preset> {
        all_patterns().iter().map(|p| p.to_preset(size)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SIZE: CellSize = CellSize::square(15);

    #[test]
    fn test_blinker_classic_position() {
        let cells = presets::blinker().coordinates(SIZE);
        assert_eq!(
            cells,
            vec![Coordinate::new(270, 135), Coordinate::new(285, 135), Coordinate::new(300, 135)]
        );
    }

    #[test]
    fn test_glider_gun_position() {
        let cells = presets::glider_gun().coordinates(SIZE);
        assert_eq!(cells.len(), 36);
        assert!(cells.contains(&Coordinate::new(180, 195)));
        assert!(cells.contains(&Coordinate::new(540, 135)));
        assert!(cells.contains(&Coordinate::new(705, 180)));
    }

    #[test]
    fn test_acorn_classic_position() {
        let cells: HashSet<_> = presets::acorn().coordinates(SIZE).into_iter().collect();
        let expected: HashSet<_> = [
            (390, 240), (405, 240), (405, 210), (435, 225),
            (450, 240), (465, 240), (480, 240),
        ]
        .into_iter()
        .map(Coordinate::from)
        .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_patterns_have_no_duplicate_cells() {
        for pattern in presets::all_patterns() {
            let unique: HashSet<_> = pattern.cells.iter().collect();
            assert_eq!(unique.len(), pattern.cells.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn test_builtin_scales_with_cell_size() {
        let resolved = presets::builtin(CellSize::square(10));
        assert_eq!(resolved.len(), 7);
        assert_eq!(resolved[0].name, "Blinker");
        assert_eq!(resolved[0].cells[0], Coordinate::new(180, 90));
    }
}

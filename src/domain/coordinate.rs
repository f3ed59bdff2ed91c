use std::fmt;

/// Spatial quantum of the grid in pixels.
/// Neighbour arithmetic steps by exactly one cell width/height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}

impl CellSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: i32) -> Self {
        Self::new(side, side)
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::square(15)
    }
}

/// Position of a cell on the unbounded plane, in pixel-scaled units.
///
/// Equality, hashing and ordering all use both components directly, so
/// negative positions behave like any other. Neighbour arithmetic wraps at
/// the `i32` limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn x(self) -> i32 {
        self.x
    }

    pub const fn y(self) -> i32 {
        self.y
    }

    /// Offset by whole cells
    pub const fn offset(self, dx: i32, dy: i32, size: CellSize) -> Self {
        Self::new(
            self.x.wrapping_add(dx.wrapping_mul(size.width)),
            self.y.wrapping_add(dy.wrapping_mul(size.height)),
        )
    }

    pub const fn n(self, size: CellSize) -> Self {
        self.offset(0, -1, size)
    }

    pub const fn ne(self, size: CellSize) -> Self {
        self.offset(1, -1, size)
    }

    pub const fn e(self, size: CellSize) -> Self {
        self.offset(1, 0, size)
    }

    pub const fn se(self, size: CellSize) -> Self {
        self.offset(1, 1, size)
    }

    pub const fn s(self, size: CellSize) -> Self {
        self.offset(0, 1, size)
    }

    pub const fn sw(self, size: CellSize) -> Self {
        self.offset(-1, 1, size)
    }

    pub const fn w(self, size: CellSize) -> Self {
        self.offset(-1, 0, size)
    }

    pub const fn nw(self, size: CellSize) -> Self {
        self.offset(-1, -1, size)
    }

    /// All eight neighbours, clockwise from north
    pub const fn neighbours(self, size: CellSize) -> [Self; 8] {
        [
            self.n(size),
            self.ne(size),
            self.e(size),
            self.se(size),
            self.s(size),
            self.sw(size),
            self.w(size),
            self.nw(size),
        ]
    }

    pub fn is_neighbour_of(self, other: Self, size: CellSize) -> bool {
        self.neighbours(size).contains(&other)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<[i32; 2]> for Coordinate {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

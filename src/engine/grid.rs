use super::direction::Direction;
use crate::options::GridSizing;
use rand::Rng;
use std::fmt;

/// A cell position relative to the top-left corner of the grid.
///
/// Coordinates are signed so that a head which has just left the grid (e.g.,
/// `(-1, 5)`) can still be represented.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Return the coordinate one cell away in `direction`.  The result is not
    /// checked against any grid.
    pub fn step(self, direction: Direction) -> Coordinate {
        let (dx, dy) = direction.delta();
        Coordinate {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Coordinate {
        Coordinate { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed playing field of a game session
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a grid of the given size.  Returns `None` if either dimension is
    /// zero.
    pub fn new(width: u16, height: u16) -> Option<Grid> {
        (width > 0 && height > 0).then_some(Grid { width, height })
    }

    /// Compute the grid that fits in a viewport `width` × `height` units in
    /// size when each grid cell takes up the cell size given by `sizing`.
    /// Each dimension is raised to `sizing.min_dimension()` if it falls
    /// short.
    pub fn from_viewport(width: u16, height: u16, sizing: GridSizing) -> Grid {
        let min = sizing.min_dimension().max(1);
        Grid {
            width: (width / sizing.cell_width().get()).max(min),
            height: (height / sizing.cell_height().get()).max(min),
        }
    }

    pub fn width(self) -> u16 {
        self.width
    }

    pub fn height(self) -> u16 {
        self.height
    }

    /// The number of cells in the grid
    pub fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn is_inside(self, c: Coordinate) -> bool {
        (0..i32::from(self.width)).contains(&c.x) && (0..i32::from(self.height)).contains(&c.y)
    }

    /// Iterate over every cell in the grid in row-major order
    pub fn cells(self) -> impl Iterator<Item = Coordinate> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Coordinate::new(x, y)))
    }

    /// Pick a cell uniformly at random
    pub(crate) fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Coordinate {
        Coordinate {
            x: rng.random_range(0..i32::from(self.width)),
            y: rng.random_range(0..i32::from(self.height)),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

//! Default gameplay values & fixed rules
use crate::engine::{Coordinate, Direction};
use std::num::NonZeroU16;

/// Time between movements of the snake at the start of a game, in
/// milliseconds
pub const INITIAL_SPEED_MS: u64 = 300;

/// Factor the time between movements is multiplied by each time the snake
/// eats
pub const SPEED_DECAY: f64 = 0.98;

/// The time between movements never drops below this many milliseconds
pub const MIN_SPEED_MS: u64 = 50;

/// Number of pieces of food kept on the board
pub const FOOD_COUNT: usize = 3;

/// The maximum number of pieces of food that can be configured
pub const MAX_FOOD_COUNT: usize = 10;

/// Points awarded for each piece of food eaten
pub const SCORE_PER_FOOD: u32 = 10;

/// How many random cells to try before giving up on finding a free one for
/// new food
pub const MAX_SPAWN_ATTEMPTS: usize = 100;

/// Where the snake's head is placed at the start of a game
pub const START_POSITION: Coordinate = Coordinate::new(5, 5);

/// The direction the snake faces at the start of a game
pub const START_DIRECTION: Direction = Direction::Right;

/// Default width of a grid cell in viewport units.  Terminal cells are about
/// twice as tall as they are wide, so two columns make for a square-ish cell.
pub const CELL_WIDTH: NonZeroU16 = match NonZeroU16::new(2) {
    Some(n) => n,
    None => unreachable!(),
};

/// Default height of a grid cell in viewport units
pub const CELL_HEIGHT: NonZeroU16 = NonZeroU16::MIN;

/// The grid is never smaller than this many cells along either axis.  This
/// must stay above both coordinates of [`START_POSITION`].
pub const MIN_GRID_DIMENSION: u16 = 10;

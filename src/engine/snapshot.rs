use super::direction::Direction;
use super::grid::{Coordinate, Grid};
use super::Phase;
use std::time::Duration;

/// An immutable copy of everything a renderer needs to draw one frame of the
/// game
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,

    /// The snake's segments, head first
    pub snake: Vec<Coordinate>,

    /// The positions of all food on the board, in sorted order
    pub food: Vec<Coordinate>,

    pub score: u32,

    /// The best score of any game finished before the current one
    pub high_score: u32,

    /// The current time between ticks, in milliseconds
    pub speed_ms: u64,

    /// The direction the snake moved in on the latest tick
    pub direction: Direction,

    pub phase: Phase,

    /// Number of ticks processed since the last reset
    pub ticks: u64,

    /// Identifies the game session the snapshot belongs to; bumped on every
    /// reset
    pub generation: u64,
}

impl Snapshot {
    pub fn head(&self) -> Option<Coordinate> {
        self.snake.first().copied()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The higher of the high score and the current score
    pub fn best_score(&self) -> u32 {
        self.high_score.max(self.score)
    }
}

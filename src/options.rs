//! Tunable gameplay parameters
use crate::consts;
use serde::Deserialize;
use std::num::NonZeroU16;
use thiserror::Error;

/// Speed, scoring, and food settings for a game engine
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(try_from = "RawEngineOptions")]
pub struct EngineOptions {
    initial_speed_ms: u64,
    speed_decay: f64,
    min_speed_ms: u64,
    food_count: usize,
    score_per_food: u32,
}

impl EngineOptions {
    /// Construct a set of engine options.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a speed is zero, if the minimum speed is above the
    /// initial speed, if `speed_decay` is not in the range (0, 1], or if
    /// `food_count` is not between 1 and
    /// [`MAX_FOOD_COUNT`][consts::MAX_FOOD_COUNT].
    pub fn new(
        initial_speed_ms: u64,
        speed_decay: f64,
        min_speed_ms: u64,
        food_count: usize,
        score_per_food: u32,
    ) -> Result<EngineOptions, OptionsError> {
        if initial_speed_ms == 0 || min_speed_ms == 0 {
            return Err(OptionsError::ZeroSpeed);
        }
        if min_speed_ms > initial_speed_ms {
            return Err(OptionsError::FloorAboveInitial {
                min: min_speed_ms,
                initial: initial_speed_ms,
            });
        }
        if speed_decay.is_nan() || speed_decay <= 0.0 || speed_decay > 1.0 {
            return Err(OptionsError::Decay(speed_decay));
        }
        if !(1..=consts::MAX_FOOD_COUNT).contains(&food_count) {
            return Err(OptionsError::FoodCount(food_count));
        }
        Ok(EngineOptions {
            initial_speed_ms,
            speed_decay,
            min_speed_ms,
            food_count,
            score_per_food,
        })
    }

    /// Tick interval at the start of a game, in milliseconds
    pub fn initial_speed_ms(&self) -> u64 {
        self.initial_speed_ms
    }

    /// Factor by which the tick interval is multiplied each time food is
    /// eaten
    pub fn speed_decay(&self) -> f64 {
        self.speed_decay
    }

    /// The shortest tick interval, in milliseconds
    pub fn min_speed_ms(&self) -> u64 {
        self.min_speed_ms
    }

    /// Number of pieces of food kept on the board
    pub fn food_count(&self) -> usize {
        self.food_count
    }

    pub fn score_per_food(&self) -> u32 {
        self.score_per_food
    }

    /// Return the tick interval that follows `speed_ms` after a piece of food
    /// is eaten: the interval scaled by the decay factor and rounded, but
    /// never below the minimum.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn next_speed_ms(&self, speed_ms: u64) -> u64 {
        let scaled = (speed_ms as f64 * self.speed_decay).round();
        // `scaled` is nonnegative and no greater than `speed_ms`, so the cast
        // back cannot overflow.
        (scaled as u64).max(self.min_speed_ms)
    }
}

impl Default for EngineOptions {
    fn default() -> EngineOptions {
        EngineOptions {
            initial_speed_ms: consts::INITIAL_SPEED_MS,
            speed_decay: consts::SPEED_DECAY,
            min_speed_ms: consts::MIN_SPEED_MS,
            food_count: consts::FOOD_COUNT,
            score_per_food: consts::SCORE_PER_FOOD,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawEngineOptions {
    initial_speed_ms: u64,
    speed_decay: f64,
    min_speed_ms: u64,
    food_count: usize,
    score_per_food: u32,
}

impl Default for RawEngineOptions {
    fn default() -> RawEngineOptions {
        let opts = EngineOptions::default();
        RawEngineOptions {
            initial_speed_ms: opts.initial_speed_ms,
            speed_decay: opts.speed_decay,
            min_speed_ms: opts.min_speed_ms,
            food_count: opts.food_count,
            score_per_food: opts.score_per_food,
        }
    }
}

impl TryFrom<RawEngineOptions> for EngineOptions {
    type Error = OptionsError;

    fn try_from(value: RawEngineOptions) -> Result<EngineOptions, OptionsError> {
        EngineOptions::new(
            value.initial_speed_ms,
            value.speed_decay,
            value.min_speed_ms,
            value.food_count,
            value.score_per_food,
        )
    }
}

/// How a viewport is divided into grid cells
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(try_from = "RawGridSizing")]
pub struct GridSizing {
    cell_width: NonZeroU16,
    cell_height: NonZeroU16,
    min_dimension: u16,
}

impl GridSizing {
    /// # Errors
    ///
    /// Returns `Err` if `min_dimension` is less than
    /// [`MIN_GRID_DIMENSION`][consts::MIN_GRID_DIMENSION], as the snake would
    /// not fit at its starting position.
    pub fn new(
        cell_width: NonZeroU16,
        cell_height: NonZeroU16,
        min_dimension: u16,
    ) -> Result<GridSizing, OptionsError> {
        if min_dimension < consts::MIN_GRID_DIMENSION {
            return Err(OptionsError::MinDimension(min_dimension));
        }
        Ok(GridSizing {
            cell_width,
            cell_height,
            min_dimension,
        })
    }

    /// Width of a single grid cell in viewport units
    pub fn cell_width(&self) -> NonZeroU16 {
        self.cell_width
    }

    /// Height of a single grid cell in viewport units
    pub fn cell_height(&self) -> NonZeroU16 {
        self.cell_height
    }

    /// The fewest cells a grid may have along either axis
    pub fn min_dimension(&self) -> u16 {
        self.min_dimension
    }
}

impl Default for GridSizing {
    fn default() -> GridSizing {
        GridSizing {
            cell_width: consts::CELL_WIDTH,
            cell_height: consts::CELL_HEIGHT,
            min_dimension: consts::MIN_GRID_DIMENSION,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGridSizing {
    cell_width: NonZeroU16,
    cell_height: NonZeroU16,
    min_dimension: u16,
}

impl Default for RawGridSizing {
    fn default() -> RawGridSizing {
        RawGridSizing {
            cell_width: consts::CELL_WIDTH,
            cell_height: consts::CELL_HEIGHT,
            min_dimension: consts::MIN_GRID_DIMENSION,
        }
    }
}

impl TryFrom<RawGridSizing> for GridSizing {
    type Error = OptionsError;

    fn try_from(value: RawGridSizing) -> Result<GridSizing, OptionsError> {
        GridSizing::new(value.cell_width, value.cell_height, value.min_dimension)
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("speeds must be positive")]
    ZeroSpeed,
    #[error("minimum speed ({min} ms) must not exceed initial speed ({initial} ms)")]
    FloorAboveInitial { min: u64, initial: u64 },
    #[error("speed decay must be greater than 0 and at most 1, got {0}")]
    Decay(f64),
    #[error("food count must be between 1 and {max}, got {0}", max = consts::MAX_FOOD_COUNT)]
    FoodCount(usize),
    #[error("minimum grid dimension must be at least {min}, got {0}", min = consts::MIN_GRID_DIMENSION)]
    MinDimension(u16),
}

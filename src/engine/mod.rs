mod direction;
mod food;
mod grid;
mod snake;
mod snapshot;
pub use self::direction::Direction;
pub use self::food::FoodSpawner;
pub use self::grid::{Coordinate, Grid};
pub use self::snake::SnakeState;
pub use self::snapshot::Snapshot;
use crate::consts;
use crate::options::EngineOptions;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// The game state machine.  Owns the snake, the food, the score, and the
/// speed, and advances them one tick at a time.
#[derive(Clone, Debug)]
pub struct GameEngine<R = StdRng> {
    rng: R,
    options: EngineOptions,
    grid: Grid,
    spawner: FoodSpawner,
    snake: SnakeState,
    food: HashSet<Coordinate>,
    direction: Direction,
    pending: Option<Direction>,
    score: u32,
    high_score: u32,
    speed_ms: u64,
    phase: Phase,
    ticks: u64,
    generation: u64,
}

impl GameEngine<StdRng> {
    /// Create an engine that places food using a randomly-seeded RNG
    pub fn new(grid: Grid, options: EngineOptions) -> Self {
        GameEngine::new_with_rng(grid, options, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create an engine whose food placement is determined by `seed`
    pub fn with_seed(grid: Grid, options: EngineOptions, seed: u64) -> Self {
        GameEngine::new_with_rng(grid, options, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine that has not started yet.  Call
    /// [`reset()`][GameEngine::reset] to begin the first game.
    ///
    /// Every game starts at [`START_POSITION`][consts::START_POSITION], so
    /// `grid` should be at least
    /// [`MIN_GRID_DIMENSION`][consts::MIN_GRID_DIMENSION] cells along each
    /// axis.  On a smaller grid the start cell may lie off the board, in which
    /// case the game normally ends on its first tick with a wall collision.
    pub fn new_with_rng(grid: Grid, options: EngineOptions, rng: R) -> GameEngine<R> {
        GameEngine {
            rng,
            options,
            grid,
            spawner: FoodSpawner::default(),
            snake: SnakeState::new(consts::START_POSITION),
            food: HashSet::new(),
            direction: consts::START_DIRECTION,
            pending: None,
            score: 0,
            high_score: 0,
            speed_ms: options.initial_speed_ms(),
            phase: Phase::NotStarted,
            ticks: 0,
            generation: 0,
        }
    }

    /// Start a new game, carrying over the high score
    pub fn reset(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.score = 0;
        self.snake = SnakeState::new(consts::START_POSITION);
        self.direction = consts::START_DIRECTION;
        self.pending = None;
        self.food.clear();
        self.speed_ms = self.options.initial_speed_ms();
        self.ticks = 0;
        self.phase = Phase::Running;
        self.generation = self.generation.wrapping_add(1);
        let occupied = self.snake.segments().iter().copied().collect::<HashSet<_>>();
        let batch = self.spawner.spawn_many(
            &mut self.rng,
            self.grid,
            &occupied,
            self.options.food_count(),
        );
        self.food.extend(batch);
        info!(
            "Game {} started on {} grid; high score {}",
            self.generation, self.grid, self.high_score
        );
    }

    /// Advance the game by one step.  Does nothing unless the game is
    /// running.
    pub fn tick(&mut self) -> TickEvent {
        if self.phase != Phase::Running {
            return TickEvent::Idle;
        }
        self.ticks += 1;
        if let Some(d) = self.pending.take() {
            self.direction = d;
        }
        let new_head = self.snake.head().step(self.direction);
        let collision = if !self.grid.is_inside(new_head) {
            Some(Collision::Wall)
        } else if self.snake.collides_with_self(new_head) {
            Some(Collision::Body)
        } else {
            None
        };
        if let Some(collision) = collision {
            self.phase = Phase::GameOver;
            info!(
                "Game {} over after {} ticks: hit {collision} at {new_head}; score {}",
                self.generation, self.ticks, self.score
            );
            return TickEvent::Collided(collision);
        }
        if self.food.remove(&new_head) {
            // The replacement is placed against the snake as it was before
            // this move, so it may land under the new head.
            if self.food.len() < self.options.food_count() {
                self.place_food();
            }
            self.snake.advance(new_head, true);
            self.score = self.score.saturating_add(self.options.score_per_food());
            self.speed_ms = self.options.next_speed_ms(self.speed_ms);
            debug!(
                "Ate food at {new_head}; score {}, speed {} ms",
                self.score, self.speed_ms
            );
            TickEvent::Ate(new_head)
        } else {
            self.snake.advance(new_head, false);
            TickEvent::Moved
        }
    }

    /// Handle a tap/click on the board: restarts the game if it is over.
    /// Returns `true` if the game was restarted.
    pub fn tap(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            self.reset();
            true
        } else {
            false
        }
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::Turn(d) => self.set_pending_direction(d),
            Input::Reset => self.reset(),
            Input::Tap => {
                let _ = self.tap();
            }
        }
    }

    fn place_food(&mut self) {
        let mut occupied = self.snake.segments().iter().copied().collect::<HashSet<_>>();
        occupied.extend(self.food.iter().copied());
        let pos = self.spawner.spawn_one(&mut self.rng, self.grid, &occupied);
        self.food.insert(pos);
    }
}

impl<R> GameEngine<R> {
    /// Set the direction the snake will turn to on the next tick.  Later calls
    /// before that tick replace earlier ones.  Ignored unless the game is
    /// running.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if self.phase == Phase::Running {
            self.pending = Some(direction);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut food = self.food.iter().copied().collect::<Vec<_>>();
        food.sort_unstable();
        Snapshot {
            grid: self.grid,
            snake: self.snake.segments().iter().copied().collect(),
            food,
            score: self.score,
            high_score: self.high_score,
            speed_ms: self.speed_ms,
            direction: self.direction,
            phase: self.phase,
            ticks: self.ticks,
            generation: self.generation,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &SnakeState {
        &self.snake
    }

    pub fn food(&self) -> &HashSet<Coordinate> {
        &self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The current time between ticks, in milliseconds
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// A counter that increases on every reset, identifying the current game
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Phase {
    /// No game has been started yet
    #[default]
    NotStarted,
    Running,
    GameOver,
}

/// A command from the player
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Input {
    Turn(Direction),
    /// Start a new game regardless of the current phase
    Reset,
    /// Start a new game if the current one is over
    Tap,
}

/// What happened on a call to [`GameEngine::tick()`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TickEvent {
    /// The game was not running, so nothing happened
    Idle,
    Moved,
    /// The snake ate the food at the given position and grew
    Ate(Coordinate),
    /// The snake crashed and the game is now over
    Collided(Collision),
}

impl TickEvent {
    pub fn is_terminal(self) -> bool {
        matches!(self, TickEvent::Collided(_))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Collision {
    /// The snake ran off the edge of the grid
    Wall,
    /// The snake ran into its own body
    Body,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "wall"),
            Collision::Body => write!(f, "own body"),
        }
    }
}

#[cfg(test)]
impl<R> GameEngine<R> {
    pub(crate) fn set_food<I: IntoIterator<Item = Coordinate>>(&mut self, food: I) {
        self.food = food.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn engine() -> GameEngine<ChaCha12Rng> {
        GameEngine::new_with_rng(
            Grid::new(10, 10).unwrap(),
            EngineOptions::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn running() -> GameEngine<ChaCha12Rng> {
        let mut game = engine();
        game.reset();
        game.food.clear();
        game
    }

    fn snake(cells: &[(i32, i32)]) -> SnakeState {
        SnakeState::from_segments(cells.iter().copied().map(Coordinate::from)).unwrap()
    }

    #[test]
    fn new_engine() {
        let mut game = engine();
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.snake().segments(), &[Coordinate::new(5, 5)]);
        assert!(game.food().is_empty());
        assert_eq!(game.tick(), TickEvent::Idle);
        game.set_pending_direction(Direction::Up);
        assert_eq!(game.pending_direction(), None);
        assert!(!game.tap());
        assert_eq!(game.snapshot().ticks, 0);
    }

    #[test]
    fn reset_starts_game() {
        let mut game = engine();
        game.reset();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake().segments(), &[Coordinate::new(5, 5)]);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed_ms(), 300);
        assert_eq!(game.generation(), 1);
        assert_eq!(game.food().len(), 3);
        assert!(!game.food().contains(&Coordinate::new(5, 5)));
        assert!(game.food().iter().all(|&c| game.grid().is_inside(c)));
    }

    #[rstest]
    #[case(Direction::Up, Coordinate::new(5, 4))]
    #[case(Direction::Down, Coordinate::new(5, 6))]
    #[case(Direction::Left, Coordinate::new(4, 5))]
    #[case(Direction::Right, Coordinate::new(6, 5))]
    fn turn_then_tick(#[case] d: Direction, #[case] head: Coordinate) {
        let mut game = running();
        game.set_pending_direction(d);
        assert_eq!(game.tick(), TickEvent::Moved);
        assert_eq!(game.snake().head(), head);
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.direction(), d);
        assert_eq!(game.pending_direction(), None);
    }

    #[test]
    fn last_turn_wins() {
        let mut game = running();
        game.set_pending_direction(Direction::Up);
        game.set_pending_direction(Direction::Down);
        game.set_pending_direction(Direction::Left);
        game.tick();
        assert_eq!(game.snake().head(), Coordinate::new(4, 5));
        game.tick();
        assert_eq!(game.snake().head(), Coordinate::new(3, 5));
    }

    #[test]
    fn eat_food() {
        let mut game = running();
        game.food.insert(Coordinate::new(6, 5));
        assert_eq!(game.tick(), TickEvent::Ate(Coordinate::new(6, 5)));
        assert_eq!(
            game.snake().segments(),
            &[Coordinate::new(6, 5), Coordinate::new(5, 5)]
        );
        assert_eq!(game.score(), 10);
        assert_eq!(game.speed_ms(), 294);
        assert_eq!(game.food().len(), 1);
        assert_ne!(game.food().iter().next(), Some(&Coordinate::new(5, 5)));
    }

    #[test]
    fn replacement_may_land_under_new_head() {
        let options = EngineOptions::new(300, 0.98, 50, 1, 10).unwrap();
        let mut under_head = 0;
        for seed in 0..200 {
            let mut game = GameEngine::new_with_rng(
                Grid::new(2, 2).unwrap(),
                options,
                ChaCha12Rng::seed_from_u64(seed),
            );
            game.reset();
            game.snake = snake(&[(0, 0), (0, 1)]);
            game.food = HashSet::from([Coordinate::new(1, 0)]);
            assert_eq!(game.tick(), TickEvent::Ate(Coordinate::new(1, 0)));
            let food = game.food().iter().copied().collect::<Vec<_>>();
            assert_eq!(food.len(), 1);
            // Only the pre-move body is avoided
            assert!(food[0] == Coordinate::new(1, 0) || food[0] == Coordinate::new(1, 1));
            if food[0] == Coordinate::new(1, 0) {
                under_head += 1;
            }
        }
        assert!(under_head > 0);
        assert!(under_head < 200);
    }

    #[test]
    fn food_is_replenished() {
        let mut game = engine();
        game.reset();
        let target = *game.food().iter().min().unwrap();
        game.snake = SnakeState::new(Coordinate::new(target.x - 1, target.y));
        if target.x == 0 {
            game.snake = SnakeState::new(Coordinate::new(target.x + 1, target.y));
            game.direction = Direction::Left;
        }
        assert_eq!(game.tick(), TickEvent::Ate(target));
        assert_eq!(game.food().len(), 3);
        assert!(!game.food().contains(&target));
    }

    #[test]
    fn speed_decays_per_food() {
        let mut game = running();
        let mut speeds = Vec::new();
        for x in 6..9 {
            game.food.clear();
            game.food.insert(Coordinate::new(x, 5));
            assert!(matches!(game.tick(), TickEvent::Ate(_)));
            speeds.push(game.speed_ms());
        }
        assert_eq!(speeds, [294, 288, 282]);
        assert_eq!(game.score(), 30);
        assert_eq!(game.snake().len(), 4);
        game.food.clear();
        game.tick();
        assert_eq!(game.speed_ms(), 282);
        assert_eq!(game.snake().len(), 4);
    }

    #[test]
    fn wall_collision() {
        let mut game = running();
        game.snake = SnakeState::new(Coordinate::new(0, 5));
        game.direction = Direction::Left;
        let before = game.snapshot();
        assert_eq!(game.tick(), TickEvent::Collided(Collision::Wall));
        assert_eq!(game.phase(), Phase::GameOver);
        let after = game.snapshot();
        pretty_assertions::assert_eq!(
            after,
            Snapshot {
                phase: Phase::GameOver,
                ticks: before.ticks + 1,
                ..before
            }
        );
        assert_eq!(game.tick(), TickEvent::Idle);
        assert_eq!(game.snapshot(), after);
    }

    #[test]
    fn run_off_edge() {
        let mut game = running();
        game.set_pending_direction(Direction::Left);
        for x in (0..5).rev() {
            assert_eq!(game.tick(), TickEvent::Moved);
            assert_eq!(game.snake().head(), Coordinate::new(x, 5));
        }
        assert_eq!(game.tick(), TickEvent::Collided(Collision::Wall));
        assert_eq!(game.snake().head(), Coordinate::new(0, 5));
    }

    #[test]
    fn self_collision() {
        let mut game = running();
        game.snake = snake(&[(5, 5), (5, 6), (4, 6), (4, 5)]);
        game.set_pending_direction(Direction::Left);
        assert_eq!(game.tick(), TickEvent::Collided(Collision::Body));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.snake(), &snake(&[(5, 5), (5, 6), (4, 6), (4, 5)]));
    }

    #[test]
    fn reversal_is_not_prevented() {
        let mut game = running();
        game.snake = snake(&[(5, 5), (4, 5)]);
        game.set_pending_direction(Direction::Left);
        assert_eq!(game.tick(), TickEvent::Collided(Collision::Body));
    }

    #[test]
    fn reversal_of_lone_head() {
        let mut game = running();
        game.set_pending_direction(Direction::Left);
        assert_eq!(game.tick(), TickEvent::Moved);
        assert_eq!(game.snake().head(), Coordinate::new(4, 5));
    }

    #[test]
    fn input_ignored_after_game_over() {
        let mut game = running();
        game.snake = SnakeState::new(Coordinate::new(9, 0));
        assert_eq!(game.tick(), TickEvent::Collided(Collision::Wall));
        game.handle_input(Input::Turn(Direction::Down));
        assert_eq!(game.pending_direction(), None);
    }

    #[test]
    fn high_score_carries_over() {
        let mut game = running();
        game.food.insert(Coordinate::new(6, 5));
        game.food.insert(Coordinate::new(7, 5));
        game.tick();
        game.tick();
        assert_eq!(game.score(), 20);
        assert_eq!(game.high_score(), 0);
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 20);
        game.food.clear();
        game.food.insert(Coordinate::new(6, 5));
        game.tick();
        game.reset();
        assert_eq!(game.high_score(), 20);
    }

    #[test]
    fn double_reset() {
        let mut game = running();
        game.food.insert(Coordinate::new(6, 5));
        game.tick();
        game.set_pending_direction(Direction::Down);
        game.reset();
        let first = game.snapshot();
        game.reset();
        let second = game.snapshot();
        assert_eq!(first.high_score, 10);
        assert_eq!(second.high_score, 10);
        assert_eq!(first.snake, second.snake);
        assert_eq!(first.food.len(), second.food.len());
        assert_eq!(
            (first.score, first.speed_ms, first.direction, first.phase, first.ticks),
            (second.score, second.speed_ms, second.direction, second.phase, second.ticks)
        );
        assert_eq!(second.generation, first.generation + 1);
        assert_eq!(game.pending_direction(), None);
    }

    #[test]
    fn tap_restarts_finished_game() {
        let mut game = running();
        assert!(!game.tap());
        assert_eq!(game.generation(), 1);
        game.snake = SnakeState::new(Coordinate::new(9, 5));
        game.tick();
        assert_eq!(game.phase(), Phase::GameOver);
        game.handle_input(Input::Tap);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.generation(), 2);
        assert_eq!(game.snake().head(), Coordinate::new(5, 5));
    }

    #[test]
    fn grid_smaller_than_start_cell() {
        let mut game = GameEngine::new_with_rng(
            Grid::new(3, 3).unwrap(),
            EngineOptions::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        game.reset();
        assert!(!game.grid().is_inside(game.snake().head()));
        assert_eq!(game.food().len(), 3);
        assert_eq!(game.tick(), TickEvent::Collided(Collision::Wall));
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut game = engine();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFF);
        game.reset();
        for _ in 0..2000 {
            let d = match rng.random_range(0..4) {
                0 => Direction::Up,
                1 => Direction::Down,
                2 => Direction::Left,
                _ => Direction::Right,
            };
            if rng.random_bool(0.3) {
                game.set_pending_direction(d);
            }
            let len = game.snake().len();
            let score = game.score();
            let speed = game.speed_ms();
            match game.tick() {
                TickEvent::Moved => {
                    assert_eq!(game.snake().len(), len);
                    assert_eq!(game.score(), score);
                    assert_eq!(game.speed_ms(), speed);
                }
                TickEvent::Ate(pos) => {
                    assert_eq!(game.snake().head(), pos);
                    assert_eq!(game.snake().len(), len + 1);
                    assert_eq!(game.score(), score + 10);
                    assert!(game.speed_ms() <= speed);
                    assert!(game.speed_ms() >= 50);
                }
                TickEvent::Collided(_) => {
                    assert_eq!(game.snake().len(), len);
                    game.reset();
                    assert!(game.high_score() >= score);
                    continue;
                }
                TickEvent::Idle => panic!("game should be running"),
            }
            let cells = game.snake().segments().iter().collect::<HashSet<_>>();
            assert_eq!(cells.len(), game.snake().len());
            assert!(game.food().len() <= 3);
            assert!(game.food().iter().all(|&c| game.grid().is_inside(c)));
        }
    }
}

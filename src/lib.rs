//! A real-time snake game played on a rectangular grid.
//!
//! The snake moves one cell per tick in its current direction.  Turns queued
//! with [`Session::set_pending_direction()`] take effect on the next tick.
//! Eating a piece of food grows the snake, adds to the score, and shortens the
//! time between ticks.  Running into a wall or into the snake's own body ends
//! the game.
//!
//! [`engine::GameEngine`] holds the rules and can be driven by hand one
//! [`tick()`][engine::GameEngine::tick] at a time.  A [`Session`] wraps an
//! engine in a background [`scheduler::Scheduler`] that ticks it at the
//! current speed and publishes an [`engine::Snapshot`] of every new state.
pub mod config;
pub mod consts;
pub mod engine;
pub mod options;
pub mod scheduler;
pub mod session;
pub use crate::config::{Config, ConfigError};
pub use crate::options::{EngineOptions, GridSizing, OptionsError};
pub use crate::session::{Controller, Session};

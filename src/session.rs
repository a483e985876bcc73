//! Thread-safe handle for playing a game in real time
use crate::engine::{Direction, GameEngine, Input, Phase, Snapshot};
use crate::scheduler::{lock, Scheduler};
use rand::{rngs::StdRng, Rng};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A game engine together with the scheduler ticking it.
///
/// Every state change is published as a [`Snapshot`] on an internal channel,
/// which renderers consume with [`try_recv()`][Session::try_recv] or
/// [`latest()`][Session::latest].
#[derive(Debug)]
pub struct Session<R = StdRng> {
    engine: Arc<Mutex<GameEngine<R>>>,
    scheduler: Option<Scheduler>,
    sender: Sender<Snapshot>,
    receiver: Receiver<Snapshot>,
}

impl<R: Rng + Send + 'static> Session<R> {
    /// Wrap `engine` in a session.  Nothing ticks until the first
    /// [`reset()`][Session::reset].
    pub fn new(engine: GameEngine<R>) -> Session<R> {
        let (sender, receiver) = mpsc::channel();
        Session {
            engine: Arc::new(Mutex::new(engine)),
            scheduler: None,
            sender,
            receiver,
        }
    }

    /// Start a new game and begin ticking it.  Any ticking of the previous
    /// game is stopped first.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the ticking thread could not be spawned.
    pub fn reset(&mut self) -> io::Result<()> {
        self.stop();
        let snapshot = {
            let mut engine = lock(&self.engine);
            engine.reset();
            engine.snapshot()
        };
        // Cannot fail, as `self` holds the receiver
        let _ = self.sender.send(snapshot);
        self.scheduler = Some(Scheduler::start(
            Arc::clone(&self.engine),
            self.sender.clone(),
        )?);
        Ok(())
    }

    /// Restart the game if it is over.  Returns `true` if it was restarted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the ticking thread could not be spawned.
    pub fn tap(&mut self) -> io::Result<bool> {
        // Only a reset can take the engine out of `GameOver`, and resets go
        // through `&mut self`, so the phase cannot change under us here.
        let over = lock(&self.engine).phase() == Phase::GameOver;
        if over {
            self.reset()?;
        }
        Ok(over)
    }

    /// # Errors
    ///
    /// Returns `Err` if the input started a new game and the ticking thread
    /// could not be spawned.
    pub fn handle_input(&mut self, input: Input) -> io::Result<()> {
        match input {
            Input::Turn(d) => self.set_pending_direction(d),
            Input::Reset => self.reset()?,
            Input::Tap => {
                self.tap()?;
            }
        }
        Ok(())
    }
}

impl<R> Session<R> {
    /// Queue a turn for the next tick; see
    /// [`GameEngine::set_pending_direction()`]
    pub fn set_pending_direction(&self, direction: Direction) {
        lock(&self.engine).set_pending_direction(direction);
    }

    /// Return a handle for steering the snake from another thread
    pub fn controller(&self) -> Controller<R> {
        Controller {
            engine: Arc::clone(&self.engine),
        }
    }

    /// Return the engine's current state
    pub fn snapshot(&self) -> Snapshot {
        lock(&self.engine).snapshot()
    }

    /// Receive the next published snapshot, if any
    pub fn try_recv(&self) -> Option<Snapshot> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next published snapshot
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Snapshot> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Consume all snapshots published so far, oldest first
    pub fn drain(&self) -> Vec<Snapshot> {
        self.receiver.try_iter().collect()
    }

    /// Consume all snapshots published so far and return the newest
    pub fn latest(&self) -> Option<Snapshot> {
        self.receiver.try_iter().last()
    }

    /// Test whether the game is currently being ticked
    pub fn is_ticking(&self) -> bool {
        self.scheduler.as_ref().is_some_and(Scheduler::is_running)
    }

    /// Stop ticking.  The engine keeps its state.
    pub fn stop(&mut self) {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.stop();
        }
    }
}

/// A cloneable handle that can turn the snake from any thread
#[derive(Debug)]
pub struct Controller<R = StdRng> {
    engine: Arc<Mutex<GameEngine<R>>>,
}

impl<R> Controller<R> {
    pub fn set_pending_direction(&self, direction: Direction) {
        lock(&self.engine).set_pending_direction(direction);
    }
}

impl<R> Clone for Controller<R> {
    fn clone(&self) -> Controller<R> {
        Controller {
            engine: Arc::clone(&self.engine),
        }
    }
}

//! Background ticking of a shared game engine
use crate::engine::{GameEngine, Phase, Snapshot};
use log::{debug, warn};
use rand::Rng;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// Lock `mutex`, carrying on with the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A thread that ticks a [`GameEngine`] at its current speed and publishes a
/// [`Snapshot`] after every tick.
///
/// Each scheduler is bound to the engine generation that was current when it
/// started; once the engine is reset it stops without touching the new game.
/// It also stops on its own after publishing the snapshot for a game over.
#[derive(Debug)]
pub struct Scheduler {
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    generation: u64,
}

impl Scheduler {
    /// Start ticking `engine`.  Snapshots are sent to `snapshots` in tick
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the thread could not be spawned.
    pub fn start<R: Rng + Send + 'static>(
        engine: Arc<Mutex<GameEngine<R>>>,
        snapshots: Sender<Snapshot>,
    ) -> io::Result<Scheduler> {
        let generation = lock(&engine).generation();
        let (stop, stop_rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name(format!("ticker-{generation}"))
            .spawn(move || run(&engine, generation, &stop_rx, &snapshots))?;
        debug!("Started ticking game {generation}");
        Ok(Scheduler {
            stop: Some(stop),
            worker: Some(worker),
            generation,
        })
    }

    /// The engine generation this scheduler ticks
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Test whether the ticking thread is still alive
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Stop ticking and wait for the thread to exit.  Once this returns, no
    /// further ticks will happen.  Calling this more than once is harmless.
    ///
    /// This must not be called while holding the engine's lock.
    pub fn stop(&mut self) {
        // Dropping the sender wakes the thread from its wait
        self.stop = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Ticker thread for game {} panicked", self.generation);
            } else {
                debug!("Stopped ticking game {}", self.generation);
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<R: Rng>(
    engine: &Mutex<GameEngine<R>>,
    generation: u64,
    stop: &Receiver<()>,
    snapshots: &Sender<Snapshot>,
) {
    loop {
        // Re-read the speed before every wait so that speed-ups apply from the
        // next tick on.
        let interval = {
            let engine = lock(engine);
            if engine.generation() != generation || engine.phase() != Phase::Running {
                return;
            }
            engine.interval()
        };
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => (),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
        let snapshot = {
            let mut engine = lock(engine);
            if engine.generation() != generation || stopped(stop) {
                return;
            }
            engine.tick();
            engine.snapshot()
        };
        let over = snapshot.phase == Phase::GameOver;
        if snapshots.send(snapshot).is_err() || over {
            return;
        }
    }
}

fn stopped(stop: &Receiver<()>) -> bool {
    !matches!(stop.try_recv(), Err(TryRecvError::Empty))
}

use crate::board::Board;
use crate::command::Command;
use crate::theme;
use crossterm::event::{poll, read, Event};
use diamond_hunter::engine::{Direction, GameEngine, Grid, Input, Snapshot};
use diamond_hunter::{Config, GridSizing, Session};
use log::{debug, info};
use rand::{rngs::StdRng, Rng};
use ratatui::{backend::Backend, layout::Size, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App<R = StdRng> {
    session: Session<R>,

    /// The most recent state published by the session
    snapshot: Snapshot,

    sizing: GridSizing,

    /// Whether the game-over pop-up is showing
    dialog: bool,

    quitting: bool,
}

impl App {
    /// Create an app whose grid fills a terminal of size `area`
    pub(crate) fn new(config: Config, seed: Option<u64>, area: Size) -> App {
        let grid = Grid::from_viewport(
            area.width.saturating_sub(theme::RESERVED_COLUMNS),
            area.height.saturating_sub(theme::RESERVED_ROWS),
            config.grid,
        );
        info!(
            "Terminal is {}x{}; playing on {grid} grid",
            area.width, area.height
        );
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(grid, config.engine, seed),
            None => GameEngine::new(grid, config.engine),
        };
        App::with_engine(engine, config.grid)
    }
}

impl<R: Rng + Send + 'static> App<R> {
    fn with_engine(engine: GameEngine<R>, sizing: GridSizing) -> App<R> {
        let session = Session::new(engine);
        let snapshot = session.snapshot();
        App {
            session,
            snapshot,
            sizing,
            dialog: false,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(self.board(), frame.area()))?;
            self.process_input()?;
        }
        self.session.stop();
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if poll(theme::FRAME_PERIOD)? {
            self.handle_event(read()?)?;
        }
        self.refresh();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return Ok(());
        };
        debug!("Received command {cmd:?}");
        match cmd {
            Command::Quit | Command::Q => self.quitting = true,
            Command::Up => self.session.set_pending_direction(Direction::Up),
            Command::Down => self.session.set_pending_direction(Direction::Down),
            Command::Left => self.session.set_pending_direction(Direction::Left),
            Command::Right => self.session.set_pending_direction(Direction::Right),
            Command::Enter if self.dialog => self.dialog = false,
            Command::Enter | Command::P => self.session.handle_input(Input::Reset)?,
            Command::Space => self.session.handle_input(Input::Tap)?,
        }
        Ok(())
    }
}

impl<R> App<R> {
    /// Take the newest snapshot published by the session, if any.  A game
    /// over is published exactly once per game, so receiving one is what
    /// brings up the pop-up.
    fn refresh(&mut self) {
        if let Some(snapshot) = self.session.latest() {
            self.dialog = snapshot.is_over();
            self.snapshot = snapshot;
        }
    }

    fn board(&self) -> Board<'_> {
        Board::new(&self.snapshot, self.sizing, self.dialog)
    }
}

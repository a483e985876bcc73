mod app;
mod board;
mod command;
mod theme;
mod util;
use crate::app::App;
use anyhow::Context;
use diamond_hunter::Config;
use lexopt::{Arg, Parser, ValueExt};
use log::{error, info};
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: diamond-hunter [<options>]\n",
    "\n",
    "Steer the snake to the diamonds without hitting the walls or yourself.\n",
    "\n",
    "Options:\n",
    "  -c, --config <path>    Read configuration from the given file\n",
    "  -l, --log-file <path>  Write log messages to the given file\n",
    "      --seed <int>       Seed the random placement of diamonds\n",
    "  -h, --help             Display this help message and exit\n",
    "  -V, --version          Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Mode {
    Run(Arguments),
    Help,
    Version,
}

impl Mode {
    fn from_parser(mut parser: Parser) -> Result<Mode, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Mode::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Mode::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Mode::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    seed: Option<u64>,
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        if let Some(ref path) = self.log_file {
            let file = fs_err::File::create(path).context("failed to create log file")?;
            WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file)
                .context("failed to initialize logging")?;
        }
        info!(
            "Starting {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        let config = match self.config {
            Some(ref path) => Config::load(path, false),
            None => Config::load_default(),
        }
        .context("failed to load configuration")?;
        let terminal = ratatui::init();
        let r = match terminal.size() {
            Ok(size) => App::new(config, self.seed, size).run(terminal),
            Err(e) => Err(e),
        };
        ratatui::restore();
        r.context("error running game")
    }
}

fn main() -> ExitCode {
    match Mode::from_parser(Parser::from_env()) {
        Ok(Mode::Run(args)) => exit(args.run()),
        Ok(Mode::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Mode::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("diamond-hunter: {e}");
            eprint!("\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            eprintln!("diamond-hunter: {e:?}");
            ExitCode::from(2)
        }
    }
}

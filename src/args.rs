use crate::grid::Resolution;
use lexopt::{Arg, Parser, ValueExt};
use std::num::NonZeroU64;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

pub(crate) const USAGE: &str = concat!(
    "Usage: ",
    env!("CARGO_PKG_NAME"),
    " [<options>]\n",
    "\n",
    "Play Snake in the terminal\n",
    "\n",
    "Options:\n",
    "  --resolution <W>x<H>   Derive the grid from a screen of this many pixels\n",
    "                         [default: 640x480]\n",
    "  -c, --config <PATH>    Read configuration from the given file\n",
    "  --scores-file <PATH>   Record final scores in the given file\n",
    "  --keep-scores          Keep the scores recorded by earlier runs\n",
    "  --tick-millis <N>      Milliseconds between moves of the snake [default: 100]\n",
    "  --log-file <PATH>      Write log messages to the given file\n",
    "  --log-level <LEVEL>    Minimum level of log messages to write [default: info]\n",
    "  -h, --help             Display this help message and exit\n",
    "  -V, --version          Show the program version and exit\n",
);

pub(crate) const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// What the command line asks the program to do
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cli {
    Run(RunArgs),
    Help,
    Version,
}

impl Cli {
    pub(crate) fn from_env() -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = RunArgs::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Long("resolution") => args.resolution = Some(parser.value()?.parse()?),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("scores-file") => args.scores_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("keep-scores") => args.keep_scores = true,
                Arg::Long("tick-millis") => args.tick_millis = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => args.log_level = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

/// Options for a normal run of the game.  Anything left unset falls back to
/// the configuration file and then to the built-in defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RunArgs {
    pub(crate) resolution: Option<Resolution>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) scores_file: Option<PathBuf>,
    pub(crate) keep_scores: bool,
    pub(crate) tick_millis: Option<NonZeroU64>,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) log_level: Option<LevelFilter>,
}

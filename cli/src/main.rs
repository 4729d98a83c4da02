//! Headless host for the DragonSweeper board: reads scripted clicks and
//! prints the board after each change.
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dragonsweeper_core::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod script;

use script::Command;

/// Viewport height the pointer coordinates are measured against.
const VIEWPORT_HEIGHT: f32 = 720.0;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset
    #[arg(long, default_value = "small")]
    size: String,

    /// Scales the preset's dragon count
    #[arg(long, default_value_t = 1)]
    level: u16,

    /// Custom board height, overrides the preset
    #[arg(long, requires_all = ["width", "dragons"])]
    height: Option<Coord>,

    /// Custom board width, overrides the preset
    #[arg(long, requires_all = ["height", "dragons"])]
    width: Option<Coord>,

    /// Custom dragon count, overrides the preset
    #[arg(long, requires_all = ["height", "width"])]
    dragons: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Script to play, stdin when absent
    script: Option<PathBuf>,
}

impl Args {
    fn board_config(&self) -> Result<BoardConfig> {
        if let (Some(height), Some(width), Some(dragons)) = (self.height, self.width, self.dragons)
        {
            return Ok(BoardConfig::new((height, width), dragons)?);
        }
        let size_class: SizeClass = self.size.parse()?;
        Ok(BoardConfig::preset(size_class, self.level)?)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.verbose);

    let config = args.board_config()?;
    let seed = args.seed.unwrap_or_else(time_seed);
    log::debug!("seed: {}", seed);

    let mut board = Board::with_seed(config, seed);
    let geometry = BoardGeometry::centered(&config, VIEWPORT_HEIGHT);

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut out = io::stdout().lock();
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let Some(command) =
            script::parse_line(&line).with_context(|| format!("line {}", number + 1))?
        else {
            continue;
        };

        let changed = match command {
            Command::Click(click) => board.update(click)?.has_update(),
            Command::Pointer(pointer) => board.update_pointer(pointer, &geometry)?.has_update(),
            Command::Show => true,
            Command::Reset => {
                board.reset();
                true
            }
        };
        if changed {
            print_board(&mut out, &board)?;
        }
    }

    if args.json {
        serde_json::to_writer_pretty(&mut out, &board.summary())?;
        writeln!(out)?;
    }
    Ok(())
}

fn print_board(out: &mut impl Write, board: &Board) -> io::Result<()> {
    write!(out, "{}", board)?;
    writeln!(
        out,
        "{} Dragons To Find  {}  {:?}",
        board.dragons_remaining(),
        board.elapsed_hms(),
        board.state()
    )?;
    writeln!(out)
}

fn setup_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = verbose.log_level_filter().as_str().to_ascii_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn time_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweeper_core::{CellCount, Coord, GameSession, RandomMineGenerator};

use settings::Settings;
use terminal::TerminalView;

mod settings;
mod terminal;

#[derive(Parser, Debug)]
#[command(version, about = "Reveal every safe cell without hitting a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with board settings, individual flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<Coord>,

    /// Board height in cells
    #[arg(long)]
    height: Option<Coord>,

    /// Fewest mines a board may get
    #[arg(long)]
    min_mines: Option<CellCount>,

    /// Most mines a board may get
    #[arg(long)]
    max_mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            width: self.width,
            height: self.height,
            min_mines: self.min_mines,
            max_mines: self.max_mines,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let file_settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = file_settings.overridden_by(args.settings());
    let config = settings
        .board_config()
        .context("invalid board configuration")?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Starting {}x{} board with {}..={} mines, seed {}",
        config.width(),
        config.height(),
        config.min_mines,
        config.max_mines,
        seed
    );

    let generator = RandomMineGenerator::new(seed);
    let mut session = GameSession::new(config, generator, TerminalView::default())?;
    terminal::run(&mut session, io::stdin().lock(), &mut io::stdout().lock())
}

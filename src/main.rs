use std::{fs::File, path::{Path, PathBuf}, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use block_snake::{app::SnakeApp, Config};

#[derive(Parser, Debug)]
#[command(name = "block-snake", about = "Classic snake on a walled grid, in the terminal")]
struct Args {
    /// Width of the playing field in pixels, walls included
    #[arg(long, value_name = "PIXELS", default_value_t = Config::default().grid_width_px)]
    width_px: u32,
    /// Height of the playing field in pixels, walls included
    #[arg(long, value_name = "PIXELS", default_value_t = Config::default().grid_height_px)]
    height_px: u32,
    /// Side length of one grid cell in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = Config::default().cell_size_px)]
    cell_px: u32,
    /// Milliseconds between moves at the start of a game
    #[arg(long, value_name = "MILLISECONDS", default_value_t = Config::default().initial_tick_interval_ms)]
    interval_ms: u64,
    /// Milliseconds taken off the interval for every apple eaten
    #[arg(long, value_name = "MILLISECONDS", default_value_t = Config::default().tick_decrement_ms)]
    decrement_ms: u64,
    /// The interval never drops below this
    #[arg(long, value_name = "MILLISECONDS", default_value_t = Config::default().min_tick_interval_ms)]
    min_interval_ms: u64,
    /// Seed for apple placement, for repeatable games
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            grid_width_px: self.width_px,
            grid_height_px: self.height_px,
            cell_size_px: self.cell_px,
            initial_tick_interval_ms: self.interval_ms,
            tick_decrement_ms: self.decrement_ms,
            min_tick_interval_ms: self.min_interval_ms,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut app = SnakeApp::new(args.config(), args.seed)?;
    app.run()
}

// The terminal belongs to the game, so logs only ever go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

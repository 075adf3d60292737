//! Command-line flags and the [`VisualizerConfig`] they produce.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "pathgrid")]
#[command(author, version, about)]
#[command(long_about = "Interactive A* shortest-path finder.\n\n\
    Left click places the start, then the end, then barriers.\n\
    Right click erases. Space searches, c clears, r scatters\n\
    random barriers, Esc cancels a running search, q quits.")]
pub struct Cli {
    /// Number of rows (and columns) in the grid
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(2..=100))]
    pub rows: i32,

    /// Pause after each expanded cell, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub delay_ms: u64,

    /// Barrier probability used when scattering random barriers
    #[arg(long, default_value_t = 0.3, value_parser = parse_density)]
    pub density: f64,

    /// Seed for random barriers (a fresh seed is drawn when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not capture the mouse
    #[arg(long)]
    pub no_mouse: bool,

    /// Append log records to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=0.9).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is not in 0.0..=0.9"))
    }
}

/// Settings for a [`Visualizer`](crate::Visualizer).
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    pub rows: i32,
    pub delay: Duration,
    pub density: f64,
    pub seed: Option<u64>,
    pub mouse: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            delay: Duration::from_millis(10),
            density: 0.3,
            seed: None,
            mouse: true,
        }
    }
}

impl From<&Cli> for VisualizerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            rows: cli.rows,
            delay: Duration::from_millis(cli.delay_ms),
            density: cli.density,
            seed: cli.seed,
            mouse: !cli.no_mouse,
        }
    }
}

use std::fs::OpenOptions;

use clap::Parser;
use pathgrid_term::{App, Cli, CrosstermDriver, Visualizer, VisualizerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The terminal is taken over by the UI, so logs only go to a file.
    if let Some(path) = &cli.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()?;
    }

    let config = VisualizerConfig::from(&cli);
    let driver = CrosstermDriver::new().with_mouse(config.mouse);
    let mut app = App::new(Visualizer::new(config), driver);
    app.run()?;
    Ok(())
}

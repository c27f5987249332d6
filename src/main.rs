//! CLI entry point for photomosaic composition

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicRunner};

fn main() -> photomosaic::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut runner = MosaicRunner::new(cli);
    runner.run()
}

use clap::Parser;
use log::debug;
use miette::Result;

use gridfix::{run, Cli, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    debug!("gridfix {}", VERSION);

    run(&cli)?;
    Ok(())
}

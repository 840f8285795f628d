use asset_partials::{config::Cli, run};
use clap::Parser;
use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    run(args)
}

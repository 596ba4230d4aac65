use anyhow::Result;
use clap::Parser;
use varprep::argparser::{Args, Commands};
use varprep::prepare_data::prepare_data;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::PrepareData(args) => prepare_data(args)?,
    }

    Ok(())
}

use clap::{Parser, Subcommand};

use crate::prepare_data::PrepareDataArgs;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a readcount training table from a sample manifest.
    PrepareData(PrepareDataArgs),
}

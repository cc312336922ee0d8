mod commands;
mod input_output;
mod logging;
mod tokenizer_args;

use clap::Parser;
use commands::Commands;

use crate::logging::LogArgs;

/// wchisel
#[derive(clap::Parser, Debug)]
pub struct Args {
    #[command(flatten)]
    logging: LogArgs,

    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.logging.setup_logging(2)?;

    args.command.run()
}

use crate::commands::{decode::DecodeArgs, encode::EncodeArgs};

pub mod decode;
pub mod encode;

/// Subcommands for wchisel
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Encode text lines to token ids.
    Encode(EncodeArgs),

    /// Decode lines of token ids to text.
    Decode(DecodeArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
        }
    }
}

use std::io::{BufRead, Write};

use wordchisel::{Tokenizer, tokenizer::DecodeOptions};

use crate::{
    input_output::{InputArgs, OutputArgs},
    tokenizer_args::TokenizerArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    /// Drop special tokens from the output.
    #[clap(long)]
    skip_special_tokens: bool,

    /// Do not clean up tokenization spaces.
    #[clap(long)]
    no_cleanup: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.tokenizer.load_tokenizer()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        let mut options =
            DecodeOptions::default().with_skip_special_tokens(self.skip_special_tokens);
        if self.no_cleanup {
            options.set_clean_up_tokenization_spaces(Some(false));
        }

        run_decode(&mut reader, &mut writer, &tokenizer, &options)
    }
}

fn run_decode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &Tokenizer<u32>,
    options: &DecodeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in reader.lines() {
        let ids = line?
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()?;
        if ids.is_empty() {
            writeln!(writer)?;
            continue;
        }

        writeln!(writer, "{}", tokenizer.decode(&ids, options)?)?;
        writer.flush()?;
    }
    Ok(())
}

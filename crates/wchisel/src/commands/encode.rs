use std::io::{BufRead, Write};

use wordchisel::Tokenizer;

use crate::{
    input_output::{InputArgs, OutputArgs},
    tokenizer_args::TokenizerArgs,
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    /// Do not add the post-processor's special tokens.
    #[clap(long)]
    no_special_tokens: bool,

    /// Print token strings instead of ids.
    #[clap(long)]
    tokens: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.tokenizer.load_tokenizer()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_encode(
            &mut reader,
            &mut writer,
            &tokenizer,
            !self.no_special_tokens,
            self.tokens,
        )
    }
}

fn run_encode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &Tokenizer<u32>,
    add_special_tokens: bool,
    tokens: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            writeln!(writer)?;
            continue;
        }

        if tokens {
            writeln!(writer, "{}", tokenizer.encode_text(&line)?.join(" "))?;
        } else {
            let ids = tokenizer.encode(&line, None, add_special_tokens)?;
            let ids: Vec<String> = ids.iter().map(u32::to_string).collect();
            writeln!(writer, "{}", ids.join(" "))?;
        }
        writer.flush()?;
    }
    Ok(())
}

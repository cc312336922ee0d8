use std::path::PathBuf;

use wordchisel::Tokenizer;

/// Tokenizer selection arg group.
#[derive(clap::Args, Debug)]
pub struct TokenizerArgs {
    /// Path to the tokenizer definition (`tokenizer.json`).
    #[clap(long)]
    pub tokenizer: PathBuf,

    /// Optional path to the tokenizer settings (`tokenizer_config.json`).
    #[clap(long)]
    pub config: Option<PathBuf>,
}

impl TokenizerArgs {
    /// Load the selected tokenizer.
    pub fn load_tokenizer(&self) -> Result<Tokenizer<u32>, Box<dyn std::error::Error>> {
        log::info!("loading tokenizer from {}", self.tokenizer.display());
        let tokenizer = Tokenizer::from_files(&self.tokenizer, self.config.as_ref())?;
        log::info!(
            "loaded {} tokenizer; vocab size {}",
            tokenizer.model().kind_name(),
            tokenizer.vocab().len()
        );
        Ok(tokenizer)
    }
}

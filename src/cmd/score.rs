use cipherforge::model::LanguageModel;
use cipherforge::scorer::Scorer;
use cipherforge::CfResult;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Text to score.
    #[arg(short, long)]
    pub text: Option<String>,

    /// File to read instead of --text.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: ScoreArgs, model: &LanguageModel) -> CfResult<()> {
    let input = super::read_input(&args.text, &args.file)?;
    let scored = Scorer::new(model).score(&input)?;

    println!(
        "📊 {} symbols scored, fitness {:.3} (fluent text ≈ 100)",
        scored.normalized.len(),
        scored.fitness
    );
    Ok(())
}

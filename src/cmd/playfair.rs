use crate::reports;
use cipherforge::api::Algorithm;
use cipherforge::config::{DigraphParams, DEFAULT_WORKERS};
use cipherforge::model::LanguageModel;
use cipherforge::playfair::anneal::{Annealer, ProgressCallback};
use cipherforge::playfair::GridKey;
use cipherforge::CfResult;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct PlayfairArgs {
    #[command(flatten)]
    pub params: DigraphParams,

    /// Ciphertext to crack.
    #[arg(short, long)]
    pub text: Option<String>,

    /// File to read instead of --text.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Annealing workers sharing one incumbent; 1 runs single-threaded.
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
}

/// Mirrors the incumbent to the terminal at every rung boundary.
struct RungTicker;

impl ProgressCallback for RungTicker {
    fn on_progress(&self, temperature: f32, fitness: f64, key: &GridKey) -> bool {
        print!("\r{}\t{:.2}\t(t={:.1})   ", key, fitness, temperature);
        let _ = std::io::stdout().flush();
        true
    }
}

pub fn run(args: PlayfairArgs, model: &LanguageModel, seed: Option<u64>) -> CfResult<()> {
    let ciphertext = super::read_input(&args.text, &args.file)?;

    println!(
        "🔥 Annealing with {} worker(s), fudge {}",
        args.workers,
        args.params.effective_fudge(args.workers)
    );

    let start = Instant::now();
    let annealer = Annealer::new(model, &ciphertext, args.params)?;
    let solution = annealer.run(args.workers, seed, &RungTicker)?;
    println!();

    reports::print_key_grid(&solution.key);
    reports::print_summary(Algorithm::Playfair, solution.fitness, start.elapsed());
    println!("\n{}", solution.plaintext);
    Ok(())
}

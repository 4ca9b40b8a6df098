use crate::reports;
use cipherforge::api::Algorithm;
use cipherforge::config::SubstitutionParams;
use cipherforge::model::LanguageModel;
use cipherforge::substitution::{HillClimber, PermutationKey, RestartCallback};
use cipherforge::CfResult;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct SubstitutionArgs {
    #[command(flatten)]
    pub params: SubstitutionParams,

    /// Ciphertext to crack.
    #[arg(short, long)]
    pub text: Option<String>,

    /// File to read instead of --text.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

struct RestartTicker<'m> {
    model: &'m LanguageModel,
}

impl RestartCallback for RestartTicker<'_> {
    fn on_restart(&self, restart: usize, fitness: f64, key: &PermutationKey) -> bool {
        print!(
            "\r#{}\t{}\t{:.2}   ",
            restart + 1,
            key.to_alphabet_string(self.model),
            fitness
        );
        let _ = std::io::stdout().flush();
        true
    }
}

pub fn run(args: SubstitutionArgs, model: &LanguageModel, seed: Option<u64>) -> CfResult<()> {
    let ciphertext = super::read_input(&args.text, &args.file)?;

    println!(
        "⛰️  Hill climbing, up to {} restarts (tie threshold {})",
        args.params.iterations, args.params.tie_threshold
    );

    let start = Instant::now();
    let climber = HillClimber::new(model, &ciphertext, args.params)?;
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let solution = climber.crack(&mut rng, &RestartTicker { model })?;
    println!();

    reports::print_permutation_key(&solution.key, model);
    reports::print_summary(Algorithm::Substitution, solution.fitness, start.elapsed());
    println!("\n{}", solution.plaintext);
    Ok(())
}

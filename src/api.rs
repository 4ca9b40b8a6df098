use crate::config::{DigraphParams, SubstitutionParams};
use crate::model::LanguageModel;
use crate::playfair::anneal::{Annealer, NoProgress, ProgressCallback};
use crate::scorer::Scorer;
use crate::substitution::{HillClimber, NoRestartProgress, RestartCallback};
use crate::CfResult;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;

/// Ciphers the crack services understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Algorithm {
    Playfair,
    Substitution,
}

/// Service: score a piece of text against a language model.
pub fn score_text(model: &LanguageModel, text: &str) -> CfResult<f64> {
    Ok(Scorer::new(model).score(text)?.fitness)
}

/// Service: single-worker digraph crack.
pub fn crack_digraph(
    model: &LanguageModel,
    ciphertext: &str,
    params: &DigraphParams,
    seed: Option<u64>,
) -> CfResult<String> {
    crack_digraph_with(model, ciphertext, params, 1, seed, &NoProgress)
}

/// Service: multi-worker digraph crack (one shared incumbent).
pub fn crack_digraph_parallel(
    model: &LanguageModel,
    ciphertext: &str,
    params: &DigraphParams,
    workers: usize,
    seed: Option<u64>,
) -> CfResult<String> {
    crack_digraph_with(model, ciphertext, params, workers, seed, &NoProgress)
}

/// Full-control digraph entry point for callers that want progress
/// reporting.
pub fn crack_digraph_with<CB: ProgressCallback>(
    model: &LanguageModel,
    ciphertext: &str,
    params: &DigraphParams,
    workers: usize,
    seed: Option<u64>,
    callback: &CB,
) -> CfResult<String> {
    info!(workers, iterations = params.iterations, "cracking digraph cipher");
    let solution = Annealer::new(model, ciphertext, params.clone())?.run(workers, seed, callback)?;
    Ok(solution.plaintext)
}

/// Service: multi-start substitution crack.
pub fn crack_substitution(
    model: &LanguageModel,
    ciphertext: &str,
    params: &SubstitutionParams,
    seed: Option<u64>,
) -> CfResult<String> {
    crack_substitution_with(model, ciphertext, params, seed, &NoRestartProgress)
}

pub fn crack_substitution_with<CB: RestartCallback>(
    model: &LanguageModel,
    ciphertext: &str,
    params: &SubstitutionParams,
    seed: Option<u64>,
    callback: &CB,
) -> CfResult<String> {
    info!(restarts = params.iterations, "cracking substitution cipher");
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let solution = HillClimber::new(model, ciphertext, params.clone())?.crack(&mut rng, callback)?;
    Ok(solution.plaintext)
}

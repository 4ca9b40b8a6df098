use crate::model::LanguageModel;
use crate::{CfResult, CipherForgeError};

/// Result of scoring one piece of text: the fitness plus the normalized
/// text the fitness was computed over (an explicit output, callers often
/// feed it back into a search).
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub fitness: f64,
    pub normalized: String,
}

/// N-gram fitness scorer. Stateless per call; identical inputs always
/// produce identical floats.
pub struct Scorer<'m> {
    model: &'m LanguageModel,
}

impl<'m> Scorer<'m> {
    pub fn new(model: &'m LanguageModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &LanguageModel {
        self.model
    }

    /// Drop every character outside the alphabet (case-insensitive) and
    /// uppercase the rest.
    pub fn normalize(&self, text: &str) -> String {
        text.bytes()
            .filter(|&b| self.model.rank_of(b).is_some())
            .map(|b| b.to_ascii_uppercase() as char)
            .collect()
    }

    /// Score `text`, returning the fitness and the normalized text.
    /// Fluent text in the model's language lands near 100.
    pub fn score(&self, text: &str) -> CfResult<Scored> {
        let normalized = self.normalize(text);
        let ranks: Vec<u8> = normalized
            .bytes()
            .map(|b| self.model.rank_of(b).unwrap_or(255))
            .collect();
        let fitness = self.score_ranks(&ranks)?;
        Ok(Scored {
            fitness,
            normalized,
        })
    }

    /// Fast path over pre-mapped symbol ranks. Agrees exactly with `score`
    /// on the corresponding text; used by the hill-climber's inner loop
    /// where the rank sequence is maintained incrementally.
    pub fn score_ranks(&self, ranks: &[u8]) -> CfResult<f64> {
        let order = self.model.order();
        if ranks.len() < order {
            return Err(CipherForgeError::InsufficientText {
                needed: order,
                got: ranks.len(),
            });
        }

        // Prime the window with the first order-1 symbols.
        let mask = self.model.window_mask();
        let mut window: u32 = 0;
        for &rank in &ranks[..order - 1] {
            window = (window << 5) | rank as u32;
        }

        let mut sum: i64 = 0;
        for &rank in &ranks[order - 1..] {
            window = ((window & mask) << 5) | rank as u32;
            sum += self.model.score_entry(window) as i64;
        }

        let counted = ranks.len() - (order - 1);
        // Table entries are scaled by 10; de-scale here.
        Ok(sum as f64 / counted as f64 / 10.0)
    }
}

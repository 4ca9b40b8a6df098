use crate::config::SubstitutionParams;
use crate::model::LanguageModel;
use crate::scorer::Scorer;
use crate::{CfResult, CipherForgeError};
use std::fmt;
use tracing::debug;

/// Receives the best-so-far state after each restart. Returning false
/// stops the multi-start loop (cooperative cancel).
pub trait RestartCallback {
    fn on_restart(&self, restart: usize, fitness: f64, key: &PermutationKey) -> bool;
}

pub struct NoRestartProgress;

impl RestartCallback for NoRestartProgress {
    fn on_restart(&self, _restart: usize, _fitness: f64, _key: &PermutationKey) -> bool {
        true
    }
}

/// A substitution key: bijection from cipher-symbol rank to
/// plaintext-symbol rank.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationKey {
    map: Vec<u8>,
}

impl PermutationKey {
    pub fn identity(len: usize) -> Self {
        Self {
            map: (0..len as u8).collect(),
        }
    }

    pub fn random(len: usize, rng: &mut fastrand::Rng) -> Self {
        let mut key = Self::identity(len);
        rng.shuffle(&mut key.map);
        key
    }

    #[inline(always)]
    pub fn plain_rank(&self, cipher_rank: u8) -> u8 {
        self.map[cipher_rank as usize]
    }

    /// Trade the plaintext assignments of two cipher ranks.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.map.swap(a, b);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.map.len()];
        self.map
            .iter()
            .all(|&r| (r as usize) < seen.len() && !std::mem::replace(&mut seen[r as usize], true))
    }

    /// Key rendered in the model's alphabet, one plaintext symbol per
    /// cipher rank.
    pub fn to_alphabet_string(&self, model: &LanguageModel) -> String {
        self.map
            .iter()
            .map(|&r| model.symbol_at(r) as char)
            .collect()
    }
}

impl fmt::Debug for PermutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermutationKey({:?})", self.map)
    }
}

/// What a finished substitution crack produced.
#[derive(Debug, Clone)]
pub struct SubstitutionSolution {
    pub key: PermutationKey,
    pub fitness: f64,
    pub plaintext: String,
}

/// Multi-start hill-climbing key search for the substitution cipher.
///
/// The position index maps each cipher-symbol rank to the text positions
/// it occupies, so applying or reverting a key swap costs time
/// proportional to the two symbols' occurrence counts, not the text
/// length.
pub struct HillClimber<'m> {
    scorer: Scorer<'m>,
    cipher_ranks: Vec<u8>,
    positions: Vec<Vec<u32>>,
    params: SubstitutionParams,
}

impl<'m> HillClimber<'m> {
    pub fn new(
        model: &'m LanguageModel,
        ciphertext: &str,
        params: SubstitutionParams,
    ) -> CfResult<Self> {
        let scorer = Scorer::new(model);
        let normalized = scorer.normalize(ciphertext);

        // A ciphertext the scorer cannot score at all is fatal up front;
        // no search could proceed.
        if normalized.len() < model.order() {
            return Err(CipherForgeError::InsufficientText {
                needed: model.order(),
                got: normalized.len(),
            });
        }

        let cipher_ranks: Vec<u8> = normalized
            .bytes()
            .map(|b| model.rank_of(b).unwrap_or(255))
            .collect();

        let mut positions = vec![Vec::new(); model.alphabet_len()];
        for (pos, &rank) in cipher_ranks.iter().enumerate() {
            positions[rank as usize].push(pos as u32);
        }

        Ok(Self {
            scorer,
            cipher_ranks,
            positions,
            params,
        })
    }

    /// Climb from `key` to a local optimum: repeat full passes over all
    /// unordered slot pairs until a pass accepts no swap. Returns the
    /// local maximum fitness; `key` holds the corresponding key.
    pub fn hill_climb(&self, key: &mut PermutationKey) -> CfResult<f64> {
        let n = key.len();
        let mut plain: Vec<u8> = self
            .cipher_ranks
            .iter()
            .map(|&r| key.plain_rank(r))
            .collect();
        let mut local_max = self.scorer.score_ranks(&plain)?;

        let mut improved = true;
        while improved {
            improved = false;
            for i in 0..n - 1 {
                for j in i + 1..n {
                    // Trade the plaintext assignment of slots i and j,
                    // touching only their own text positions.
                    for &p in &self.positions[i] {
                        plain[p as usize] = key.map[j];
                    }
                    for &p in &self.positions[j] {
                        plain[p as usize] = key.map[i];
                    }

                    match self.scorer.score_ranks(&plain) {
                        Ok(fitness) if fitness > local_max => {
                            local_max = fitness;
                            key.map.swap(i, j);
                            improved = true;
                        }
                        // Not an improvement (or unscorable): undo through
                        // the same position index.
                        _ => {
                            for &p in &self.positions[i] {
                                plain[p as usize] = key.map[i];
                            }
                            for &p in &self.positions[j] {
                                plain[p as usize] = key.map[j];
                            }
                        }
                    }
                }
            }
        }
        Ok(local_max)
    }

    /// Multi-start loop: up to `iterations` restarts from fresh random
    /// keys, stopping early once the best local maximum has been hit
    /// `tie_threshold` times. Returns the ciphertext decrypted with the
    /// best key found.
    pub fn crack<CB: RestartCallback>(
        &self,
        rng: &mut fastrand::Rng,
        callback: &CB,
    ) -> CfResult<SubstitutionSolution> {
        let n = self.scorer.model().alphabet_len();
        let mut best_key = PermutationKey::identity(n);
        let mut best_fitness = f64::NEG_INFINITY;
        let mut ties = 0usize;

        for restart in 0..self.params.iterations {
            let mut key = PermutationKey::random(n, rng);
            let fitness = self.hill_climb(&mut key)?;

            if fitness > best_fitness {
                best_fitness = fitness;
                best_key = key;
                ties = 1;
            } else if fitness == best_fitness {
                ties += 1;
            }

            debug!(restart, best_fitness, ties, "restart complete");
            if !callback.on_restart(restart, best_fitness, &best_key) {
                break;
            }
            // Hitting the same local maximum repeatedly is the
            // convergence signal.
            if ties >= self.params.tie_threshold {
                break;
            }
        }

        let model = self.scorer.model();
        let plaintext: String = self
            .cipher_ranks
            .iter()
            .map(|&r| model.symbol_at(best_key.plain_rank(r)) as char)
            .collect();
        Ok(SubstitutionSolution {
            key: best_key,
            fitness: best_fitness,
            plaintext,
        })
    }
}

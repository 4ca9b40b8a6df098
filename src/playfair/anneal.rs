use super::{decrypt, grid_alphabet, mutation, normalize, GridKey, GRID_CELLS};
use crate::config::DigraphParams;
use crate::model::LanguageModel;
use crate::scorer::Scorer;
use crate::{CfResult, CipherForgeError};
use rayon::prelude::*;
use std::sync::Mutex;
use tracing::debug;

/// Receives the incumbent at each temperature rung boundary.
/// Returning false stops that worker's ladder (cooperative cancel).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, temperature: f32, fitness: f64, key: &GridKey) -> bool;
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _temperature: f32, _fitness: f64, _key: &GridKey) -> bool {
        true
    }
}

/// The shared incumbent: the currently accepted key and the fitness it was
/// scored at, guarded as one unit. A reader never observes a fitness that
/// belongs to a different key.
///
/// This is the current accepted state, not a best-ever record: an accepted
/// downhill move overwrites it.
pub struct Incumbent {
    cell: Mutex<(GridKey, f64)>,
}

impl Incumbent {
    pub fn new(key: GridKey, fitness: f64) -> Self {
        Self {
            cell: Mutex::new((key, fitness)),
        }
    }

    pub fn snapshot(&self) -> (GridKey, f64) {
        *self.cell.lock().unwrap()
    }

    pub fn fitness(&self) -> f64 {
        self.cell.lock().unwrap().1
    }

    /// Annealing acceptance in a single critical section.
    ///
    /// `delta >= 0` always accepts. A worse candidate is accepted iff
    /// `draw < exp(delta / temperature) - fudge` and the temperature is
    /// positive. The fudge subtraction is the documented acceptance rule
    /// (downstream tuning was calibrated against it); it can push the
    /// probability to zero or below, which simply forbids acceptance.
    pub fn try_accept(
        &self,
        candidate: &GridKey,
        fitness: f64,
        temperature: f32,
        fudge: f64,
        draw: f64,
    ) -> bool {
        let mut cell = self.cell.lock().unwrap();
        let delta = fitness - cell.1;

        let accept = if delta >= 0.0 {
            true
        } else if temperature > 0.0 {
            draw < (delta / temperature as f64).exp() - fudge
        } else {
            false
        };

        if accept {
            *cell = (*candidate, fitness);
        }
        accept
    }
}

/// What a finished digraph crack produced.
#[derive(Debug, Clone)]
pub struct DigraphSolution {
    pub key: GridKey,
    pub fitness: f64,
    pub plaintext: String,
}

/// Simulated-annealing key search for the digraph cipher.
pub struct Annealer<'m> {
    scorer: Scorer<'m>,
    alphabet: [u8; GRID_CELLS],
    ciphertext: Vec<u8>,
    params: DigraphParams,
    filler: u8,
}

impl<'m> Annealer<'m> {
    pub fn new(model: &'m LanguageModel, ciphertext: &str, params: DigraphParams) -> CfResult<Self> {
        if !(params.temp_step > 0.0) {
            return Err(CipherForgeError::Config(format!(
                "temperature step must be positive, got {}",
                params.temp_step
            )));
        }
        if !params.filler.is_ascii_alphabetic() {
            return Err(CipherForgeError::Config(format!(
                "filler symbol '{}' is not a letter",
                params.filler
            )));
        }

        let alphabet = grid_alphabet(model)?;
        let normalized = normalize(&alphabet, ciphertext)?;
        let filler = (params.filler as u8).to_ascii_uppercase();

        Ok(Self {
            scorer: Scorer::new(model),
            alphabet,
            ciphertext: normalized,
            params,
            filler,
        })
    }

    /// Run `workers` identical annealing loops against one shared
    /// incumbent and decrypt with whatever key is accepted at the end.
    /// All workers are joined before the final decryption.
    pub fn run<CB: ProgressCallback>(
        &self,
        workers: usize,
        seed: Option<u64>,
        callback: &CB,
    ) -> CfResult<DigraphSolution> {
        if workers == 0 {
            return Err(CipherForgeError::Config(
                "worker count must be at least 1".into(),
            ));
        }

        let start = GridKey::identity(&self.alphabet);
        // Scoring the starting key up front makes a too-short ciphertext
        // fatal before any search runs.
        let initial = self
            .scorer
            .score(&decrypt(&start, &self.ciphertext, self.filler))?
            .fitness;
        let incumbent = Incumbent::new(start, initial);

        let mut rngs: Vec<fastrand::Rng> = (0..workers as u64)
            .map(|i| match seed {
                Some(s) => fastrand::Rng::with_seed(s + i),
                None => fastrand::Rng::new(),
            })
            .collect();

        let fudge = self.params.effective_fudge(workers);
        rngs.par_iter_mut()
            .for_each(|rng| self.run_ladder(&incumbent, fudge, rng, callback));

        let (best, fitness) = incumbent.snapshot();
        debug!(%best, fitness, "annealing finished");
        Ok(DigraphSolution {
            key: best,
            fitness,
            plaintext: decrypt(&best, &self.ciphertext, self.filler),
        })
    }

    /// One worker's temperature ladder, from `start_temp` down to 0.
    fn run_ladder<CB: ProgressCallback>(
        &self,
        incumbent: &Incumbent,
        fudge: f64,
        rng: &mut fastrand::Rng,
        callback: &CB,
    ) {
        let p = &self.params;
        let mut temperature = p.start_temp;

        while temperature >= 0.0 {
            for _ in 0..p.iterations {
                let (mut candidate, _) = incumbent.snapshot();
                mutation::mutate(&mut candidate, rng);

                let text = decrypt(&candidate, &self.ciphertext, self.filler);
                let scored = match self.scorer.score(&text) {
                    Ok(s) => s,
                    // A candidate that cannot be scored is a failed
                    // candidate, not a failed search.
                    Err(_) => continue,
                };

                let draw = rng.f64();
                incumbent.try_accept(&candidate, scored.fitness, temperature, fudge, draw);
            }

            let (key, fitness) = incumbent.snapshot();
            debug!(temperature, fitness, key = %key, "rung complete");
            if fitness > p.threshold {
                break;
            }
            if !callback.on_progress(temperature, fitness, &key) {
                break;
            }
            temperature -= p.temp_step;
        }
    }
}

use clap::Args;

/// Tunables for the digraph annealer. The CLI defaults below are the
/// documented single-worker defaults; the parallel path swaps in a higher
/// fudge factor (see `effective_fudge`).
#[derive(Args, Debug, Clone)]
pub struct DigraphParams {
    /// Inner iterations per temperature rung.
    #[arg(long, default_value_t = 10_000)]
    pub iterations: usize,

    /// Top of the temperature ladder.
    #[arg(long, default_value_t = 30.0)]
    pub start_temp: f32,

    /// Ladder decrement per rung.
    #[arg(long, default_value_t = 0.2)]
    pub temp_step: f32,

    /// Subtracted from the acceptance probability; closer to 1 keeps
    /// fewer bad keys. Defaults to 0.5 single-worker, 0.75 multi-worker.
    #[arg(long)]
    pub fudge_factor: Option<f64>,

    /// Fitness at which the ladder stops early.
    #[arg(long, default_value_t = 95.0)]
    pub threshold: f64,

    /// Padding symbol stripped from decrypted text.
    #[arg(long, default_value_t = 'X')]
    pub filler: char,
}

/// Single-worker fudge factor.
pub const FUDGE_SINGLE: f64 = 0.5;
/// Multi-worker fudge factor: with many workers feeding one incumbent, a
/// stricter fudge keeps the shared state from churning.
pub const FUDGE_PARALLEL: f64 = 0.75;

pub const DEFAULT_WORKERS: usize = 10;

impl Default for DigraphParams {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            start_temp: 30.0,
            temp_step: 0.2,
            fudge_factor: None,
            threshold: 95.0,
            filler: 'X',
        }
    }
}

impl DigraphParams {
    /// The fudge factor in effect for a given worker count, unless
    /// explicitly overridden.
    pub fn effective_fudge(&self, workers: usize) -> f64 {
        self.fudge_factor.unwrap_or(if workers > 1 {
            FUDGE_PARALLEL
        } else {
            FUDGE_SINGLE
        })
    }
}

/// Tunables for the substitution hill-climber.
#[derive(Args, Debug, Clone)]
pub struct SubstitutionParams {
    /// Maximum number of hill-climb restarts.
    #[arg(long, default_value_t = 2_000)]
    pub iterations: usize,

    /// Stop once the best local maximum has been hit this many times.
    #[arg(long, default_value_t = 3)]
    pub tie_threshold: usize,
}

impl Default for SubstitutionParams {
    fn default() -> Self {
        Self {
            iterations: 2_000,
            tie_threshold: 3,
        }
    }
}

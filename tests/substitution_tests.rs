mod common;

use cipherforge::config::SubstitutionParams;
use cipherforge::substitution::{
    HillClimber, NoRestartProgress, PermutationKey, RestartCallback,
};
use cipherforge::CipherForgeError;
use common::{model_with_entries, pack, uniform_model, AZ};
use std::cell::RefCell;

/// Three-symbol model where only the bigrams of "ABCABC..." score.
/// Any start converges to the global optimum in one climbing pass.
fn abc_model() -> cipherforge::model::LanguageModel {
    model_with_entries(
        "abc",
        2,
        &[
            (pack(&[0, 1]), 1000), // AB
            (pack(&[1, 2]), 1000), // BC
            (pack(&[2, 0]), 1000), // CA
        ],
    )
}

struct RestartRecorder {
    history: RefCell<Vec<f64>>,
}

impl RestartCallback for RestartRecorder {
    fn on_restart(&self, _restart: usize, fitness: f64, _key: &PermutationKey) -> bool {
        self.history.borrow_mut().push(fitness);
        true
    }
}

#[test]
fn recovers_a_known_substitution() {
    let model = abc_model();
    let climber = HillClimber::new(&model, "BACBACBACBAC", SubstitutionParams::default()).unwrap();
    let mut rng = fastrand::Rng::with_seed(7);
    let solution = climber.crack(&mut rng, &NoRestartProgress).unwrap();

    // Every bigram of the optimal decryption scores 1000, de-scaled by 10.
    assert_eq!(solution.fitness, 100.0);
    assert_eq!(solution.plaintext, "ABCABCABCABC");
    assert!(solution.key.is_bijection());
}

#[test]
fn tie_threshold_of_one_stops_after_the_first_restart() {
    let model = abc_model();
    let params = SubstitutionParams {
        iterations: 500,
        tie_threshold: 1,
    };
    let climber = HillClimber::new(&model, "BACBACBACBAC", params).unwrap();
    let recorder = RestartRecorder {
        history: RefCell::new(Vec::new()),
    };
    let mut rng = fastrand::Rng::with_seed(11);
    climber.crack(&mut rng, &recorder).unwrap();

    assert_eq!(recorder.history.borrow().len(), 1);
}

#[test]
fn best_fitness_never_decreases_across_restarts() {
    let model = uniform_model("abcdef", 2, 30);
    let params = SubstitutionParams {
        iterations: 8,
        tie_threshold: usize::MAX,
    };
    let climber = HillClimber::new(&model, "FEDCBAFEDCBA", params).unwrap();
    let recorder = RestartRecorder {
        history: RefCell::new(Vec::new()),
    };
    let mut rng = fastrand::Rng::with_seed(3);
    climber.crack(&mut rng, &recorder).unwrap();

    let history = recorder.history.borrow();
    assert!(!history.is_empty());
    assert!(history.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn reported_fitness_matches_the_reported_key() {
    let model = model_with_entries(
        AZ,
        2,
        &[
            (pack(&[19, 7]), 700), // TH
            (pack(&[7, 4]), 600),  // HE
            (pack(&[0, 19]), 300), // AT
        ],
    );
    let climber = HillClimber::new(
        &model,
        "GVSXKWGVSXKWGVSXKW",
        SubstitutionParams {
            iterations: 20,
            tie_threshold: 3,
        },
    )
    .unwrap();
    let mut rng = fastrand::Rng::with_seed(19);
    let solution = climber.crack(&mut rng, &NoRestartProgress).unwrap();

    let rescored = cipherforge::scorer::Scorer::new(&model)
        .score(&solution.plaintext)
        .unwrap();
    assert_eq!(solution.fitness, rescored.fitness);
}

#[test]
fn climbing_ends_at_a_local_optimum() {
    let model = abc_model();
    let ciphertext = "CABCABCABCAB";
    let climber = HillClimber::new(&model, ciphertext, SubstitutionParams::default()).unwrap();
    let mut key = PermutationKey::identity(3);
    let local_max = climber.hill_climb(&mut key).unwrap();

    let scorer = cipherforge::scorer::Scorer::new(&model);
    let score_with = |key: &PermutationKey| {
        let ranks: Vec<u8> = ciphertext
            .bytes()
            .map(|b| key.plain_rank(model.rank_of(b).unwrap()))
            .collect();
        scorer.score_ranks(&ranks).unwrap()
    };
    assert_eq!(score_with(&key), local_max);

    // No single further swap improves on the returned key.
    for i in 0..2 {
        for j in i + 1..3 {
            let mut probe = key.clone();
            probe.swap(i, j);
            assert!(score_with(&probe) <= local_max);
        }
    }
}

#[test]
fn random_keys_are_bijections() {
    let mut rng = fastrand::Rng::with_seed(5);
    for _ in 0..32 {
        assert!(PermutationKey::random(26, &mut rng).is_bijection());
    }
}

#[test]
fn too_short_ciphertext_is_rejected_up_front() {
    let model = uniform_model(AZ, 4, 10);
    assert!(matches!(
        HillClimber::new(&model, "ab!", SubstitutionParams::default()),
        Err(CipherForgeError::InsufficientText { needed: 4, got: 2 })
    ));
}

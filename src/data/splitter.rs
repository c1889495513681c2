// ============================================================
// Layer 4 — Train/Holdout Splitter
// ============================================================
// Shuffles samples and splits them into two sets:
//   - Training set: used to fit the model
//   - Holdout set:  used only to report how well it generalises
//
// The shuffle is seeded, so the same seed and the same input
// always give the same split, and with it the same coefficients.
//
// Holdout size is ceil(n * test_fraction), training gets the rest.
// With test_fraction = 0.2 and 1000 rows that is 800 / 200.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom over a
// StdRng seeded with seed_from_u64.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, holdout).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out, e.g. 0.2 = 20%
/// * `seed`          - Shuffle seed
pub fn split_train_test<T>(mut samples: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total  = samples.len();
    let n_test = ((total as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let n_test = n_test.min(total);

    // split_off(n) keeps [0..n) and returns [n..total)
    let test = samples.split_off(total - n_test);

    tracing::debug!(
        "Dataset split: {} training, {} holdout (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    (samples, test)
}

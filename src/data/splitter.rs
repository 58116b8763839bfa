// ============================================================
// Layer 4 — Seeded Train/Test Splitter
// ============================================================
// Shuffles items with a seeded RNG and splits them in two.
//
// The held-out part gets ceil(n * test_fraction) items, the
// same sizing rule as scikit-learn's train_test_split, so a
// 10% split of 7613 tweets holds out 762.
//
// The seed makes every run reproducible: the same items and
// seed always produce the same split.
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `items` with `seed` and split into (train, test).
///
/// # Arguments
/// * `items`         - All available items (consumed by this function)
/// * `test_fraction` - Proportion held out, e.g. 0.1 = 10%; clamped to [0, 1]
/// * `seed`          - RNG seed for the shuffle
pub fn split_with_seed<T>(mut items: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);

    let total     = items.len();
    let fraction  = test_fraction.clamp(0.0, 1.0);
    let test_size = ((total as f64) * fraction).ceil() as usize;
    let split_at  = total - test_size.min(total);

    // split_off(n) leaves [0..n) in `items` and returns [n..total)
    let test = items.split_off(split_at);

    tracing::debug!(
        "Split (seed {}): {} train, {} held out",
        seed,
        items.len(),
        test.len(),
    );

    (items, test)
}

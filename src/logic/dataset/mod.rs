//! Dataset Module - Ordered labelled records
//!
//! - `loader`: row ingestion adapter (CSV reading + record factory)
//! - train/test split with an explicit, seedable generator

pub mod loader;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::logic::features::FeatureRecord;

pub use loader::{load_numbered_records, load_records, read_rows, LoadError, LoadPolicy};

// ============================================================================
// PROPORTIONS
// ============================================================================

/// Number of records labelled as anomaly
pub fn attack_count<R: FeatureRecord>(dataset: &[R]) -> usize {
    dataset.iter().filter(|r| r.is_anomaly()).count()
}

/// Fraction of records labelled as anomaly (0.0 for an empty dataset)
pub fn attack_proportion<R: FeatureRecord>(dataset: &[R]) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    attack_count(dataset) as f64 / dataset.len() as f64
}

// ============================================================================
// TRAIN / TEST SPLIT
// ============================================================================

/// Shuffle a copy of `dataset` and cut it at `len * train_ratio`.
///
/// The generator is passed in so callers (and tests) control determinism.
/// `train_ratio` is clamped to [0, 1].
pub fn split_train_test<T, G>(dataset: &[T], train_ratio: f64, rng: &mut G) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    G: Rng + ?Sized,
{
    let mut shuffled = dataset.to_vec();
    shuffled.shuffle(rng);

    let ratio = train_ratio.clamp(0.0, 1.0);
    let split_point = (dataset.len() as f64 * ratio) as usize;
    let test = shuffled.split_off(split_point);

    log::debug!("Train/test split: {} train, {} test", shuffled.len(), test.len());

    (shuffled, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::EcuRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(n: i64) -> Vec<EcuRecord> {
        (0..n).map(|i| EcuRecord::new(1000 + i, 1, 10, i % 4 == 0)).collect()
    }

    #[test]
    fn test_attack_proportion() {
        let data = sample(8);
        assert_eq!(attack_count(&data), 2);
        assert_eq!(attack_proportion(&data), 0.25);
        assert_eq!(attack_proportion::<EcuRecord>(&[]), 0.0);
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let data = sample(10);
        let mut rng = StdRng::seed_from_u64(7);
        let (train, test) = split_train_test(&data, 0.8, &mut rng);

        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let mut all: Vec<i64> = train.iter().chain(test.iter()).map(|r| r.rpm).collect();
        all.sort();
        assert_eq!(all, (1000..1010).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_deterministic_for_seed() {
        let data = sample(50);
        let a = split_train_test(&data, 0.7, &mut StdRng::seed_from_u64(42));
        let b = split_train_test(&data, 0.7, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_ratio_bounds() {
        let data = sample(5);
        let mut rng = StdRng::seed_from_u64(1);
        let (train, test) = split_train_test(&data, 1.5, &mut rng);
        assert_eq!(train.len(), 5);
        assert!(test.is_empty());
    }
}

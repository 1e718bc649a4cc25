//! Binary entropy and information gain over the anomaly label

use crate::logic::features::FeatureRecord;

/// Gains at or below this are treated as no improvement
pub const MIN_GAIN: f64 = 1e-12;

/// H(p) = -p·log2(p) - (1-p)·log2(1-p), 0 for pure partitions
pub fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -p * p.log2() - (1.0 - p) * (1.0 - p).log2()
}

/// Entropy of a partition given its attack count and size
pub fn entropy_of_counts(attacks: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    binary_entropy(attacks as f64 / total as f64)
}

pub fn partition_entropy<R: FeatureRecord>(records: &[R]) -> f64 {
    let attacks = records.iter().filter(|r| r.is_anomaly()).count();
    entropy_of_counts(attacks, records.len())
}

/// Gain of a split described only by counts: parent (attacks, total) and
/// the left side (attacks, total); the right side is the remainder.
pub fn gain_from_counts(
    parent_attacks: usize,
    parent_total: usize,
    left_attacks: usize,
    left_total: usize,
) -> f64 {
    if parent_total == 0 {
        return 0.0;
    }

    let right_total = parent_total - left_total;
    let right_attacks = parent_attacks - left_attacks;

    let n = parent_total as f64;
    let weighted = (left_total as f64 / n) * entropy_of_counts(left_attacks, left_total)
        + (right_total as f64 / n) * entropy_of_counts(right_attacks, right_total);

    entropy_of_counts(parent_attacks, parent_total) - weighted
}

/// Gain of sending `value(feature) <= threshold` left and the rest right
pub fn information_gain<R: FeatureRecord>(records: &[R], feature: usize, threshold: i64) -> f64 {
    let mut parent_attacks = 0;
    let mut left_attacks = 0;
    let mut left_total = 0;

    for record in records {
        let attack = record.is_anomaly();
        if attack {
            parent_attacks += 1;
        }
        if record.feature_value(feature) <= threshold {
            left_total += 1;
            if attack {
                left_attacks += 1;
            }
        }
    }

    gain_from_counts(parent_attacks, records.len(), left_attacks, left_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::EcuRecord;

    #[test]
    fn test_binary_entropy_bounds() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
        assert!((binary_entropy(0.5) - 1.0).abs() < 1e-12);

        for i in 1..100 {
            let h = binary_entropy(i as f64 / 100.0);
            assert!(h > 0.0 && h <= 1.0, "H({}) = {}", i, h);
        }
    }

    #[test]
    fn test_entropy_symmetry() {
        assert!((binary_entropy(0.2) - binary_entropy(0.8)).abs() < 1e-12);
    }

    #[test]
    fn test_partition_entropy_zero_iff_pure() {
        let pure = vec![EcuRecord::new(1000, 1, 10, true); 4];
        assert_eq!(partition_entropy(&pure), 0.0);

        let mixed = vec![EcuRecord::new(1000, 1, 10, true), EcuRecord::new(1000, 1, 10, false)];
        assert!(partition_entropy(&mixed) > 0.0);

        assert_eq!(partition_entropy::<EcuRecord>(&[]), 0.0);
    }

    #[test]
    fn test_perfect_split_gain_equals_parent_entropy() {
        let data = vec![
            EcuRecord::new(1000, 1, 10, false),
            EcuRecord::new(1100, 1, 10, false),
            EcuRecord::new(6000, 1, 10, true),
            EcuRecord::new(6500, 1, 10, true),
        ];
        let gain = information_gain(&data, 0, 1100);
        assert!((gain - 1.0).abs() < 1e-12);

        // Everything on one side: no information
        assert_eq!(information_gain(&data, 0, 6500), 0.0);
    }
}

//! Tree Builder - recursive entropy-gain induction
//!
//! Stopping rules, in order:
//! 1. empty partition → Leaf(false)
//! 2. depth >= max_depth → majority leaf (attack proportion >= 0.5)
//! 3. pure partition → constant leaf
//! 4. no split with positive gain → majority leaf
//!
//! Candidate thresholds are the distinct values of each feature in ascending
//! order, features in index order; the first strictly larger gain wins.

use crate::constants::{DEFAULT_PARALLEL_MIN_SAMPLES, MAX_TREE_DEPTH};
use crate::logic::features::FeatureRecord;

use super::entropy::{gain_from_counts, MIN_GAIN};
use super::node::Node;

// ============================================================================
// SPLIT SEARCH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub feature: usize,
    pub threshold: i64,
    pub gain: f64,
}

/// Best (feature, threshold) over the whole search space, `None` when no
/// candidate improves purity.
pub fn find_best_split<R: FeatureRecord>(data: &[R]) -> Option<Split> {
    let first = data.first()?;
    let feature_count = first.feature_count();
    let total = data.len();
    let total_attacks = data.iter().filter(|r| r.is_anomaly()).count();

    let mut best: Option<Split> = None;
    let mut column: Vec<(i64, bool)> = Vec::with_capacity(total);

    for feature in 0..feature_count {
        column.clear();
        column.extend(data.iter().map(|r| (r.feature_value(feature), r.is_anomaly())));
        column.sort_unstable_by_key(|&(value, _)| value);

        // Sweep distinct values; everything up to and including `value` goes left
        let mut left_total = 0;
        let mut left_attacks = 0;
        let mut i = 0;
        while i < total {
            let value = column[i].0;
            while i < total && column[i].0 == value {
                left_total += 1;
                if column[i].1 {
                    left_attacks += 1;
                }
                i += 1;
            }

            let gain = gain_from_counts(total_attacks, total, left_attacks, left_total);
            if gain > MIN_GAIN && best.map_or(true, |b| gain > b.gain) {
                best = Some(Split { feature, threshold: value, gain });
            }
        }
    }

    best
}

/// Partition into (value <= threshold, value > threshold)
fn partition<'a, R: FeatureRecord>(data: &[&'a R], feature: usize, threshold: i64) -> (Vec<&'a R>, Vec<&'a R>) {
    data.iter().copied().partition(|r| r.feature_value(feature) <= threshold)
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuilder {
    max_depth: usize,
    parallel_min_samples: usize,
}

impl TreeBuilder {
    /// Depths above [`MAX_TREE_DEPTH`] are clamped
    pub fn new(max_depth: usize) -> Self {
        if max_depth > MAX_TREE_DEPTH {
            log::warn!("max_depth {} clamped to {}", max_depth, MAX_TREE_DEPTH);
        }
        Self {
            max_depth: max_depth.min(MAX_TREE_DEPTH),
            parallel_min_samples: DEFAULT_PARALLEL_MIN_SAMPLES,
        }
    }

    /// Build both subtrees on scoped threads once each side has at least
    /// `samples` records
    pub fn with_parallel_min_samples(mut self, samples: usize) -> Self {
        self.parallel_min_samples = samples.max(1);
        self
    }

    /// Never spawn threads
    pub fn sequential(mut self) -> Self {
        self.parallel_min_samples = usize::MAX;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn build<R: FeatureRecord + Sync>(&self, dataset: &[R]) -> Node {
        self.build_at(dataset, 0)
    }

    /// Build as if the root sat at `depth`
    pub fn build_at<R: FeatureRecord + Sync>(&self, dataset: &[R], depth: usize) -> Node {
        log::info!(
            "Building tree: {} records, max depth {}",
            dataset.len(),
            self.max_depth
        );
        let refs: Vec<&R> = dataset.iter().collect();
        let root = self.build_node(&refs, depth);
        log::info!(
            "Tree built: depth {}, {} leaves",
            root.depth(),
            root.leaf_count()
        );
        root
    }

    fn build_node<R: FeatureRecord + Sync>(&self, data: &[&R], depth: usize) -> Node {
        let indent = "  ".repeat(depth);
        log::debug!("{}BuildTree: depth={}, dataset size={}", indent, depth, data.len());

        if data.is_empty() {
            log::debug!("{}└─ Empty partition → Leaf(false)", indent);
            return Node::leaf(false);
        }

        let attacks = data.iter().filter(|r| r.is_anomaly()).count();
        let proportion = attacks as f64 / data.len() as f64;
        let majority = proportion >= 0.5;
        log::debug!("{}├─ Attack proportion: {:.2}%", indent, proportion * 100.0);

        if depth >= self.max_depth {
            log::debug!("{}└─ Max depth → Leaf({})", indent, majority);
            return Node::leaf(majority);
        }

        if attacks == 0 || attacks == data.len() {
            log::debug!("{}└─ Pure partition → Leaf({})", indent, majority);
            return Node::leaf(majority);
        }

        let split = match find_best_split(data) {
            Some(split) => split,
            None => {
                log::debug!("{}└─ No gain from splitting → Leaf({})", indent, majority);
                return Node::leaf(majority);
            }
        };

        let (left, right) = partition(data, split.feature, split.threshold);
        log::debug!(
            "{}├─ Split feature={} threshold={} gain={:.4} (left={}, right={})",
            indent,
            split.feature,
            split.threshold,
            split.gain,
            left.len(),
            right.len()
        );

        let (left_node, right_node) = if left.len() >= self.parallel_min_samples
            && right.len() >= self.parallel_min_samples
        {
            std::thread::scope(|scope| {
                let handle = scope.spawn(|| self.build_node(&left, depth + 1));
                let right_node = self.build_node(&right, depth + 1);
                let left_node = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                (left_node, right_node)
            })
        } else {
            (
                self.build_node(&left, depth + 1),
                self.build_node(&right, depth + 1),
            )
        };

        Node::internal(split.feature, split.threshold, left_node, right_node)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_MAX_DEPTH)
    }
}

/// Build a tree for `dataset` whose root sits at `depth`
pub fn build_tree<R: FeatureRecord + Sync>(dataset: &[R], depth: usize, max_depth: usize) -> Node {
    TreeBuilder::new(max_depth).build_at(dataset, depth)
}

//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Default sliding window size for the stream detector
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Deepest tree the builder will grow. A saved model nests one JSON object
/// per level and must stay under the decoder's nesting limit (128).
pub const MAX_TREE_DEPTH: usize = 64;

/// Default share of records used for training
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Default per-rule anomaly threshold for the ECU stream rules
pub const DEFAULT_RULE_THRESHOLD: f64 = 0.5;

/// Partitions at least this large on both sides build subtrees in parallel
pub const DEFAULT_PARALLEL_MIN_SAMPLES: usize = 512;

/// Model file name under the data directory
pub const DEFAULT_MODEL_FILE: &str = "model.json";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ECU_GUARD_";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "ECU Guard";

// ============================================
// Helper functions
// ============================================

/// Default model path (local data dir, falls back to cwd)
pub fn default_model_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("ecu-guard")
        .join(DEFAULT_MODEL_FILE)
}

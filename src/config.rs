//! Configuration module
//!
//! Defaults → optional JSON file → `ECU_GUARD_*` environment overrides →
//! validation.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::logic::dataset::LoadPolicy;
use crate::logic::tree::TreeBuilder;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO Error: {}", e),
            ConfigError::SerializationError(e) => write!(f, "Serialization Error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerializationError(err)
    }
}

// ============================================================================
// APP CONFIG
// ============================================================================

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Stream detector window size (>= 2)
    pub window_size: usize,

    /// Maximum tree depth
    pub max_depth: usize,

    /// Share of records used for training (0, 1)
    pub train_ratio: f64,

    /// Seed for shuffling / generation; random when absent
    pub seed: Option<u64>,

    /// Threshold for each ECU stream rule
    pub rule_threshold: f64,

    /// Bad input rows: abort or skip
    pub load_policy: LoadPolicy,

    /// Parallel subtree builds above this partition size
    pub parallel_min_samples: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            train_ratio: DEFAULT_TRAIN_RATIO,
            seed: None,
            rule_threshold: DEFAULT_RULE_THRESHOLD,
            load_policy: LoadPolicy::default(),
            parallel_min_samples: DEFAULT_PARALLEL_MIN_SAMPLES,
        }
    }
}

impl AppConfig {
    /// Load configuration: file (if any), then environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Override from `ECU_GUARD_*` environment variables
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok());
    }

    /// Override from any key → value source; unparsable values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
            let raw = raw?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    log::warn!("Ignoring {}{}={:?}: not a valid value", ENV_PREFIX, key, raw);
                    None
                }
            }
        }

        if let Some(v) = parse("WINDOW_SIZE", lookup("WINDOW_SIZE")) {
            self.window_size = v;
        }
        if let Some(v) = parse("MAX_DEPTH", lookup("MAX_DEPTH")) {
            self.max_depth = v;
        }
        if let Some(v) = parse("TRAIN_RATIO", lookup("TRAIN_RATIO")) {
            self.train_ratio = v;
        }
        if let Some(v) = parse("SEED", lookup("SEED")) {
            self.seed = Some(v);
        }
        if let Some(v) = parse("RULE_THRESHOLD", lookup("RULE_THRESHOLD")) {
            self.rule_threshold = v;
        }
        if let Some(v) = parse("PARALLEL_MIN_SAMPLES", lookup("PARALLEL_MIN_SAMPLES")) {
            self.parallel_min_samples = v;
        }
        if let Some(raw) = lookup("LOAD_POLICY") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "abort" => self.load_policy = LoadPolicy::Abort,
                "skip" => self.load_policy = LoadPolicy::Skip,
                other => log::warn!("Ignoring {}LOAD_POLICY={:?}", ENV_PREFIX, other),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        if self.max_depth == 0 || self.max_depth > MAX_TREE_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "max_depth must be in 1..={}, got {}",
                MAX_TREE_DEPTH, self.max_depth
            )));
        }
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "train_ratio must be in (0, 1), got {}",
                self.train_ratio
            )));
        }
        if self.rule_threshold.is_nan() || self.rule_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "rule_threshold must be non-negative, got {}",
                self.rule_threshold
            )));
        }
        Ok(())
    }

    /// Seeded generator when `seed` is set
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new(self.max_depth).with_parallel_min_samples(self.parallel_min_samples)
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Feature Layout - Centralized ECU Feature Definition
//!
//! **This file controls the ECU feature schema**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! Trained trees address features by index, so a model file is only valid
//! against the layout it was trained with.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in a record
pub const FEATURE_LAYOUT: &[&str] = &[
    "rpm",    // 0: Engine revolutions per minute
    "gear",   // 1: Engaged gear (0 = neutral)
    "speed",  // 2: Vehicle speed (km/h)
];

/// Total number of features
pub const FEATURE_COUNT: usize = 3;

pub const RPM: usize = 0;
pub const GEAR: usize = 1;
pub const SPEED: usize = 2;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of version + ordered feature names
pub fn layout_hash() -> u32 {
    hash_names(FEATURE_VERSION, FEATURE_LAYOUT.iter().copied())
}

/// CRC32 of an arbitrary layout (used to check model documents)
pub fn hash_names<'a, I>(version: u8, names: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Hasher::new();
    hasher.update(&[version]);

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_matches_names() {
        assert_eq!(layout_hash(), hash_names(FEATURE_VERSION, ["rpm", "gear", "speed"]));
        assert_ne!(layout_hash(), hash_names(FEATURE_VERSION, ["gear", "rpm", "speed"]));
        assert_ne!(layout_hash(), hash_names(FEATURE_VERSION + 1, ["rpm", "gear", "speed"]));
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("rpm"), Some(RPM));
        assert_eq!(feature_index("gear"), Some(GEAR));
        assert_eq!(feature_index("speed"), Some(SPEED));
        assert_eq!(feature_index("torque"), None);
        assert_eq!(feature_name(SPEED), Some("speed"));
        assert_eq!(feature_name(3), None);
    }
}

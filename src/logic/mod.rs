//! Logic Module - Detection Engines
//!
//! ## Architecture
//! - `features/` - Record capability set and ECU feature layout
//! - `dataset/` - Row ingestion, train/test split
//! - `tree/` - Decision tree induction + inference
//! - `model/` - Tree documents, model files, detector trait
//! - `stream/` - Sliding window detector
//! - `ecu_rules/` - ECU physical rules (RPM/Gear/Speed)

pub mod features;
pub mod dataset;
pub mod tree;
pub mod model;
pub mod stream;
pub mod ecu_rules;
pub mod generator;

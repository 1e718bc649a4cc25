//! ECU Guard - Vehicle telemetry anomaly detection
//!
//! Two detection modes over engine RPM / gear / speed telemetry:
//! - offline: entropy-driven decision tree trained on labelled records
//! - online: sliding-window rule checker with per-feature comparators
//!
//! ## Layout
//! - `logic/features` - record capability set + ECU feature layout
//! - `logic/dataset` - row ingestion, train/test split
//! - `logic/tree` - induction, prediction, evaluation
//! - `logic/model` - tree documents and model files
//! - `logic/stream` - window detector and comparators
//! - `logic/ecu_rules` - physical ECU rules for the stream detector

pub mod config;
pub mod constants;
pub mod logic;

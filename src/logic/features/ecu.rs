//! ECU Record - rpm / gear / speed telemetry point
//!
//! Row factories turn already-split text fields into records. They never open
//! files; see `dataset::loader` for that.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, feature_name, FEATURE_COUNT, GEAR, RPM, SPEED};
use super::FeatureRecord;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    MissingField { field: &'static str, position: usize },
    InvalidValue { field: &'static str, value: String },
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::MissingField { field, position } => {
                write!(f, "missing {} value (column {})", field, position)
            }
            RecordError::InvalidValue { field, value } => {
                write!(f, "invalid {} value: {:?}", field, value)
            }
        }
    }
}

impl std::error::Error for RecordError {}

// ============================================================================
// ECU RECORD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EcuRecord {
    pub rpm: i64,
    pub gear: i64,
    pub speed: i64,
    /// true when status == 1
    pub is_attack: bool,
}

impl EcuRecord {
    pub fn new(rpm: i64, gear: i64, speed: i64, is_attack: bool) -> Self {
        Self { rpm, gear, speed, is_attack }
    }

    /// Unlabelled reading (stream input)
    pub fn reading(rpm: i64, gear: i64, speed: i64) -> Self {
        Self::new(rpm, gear, speed, false)
    }

    /// Training row: `rpm,gear,speed,status[,description]`
    pub fn from_training_row<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        let rpm = parse_field(fields, 0, "rpm")?;
        let gear = parse_field(fields, 1, "gear")?;
        let speed = parse_field(fields, 2, "speed")?;
        let status = parse_field(fields, 3, "status")?;

        Ok(Self::new(rpm, gear, speed, status == 1))
    }

    /// Stream row: `timestamp,id,rpm,gear,speed[,payload]`
    pub fn from_stream_row<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        let rpm = parse_field(fields, 2, "rpm")?;
        let gear = parse_field(fields, 3, "gear")?;
        let speed = parse_field(fields, 4, "speed")?;

        Ok(Self::reading(rpm, gear, speed))
    }
}

fn parse_field<S: AsRef<str>>(
    fields: &[S],
    position: usize,
    field: &'static str,
) -> Result<i64, RecordError> {
    let raw: &str = fields
        .get(position)
        .ok_or(RecordError::MissingField { field, position })?
        .as_ref();
    let raw = raw.trim();

    raw.parse::<i64>().map_err(|_| RecordError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}

impl FeatureRecord for EcuRecord {
    fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    fn feature_value(&self, index: usize) -> i64 {
        match index {
            RPM => self.rpm,
            GEAR => self.gear,
            SPEED => self.speed,
            _ => 0,
        }
    }

    fn feature_name(&self, index: usize) -> &str {
        feature_name(index).unwrap_or("")
    }

    fn is_anomaly(&self) -> bool {
        self.is_attack
    }

    fn feature_index(&self, name: &str) -> Option<usize> {
        feature_index(name)
    }
}

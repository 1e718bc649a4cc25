//! ECU Limits
//!
//! Constants only - no scoring logic here.

/// Feature that carries the engaged gear
pub const GEAR_FEATURE: &str = "gear";

// ============================================================================
// RPM
// ============================================================================

/// Largest plausible RPM change between two ticks
pub const MAX_RPM_STEP: f64 = 1000.0;

/// Below this with a gear engaged the engine is stalling
pub const IDLE_MIN_RPM: f64 = 800.0;

/// Below this in gear 2+ the driver should have downshifted
pub const DOWNSHIFT_RPM: f64 = 1500.0;

/// RPM ceiling for a gear; `None` outside 1..=5
pub fn max_rpm(gear: i64) -> Option<f64> {
    match gear {
        1 => Some(4000.0),
        2 => Some(3500.0),
        3 => Some(3000.0),
        4 => Some(2500.0),
        5 => Some(2000.0),
        _ => None,
    }
}

/// RPM above which the driver should have upshifted; top gear has none
pub fn upshift_rpm(gear: i64) -> Option<f64> {
    match gear {
        1 => Some(3000.0),
        2 => Some(2800.0),
        3 => Some(2500.0),
        4 => Some(2200.0),
        _ => None,
    }
}

// ============================================================================
// GEAR
// ============================================================================

/// Gears can only move one step per tick
pub const MAX_GEAR_STEP: f64 = 1.0;

pub const MIN_GEAR: f64 = 0.0;
pub const MAX_GEAR: f64 = 5.0;

// ============================================================================
// SPEED
// ============================================================================

/// Largest plausible speed change between two ticks (km/h)
pub const MAX_SPEED_STEP: f64 = 5.0;

/// Allowed (min, max) speed for a gear; `None` outside 1..=5
pub fn speed_band(gear: i64) -> Option<(f64, f64)> {
    match gear {
        1 => Some((0.0, 20.0)),
        2 => Some((15.0, 40.0)),
        3 => Some((30.0, 70.0)),
        4 => Some((50.0, 100.0)),
        5 => Some((70.0, 150.0)),
        _ => None,
    }
}

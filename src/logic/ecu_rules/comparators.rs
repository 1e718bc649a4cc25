//! ECU comparators. Scores are 0.0 (ok) or 1.0 (violation).

use crate::logic::features::FeatureRecord;
use crate::logic::stream::FeatureComparator;

use super::rules::*;
use super::GearContext;

const OK: f64 = 0.0;
const VIOLATION: f64 = 1.0;

// ============================================================================
// RPM
// ============================================================================

#[derive(Debug, Clone)]
pub struct RpmComparator {
    context: GearContext,
}

impl RpmComparator {
    pub fn new(context: GearContext) -> Self {
        Self { context }
    }

    fn violates(&self, prev: f64, current: f64) -> bool {
        let gear = self.context.get();

        if (current - prev).abs() > MAX_RPM_STEP {
            return true;
        }

        // Stall
        if gear > 0 && current < IDLE_MIN_RPM {
            return true;
        }

        // Over the gear's ceiling (unknown gears have no valid ceiling)
        if gear > 0 && max_rpm(gear).map_or(current > 0.0, |max| current > max) {
            return true;
        }

        // Missed downshift
        if gear > 1 && current < DOWNSHIFT_RPM {
            return true;
        }

        // Missed upshift
        matches!(upshift_rpm(gear), Some(rpm) if current > rpm)
    }
}

impl FeatureComparator for RpmComparator {
    fn compare(&self, prev: f64, current: f64) -> f64 {
        if self.violates(prev, current) {
            VIOLATION
        } else {
            OK
        }
    }

    fn observe(&self, current: &dyn FeatureRecord) {
        self.context.update_from(current);
    }
}

// ============================================================================
// GEAR
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GearComparator;

impl FeatureComparator for GearComparator {
    fn compare(&self, prev: f64, current: f64) -> f64 {
        if (current - prev).abs() > MAX_GEAR_STEP {
            return VIOLATION;
        }
        if !(MIN_GEAR..=MAX_GEAR).contains(&current) {
            return VIOLATION;
        }
        OK
    }
}

// ============================================================================
// SPEED
// ============================================================================

#[derive(Debug, Clone)]
pub struct SpeedComparator {
    context: GearContext,
}

impl SpeedComparator {
    pub fn new(context: GearContext) -> Self {
        Self { context }
    }
}

impl FeatureComparator for SpeedComparator {
    fn compare(&self, prev: f64, current: f64) -> f64 {
        if (current - prev).abs() > MAX_SPEED_STEP {
            return VIOLATION;
        }

        let gear = self.context.get();
        if gear > 0 {
            // Unknown gears only allow standstill
            let (min, max) = speed_band(gear).unwrap_or((0.0, 0.0));
            if current < min || current > max {
                return VIOLATION;
            }
        }

        OK
    }

    fn observe(&self, current: &dyn FeatureRecord) {
        self.context.update_from(current);
    }
}

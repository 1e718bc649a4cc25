use super::*;
use crate::logic::features::EcuRecord;
use crate::logic::stream::FeatureComparator;

fn context(gear: i64) -> GearContext {
    let ctx = GearContext::new();
    ctx.set(gear);
    ctx
}

#[test]
fn test_gear_context_is_shared() {
    let ctx = GearContext::new();
    let rpm = RpmComparator::new(ctx.clone());
    let speed = SpeedComparator::new(ctx.clone());

    rpm.observe(&EcuRecord::reading(1000, 4, 60));
    assert_eq!(ctx.get(), 4);

    speed.observe(&EcuRecord::reading(1000, 2, 30));
    assert_eq!(ctx.get(), 2);
}

#[test]
fn test_rpm_rules() {
    let c = |gear| RpmComparator::new(context(gear));

    assert_eq!(c(2).compare(2000.0, 2200.0), 0.0);
    // Jump over 1000 per tick
    assert_eq!(c(0).compare(1000.0, 2100.0), 1.0);
    // Stall in gear
    assert_eq!(c(1).compare(1000.0, 700.0), 1.0);
    // Idle in neutral is fine
    assert_eq!(c(0).compare(1000.0, 700.0), 0.0);
    // Over the gear 5 ceiling
    assert_eq!(c(5).compare(1900.0, 2100.0), 1.0);
    assert_eq!(c(5).compare(1900.0, 1800.0), 0.0);
    // Missed downshift
    assert_eq!(c(2).compare(1600.0, 1400.0), 1.0);
    // Missed upshift
    assert_eq!(c(1).compare(2900.0, 3100.0), 1.0);
    // Unknown gear has no ceiling
    assert_eq!(c(7).compare(1000.0, 1000.0), 1.0);
}

#[test]
fn test_gear_rules() {
    let c = GearComparator;
    assert_eq!(c.compare(2.0, 3.0), 0.0);
    assert_eq!(c.compare(3.0, 3.0), 0.0);
    assert_eq!(c.compare(2.0, 4.0), 1.0);
    assert_eq!(c.compare(5.0, 6.0), 1.0);
    assert_eq!(c.compare(0.0, -1.0), 1.0);
}

#[test]
fn test_speed_rules() {
    let c = |gear| SpeedComparator::new(context(gear));

    assert_eq!(c(3).compare(40.0, 44.0), 0.0);
    // More than 5 km/h per tick
    assert_eq!(c(3).compare(40.0, 46.0), 1.0);
    // Outside gear 3 band (30-70)
    assert_eq!(c(3).compare(28.0, 25.0), 1.0);
    // Neutral has no band
    assert_eq!(c(0).compare(80.0, 80.0), 0.0);
    // Unknown gear only allows standstill
    assert_eq!(c(6).compare(0.0, 0.0), 0.0);
    assert_eq!(c(6).compare(0.0, 3.0), 1.0);
}

#[test]
fn test_ecu_detector_rules() {
    let detector = ecu_window_detector::<EcuRecord>(3, 0.5);
    assert_eq!(detector.rule_names(), vec!["gear", "rpm", "speed"]);
    assert_eq!(detector.threshold("rpm"), Some(0.5));
    assert_eq!(detector.window_size(), 3);
}

#[test]
fn test_steady_cruise_is_normal() {
    let mut detector = ecu_window_detector(3, 0.5);
    for _ in 0..10 {
        assert!(!detector.add_data(EcuRecord::reading(2000, 2, 30)).unwrap());
    }
}

#[test]
fn test_gear_context_refreshed_before_scoring() {
    let mut detector = ecu_window_detector(3, 0.5);

    assert!(!detector.add_data(EcuRecord::reading(2000, 2, 28)).unwrap());
    assert!(!detector.add_data(EcuRecord::reading(2000, 2, 28)).unwrap());
    // 25 km/h is fine for gear 2 but below the gear 3 band
    assert!(detector.add_data(EcuRecord::reading(2000, 3, 25)).unwrap());
}

#[test]
fn test_stall_is_detected() {
    let mut detector = ecu_window_detector(3, 0.5);

    detector.add_data(EcuRecord::reading(1000, 1, 10)).unwrap();
    detector.add_data(EcuRecord::reading(1000, 1, 10)).unwrap();
    assert!(detector.add_data(EcuRecord::reading(700, 1, 10)).unwrap());
}

#[test]
fn test_missing_gear_feature_leaves_context() {
    struct RpmOnly(i64);

    impl FeatureRecord for RpmOnly {
        fn feature_count(&self) -> usize {
            1
        }
        fn feature_value(&self, index: usize) -> i64 {
            if index == 0 { self.0 } else { 0 }
        }
        fn feature_name(&self, index: usize) -> &str {
            if index == 0 { "rpm" } else { "" }
        }
        fn is_anomaly(&self) -> bool {
            false
        }
    }

    let ctx = context(3);
    ctx.update_from(&RpmOnly(1200));
    assert_eq!(ctx.get(), 3);
}

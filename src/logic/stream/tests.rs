use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::logic::features::{EcuRecord, FeatureRecord};

fn rpm(value: i64) -> EcuRecord {
    EcuRecord::reading(value, 1, 10)
}

fn rpm_detector(window: usize, threshold: f64) -> WindowDetector<EcuRecord> {
    let mut detector = WindowDetector::new(window);
    detector.add_feature_config(FeatureConfig::new("rpm", threshold));
    detector
}

#[test]
fn test_cold_start_grace_period() {
    let mut detector = rpm_detector(3, 0.5);

    // Wild values, still no verdict until the window is full
    assert_eq!(detector.add_data(rpm(100)), Ok(false));
    assert_eq!(detector.add_data(rpm(90_000)), Ok(false));
    assert!(!detector.is_ready());

    assert_eq!(detector.add_data(rpm(90_000)), Ok(false));
    assert!(detector.is_ready());
}

#[test]
fn test_steady_rpm_is_normal() {
    let mut detector = rpm_detector(3, 0.5);
    for value in [1000, 1000, 1000] {
        assert_eq!(detector.add_data(rpm(value)), Ok(false));
    }
}

#[test]
fn test_rpm_jump_is_anomaly() {
    let mut detector = rpm_detector(3, 0.5);
    assert_eq!(detector.add_data(rpm(1000)), Ok(false));
    assert_eq!(detector.add_data(rpm(1000)), Ok(false));
    // |3000 - 1000| / 1000 = 2.0 > 0.5
    assert_eq!(detector.add_data(rpm(3000)), Ok(true));
}

#[test]
fn test_score_equal_to_threshold_is_not_anomaly() {
    let mut detector = rpm_detector(2, 0.5);
    detector.add_data(rpm(1000)).unwrap();
    assert_eq!(detector.add_data(rpm(1500)), Ok(false));
    assert_eq!(detector.add_data(rpm(2251)), Ok(true));
}

#[test]
fn test_window_stays_bounded() {
    let mut detector = rpm_detector(3, 10.0);
    for i in 0..20 {
        detector.add_data(rpm(1000 + i)).unwrap();
        assert!(detector.history_len() <= 3);
    }
    assert_eq!(detector.history_len(), 3);

    let status = detector.status();
    assert!(status.is_ready);
    assert_eq!(status.fill_percent, 100.0);
    assert_eq!(status.rule_count, 1);
}

#[test]
fn test_only_last_two_records_compared() {
    let mut detector = rpm_detector(4, 0.5);
    detector.add_data(rpm(100)).unwrap();
    detector.add_data(rpm(5000)).unwrap();
    detector.add_data(rpm(1000)).unwrap();
    // 1000 -> 1100 is a 10% change; older spikes do not matter
    assert_eq!(detector.add_data(rpm(1100)), Ok(false));
}

#[test]
fn test_set_threshold_unknown_feature() {
    let mut detector = rpm_detector(3, 0.5);

    assert_eq!(
        detector.set_threshold("torque", 0.2),
        Err(StreamError::FeatureNotFound("torque".to_string()))
    );
    assert_eq!(detector.rule_names(), vec!["rpm"]);
    assert_eq!(detector.threshold("rpm"), Some(0.5));

    // Existing rule still behaves the same
    detector.add_data(rpm(1000)).unwrap();
    detector.add_data(rpm(1000)).unwrap();
    assert_eq!(detector.add_data(rpm(3000)), Ok(true));
}

#[test]
fn test_set_threshold_changes_verdict() {
    let mut detector = rpm_detector(2, 0.5);
    detector.set_threshold("rpm", 3.0).unwrap();
    assert_eq!(detector.threshold("rpm"), Some(3.0));

    detector.add_data(rpm(1000)).unwrap();
    assert_eq!(detector.add_data(rpm(3000)), Ok(false));
}

#[test]
fn test_missing_feature_errors_but_keeps_record() {
    let mut detector = rpm_detector(2, 0.5);
    detector.add_feature_config(FeatureConfig::new("torque", 0.5));

    assert_eq!(detector.add_data(rpm(1000)), Ok(false));
    assert_eq!(
        detector.add_data(rpm(1000)),
        Err(StreamError::FeatureNotFound("torque".to_string()))
    );
    assert_eq!(detector.history_len(), 2);
}

#[test]
fn test_missing_feature_reported_even_when_other_rule_fires() {
    let mut detector = rpm_detector(2, 0.1);
    detector.add_feature_config(FeatureConfig::new("zzz", 0.5));

    detector.add_data(rpm(1000)).unwrap();
    assert!(detector.add_data(rpm(9000)).is_err());
}

#[test]
fn test_any_rule_flags_anomaly() {
    let mut detector = rpm_detector(2, 0.5);
    detector.add_feature_config(FeatureConfig::new("speed", 0.5));

    detector.add_data(EcuRecord::reading(1000, 1, 10)).unwrap();
    // rpm steady, speed doubles
    assert_eq!(detector.add_data(EcuRecord::reading(1000, 1, 20)), Ok(true));
}

#[test]
fn test_re_registration_overwrites_rule() {
    let mut detector = rpm_detector(2, 0.5);
    detector.add_feature_config(
        FeatureConfig::new("rpm", 0.5).with_comparator(|_prev: f64, _current: f64| 0.0),
    );
    assert_eq!(detector.rule_names().len(), 1);

    detector.add_data(rpm(1000)).unwrap();
    assert_eq!(detector.add_data(rpm(9000)), Ok(false));
}

#[test]
fn test_observe_runs_before_scoring() {
    struct Counting(Arc<AtomicUsize>);

    impl FeatureComparator for Counting {
        fn compare(&self, _prev: f64, _current: f64) -> f64 {
            // observe must already have seen the current record
            self.0.load(Ordering::SeqCst) as f64
        }

        fn observe(&self, current: &dyn FeatureRecord) {
            self.0.store(current.feature_value(0) as usize, Ordering::SeqCst);
        }
    }

    let seen = Arc::new(AtomicUsize::new(0));
    let mut detector = WindowDetector::new(2);
    detector.add_feature_config(FeatureConfig::new("gear", 5000.0).with_comparator(Counting(seen.clone())));

    detector.add_data(rpm(1000)).unwrap();
    assert_eq!(detector.add_data(rpm(4000)), Ok(false));
    assert_eq!(detector.add_data(rpm(6000)), Ok(true));
    assert_eq!(seen.load(Ordering::SeqCst), 6000);
}

#[test]
fn test_window_size_floor() {
    let detector = WindowDetector::<EcuRecord>::new(0);
    assert_eq!(detector.window_size(), window::MIN_WINDOW_SIZE);
}

#[test]
fn test_reset_restarts_grace_period() {
    let mut detector = rpm_detector(2, 0.5);
    detector.add_data(rpm(1000)).unwrap();
    detector.reset();
    assert_eq!(detector.add_data(rpm(5000)), Ok(false));
}

#[test]
fn test_boxed_records() {
    let mut detector: WindowDetector<Box<dyn FeatureRecord + Send>> = WindowDetector::new(2);
    detector.add_feature_config(FeatureConfig::new("rpm", 0.5));

    detector.add_data(Box::new(rpm(1000))).unwrap();
    assert_eq!(detector.add_data(Box::new(rpm(3000))), Ok(true));
}

#[test]
fn test_shared_detector_across_threads() {
    let shared = SharedWindowDetector::new(rpm_detector(3, 0.5));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let detector = shared.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    detector.add_data(rpm(1000)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.status().current_size, 3);
    assert_eq!(shared.set_threshold("speed", 1.0), Err(StreamError::FeatureNotFound("speed".to_string())));
    shared.set_threshold("rpm", 1.0).unwrap();
    assert_eq!(shared.threshold("rpm"), Some(1.0));
}

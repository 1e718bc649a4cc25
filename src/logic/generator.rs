//! Synthetic Fixture Generator
//!
//! Produces labelled vehicle rows: normal driving plus five anomaly families.
//! Every (rpm, gear, speed) triple is unique within one generator. Seeded so
//! fixtures are reproducible.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::logic::features::EcuRecord;

/// Give up on uniqueness for a row after this many draws
const MAX_ATTEMPTS_PER_ROW: usize = 1_000;

/// Header `write_csv` emits (the `VehicleRow` field order)
pub const CSV_HEADER: &str = "rpm,gear,speed,status,description";

// ============================================================================
// ROW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRow {
    pub rpm: i64,
    pub gear: i64,
    pub speed: i64,
    /// 1 = anomaly
    pub status: u8,
    pub description: String,
}

impl VehicleRow {
    fn new(rpm: i64, gear: i64, speed: i64, status: u8, description: &str) -> Self {
        Self { rpm, gear, speed, status, description: description.to_string() }
    }

    pub fn record(&self) -> EcuRecord {
        EcuRecord::new(self.rpm, self.gear, self.speed, self.status == 1)
    }

    fn key(&self) -> (i64, i64, i64) {
        (self.rpm, self.gear, self.speed)
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

pub struct Generator {
    rng: StdRng,
    seen: HashSet<(i64, i64, i64)>,
}

impl Generator {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), seen: HashSet::new() }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy(), seen: HashSet::new() }
    }

    fn normal_case(&mut self) -> VehicleRow {
        let gear = self.rng.gen_range(1..=5);

        let min_speed = ((gear - 1) * 15).max(5);
        let max_speed = (gear * 40).min(200);
        let speed = self.rng.gen_range(min_speed..=max_speed);

        let min_rpm = (1000 * speed / (gear * 40)).max(800);
        let rpm = self.rng.gen_range(min_rpm..=5500);

        VehicleRow::new(rpm, gear, speed, 0, "normal")
    }

    fn anomaly_case(&mut self) -> VehicleRow {
        let rng = &mut self.rng;
        match rng.gen_range(1..=5) {
            1 => VehicleRow::new(
                rng.gen_range(5501..=7000),
                rng.gen_range(1..=3),
                rng.gen_range(20..=119),
                1,
                "Over-revving",
            ),
            2 => VehicleRow::new(
                rng.gen_range(400..=799),
                rng.gen_range(1..=5),
                rng.gen_range(10..=30),
                1,
                "Stalling",
            ),
            3 => {
                let gear = rng.gen_range(1..=2);
                VehicleRow::new(
                    rng.gen_range(2000..=3999),
                    gear,
                    rng.gen_range(50..=120) + gear * 50,
                    1,
                    "Gear-speed mismatch",
                )
            }
            4 => VehicleRow::new(
                rng.gen_range(800..=2999),
                0,
                rng.gen_range(20..=80),
                1,
                "Neutral with speed",
            ),
            _ => {
                let gear = rng.gen_range(3..=5);
                VehicleRow::new(
                    rng.gen_range(800..=1500),
                    gear,
                    rng.gen_range(0..=15) + gear * 30,
                    1,
                    "RPM too low for speed-gear",
                )
            }
        }
    }

    /// `normal` normal rows then `anomaly` anomaly rows, shuffled
    pub fn generate(&mut self, normal: usize, anomaly: usize) -> Vec<VehicleRow> {
        let mut rows = Vec::with_capacity(normal + anomaly);

        self.fill(&mut rows, normal, Self::normal_case);
        self.fill(&mut rows, anomaly, Self::anomaly_case);

        rows.shuffle(&mut self.rng);
        log::info!("Generated {} rows ({} normal, {} anomaly)", rows.len(), normal, anomaly);
        rows
    }

    fn fill(&mut self, rows: &mut Vec<VehicleRow>, count: usize, make: fn(&mut Self) -> VehicleRow) {
        let target = rows.len() + count;
        let mut attempts = 0;

        while rows.len() < target {
            if attempts >= count.saturating_mul(MAX_ATTEMPTS_PER_ROW) {
                log::warn!("Unique row space exhausted after {} draws", attempts);
                break;
            }
            attempts += 1;

            let row = make(self);
            if self.seen.insert(row.key()) {
                rows.push(row);
            }
        }
    }
}

// ============================================================================
// CSV OUTPUT
// ============================================================================

/// Header row plus one quoted-as-needed row per record
pub fn write_csv<W: Write>(rows: &[VehicleRow], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_csv(rows: &[VehicleRow], path: &Path) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(rows, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::{load_records, read_rows, LoadPolicy};

    #[test]
    fn test_generate_counts_and_uniqueness() {
        let rows = Generator::new(1).generate(200, 50);
        assert_eq!(rows.len(), 250);
        assert_eq!(rows.iter().filter(|r| r.status == 1).count(), 50);

        let keys: HashSet<_> = rows.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), rows.len());
    }

    #[test]
    fn test_generate_is_seeded() {
        assert_eq!(Generator::new(9).generate(30, 10), Generator::new(9).generate(30, 10));
    }

    #[test]
    fn test_normal_rows_stay_in_band() {
        for row in Generator::new(3).generate(500, 0) {
            assert!((1..=5).contains(&row.gear));
            assert!((800..=5500).contains(&row.rpm));
            assert!(row.speed <= row.gear * 40);
        }
    }

    #[test]
    fn test_csv_round_trip_through_loader() {
        let rows = Generator::new(5).generate(20, 5);
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();

        let raw = read_rows(std::io::Cursor::new(buf), true).unwrap();
        let records = load_records(&raw, EcuRecord::from_training_row, LoadPolicy::Abort).unwrap();
        let expected: Vec<EcuRecord> = rows.iter().map(VehicleRow::record).collect();
        assert_eq!(records, expected);
    }

    #[test]
    fn test_csv_header_and_quoted_description() {
        let rows = vec![VehicleRow::new(1200, 2, 30, 1, "a,b")];
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.next(), Some("1200,2,30,1,\"a,b\""));

        let raw = read_rows(std::io::Cursor::new(text), true).unwrap();
        assert_eq!(raw[0].1, vec!["1200", "2", "30", "1", "a,b"]);
    }
}

//! Daily visit streak, persisted as a single JSON record.
//!
//! The file holds `{"last_date": "YYYY-MM-DD", "streak": N}`. A missing,
//! unreadable or malformed file is treated as "never visited" so that
//! recording a visit never fails because of bad data; only a failed write is
//! reported to the caller.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    #[serde(rename = "last_date")]
    pub last_visit_date: NaiveDate,
    #[serde(rename = "streak")]
    pub streak_count: u32,
}

impl StreakRecord {
    pub fn first(today: NaiveDate) -> Self {
        Self {
            last_visit_date: today,
            streak_count: 1,
        }
    }

    /// The record after a visit on `today`.
    ///
    /// Yesterday extends the streak, today leaves it unchanged, and anything
    /// else (a gap, or a last visit in the future) starts over at 1.
    pub fn advance(self, today: NaiveDate) -> Self {
        let streak_count = if today.pred_opt() == Some(self.last_visit_date) {
            self.streak_count.saturating_add(1)
        } else if self.last_visit_date == today {
            self.streak_count
        } else {
            1
        };
        Self {
            last_visit_date: today,
            streak_count,
        }
    }
}

pub struct StreakTracker {
    path: PathBuf,
}

impl StreakTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored record, or `None` if there is no usable one.
    pub fn load(&self) -> Option<StreakRecord> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("ignoring unreadable streak file {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str::<StreakRecord>(&contents) {
            Ok(record) if record.streak_count >= 1 => Some(record),
            Ok(_) => {
                warn!("ignoring streak file {} with a zero count", self.path.display());
                None
            }
            Err(e) => {
                warn!("ignoring corrupt streak file {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Record a visit on `today` and return the resulting streak count.
    pub fn record_visit(&self, today: NaiveDate) -> Result<u32> {
        let record = match self.load() {
            Some(previous) => {
                let next = previous.advance(today);
                if next.streak_count != previous.streak_count {
                    info!(
                        "streak {} -> {} (last visit {})",
                        previous.streak_count, next.streak_count, previous.last_visit_date
                    );
                }
                next
            }
            None => {
                info!("starting a new streak on {today}");
                StreakRecord::first(today)
            }
        };
        self.save(&record)?;
        Ok(record.streak_count)
    }

    /// Replace the stored record atomically (write a sibling temp file, then rename).
    fn save(&self, record: &StreakRecord) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".streak-")
            .suffix(".json")
            .tempfile_in(dir)
            .map_err(|e| Error::io(dir, e))?;
        serde_json::to_writer(&mut tmp, record)?;
        tmp.flush().map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker() -> (tempfile::TempDir, StreakTracker) {
        let dir = tempfile::tempdir().unwrap();
        let tracker = StreakTracker::new(dir.path().join("streak.json"));
        (dir, tracker)
    }

    #[test]
    fn advance_rules() {
        let d = date(2024, 6, 10);
        let rec = StreakRecord {
            last_visit_date: d,
            streak_count: 4,
        };
        assert_eq!(rec.advance(d.succ_opt().unwrap()).streak_count, 5);
        assert_eq!(rec.advance(d).streak_count, 4);
        assert_eq!(rec.advance(date(2024, 6, 12)).streak_count, 1);
        // A last visit in the future resets
        assert_eq!(rec.advance(date(2024, 6, 9)).streak_count, 1);
        assert_eq!(rec.advance(date(2024, 6, 12)).last_visit_date, date(2024, 6, 12));
    }

    #[test]
    fn first_visit_creates_record() {
        let (_dir, tracker) = tracker();
        assert!(tracker.load().is_none());
        assert_eq!(tracker.record_visit(date(2024, 6, 10)).unwrap(), 1);
        assert_eq!(tracker.load(), Some(StreakRecord::first(date(2024, 6, 10))));
    }

    #[test]
    fn consecutive_days_then_gap() {
        let (_dir, tracker) = tracker();
        assert_eq!(tracker.record_visit(date(2024, 6, 10)).unwrap(), 1);
        assert_eq!(tracker.record_visit(date(2024, 6, 11)).unwrap(), 2);
        assert_eq!(tracker.record_visit(date(2024, 6, 12)).unwrap(), 3);
        assert_eq!(tracker.record_visit(date(2024, 6, 12)).unwrap(), 3);
        assert_eq!(tracker.record_visit(date(2024, 6, 15)).unwrap(), 1);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let (_dir, tracker) = tracker();
        tracker.record_visit(date(2024, 2, 28)).unwrap();
        tracker.record_visit(date(2024, 2, 29)).unwrap();
        assert_eq!(tracker.record_visit(date(2024, 3, 1)).unwrap(), 3);
    }

    #[test]
    fn file_format_matches_keys() {
        let (_dir, tracker) = tracker();
        tracker.record_visit(date(2024, 6, 10)).unwrap();
        let raw = std::fs::read_to_string(tracker.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["last_date"], "2024-06-10");
        assert_eq!(value["streak"], 1);
    }

    #[test]
    fn reads_existing_record() {
        let (_dir, tracker) = tracker();
        std::fs::write(tracker.path(), r#"{"last_date": "2024-06-09", "streak": 7}"#).unwrap();
        assert_eq!(tracker.record_visit(date(2024, 6, 10)).unwrap(), 8);
    }

    #[test]
    fn corrupt_record_starts_over() {
        let (_dir, tracker) = tracker();
        std::fs::write(tracker.path(), "not json").unwrap();
        assert!(tracker.load().is_none());
        assert_eq!(tracker.record_visit(date(2024, 6, 10)).unwrap(), 1);
        assert_eq!(tracker.record_visit(date(2024, 6, 11)).unwrap(), 2);
    }

    #[test]
    fn zero_or_bad_date_is_treated_as_absent() {
        let (_dir, tracker) = tracker();
        std::fs::write(tracker.path(), r#"{"last_date": "2024-06-09", "streak": 0}"#).unwrap();
        assert!(tracker.load().is_none());
        std::fs::write(tracker.path(), r#"{"last_date": "yesterday", "streak": 2}"#).unwrap();
        assert!(tracker.load().is_none());
        assert_eq!(tracker.record_visit(date(2024, 6, 10)).unwrap(), 1);
    }

    #[test]
    fn unwritable_location_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = StreakTracker::new(dir.path().join("missing").join("streak.json"));
        let err = tracker.record_visit(date(2024, 6, 10)).unwrap_err();
        assert!(err.is_storage());
    }
}

//! Storage for exposure history, saved terms and usage stats
//!
//! Directory structure:
//! ```text
//! {data-dir}/study/
//! ├── exposures.json      # { term-id: ExposureRecord }
//! ├── saved.json          # [SavedTerm], insertion order
//! ├── quiz_results.json   # [QuizResult], oldest first
//! └── stats.json          # AppStats
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::models::{AppStats, QuizResult, QuizStats, SavedTerm};
use crate::feed::ExposureRecord;

#[derive(Error, Debug)]
pub enum StudyStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty term id")]
    EmptyTermId,

    #[error("Invalid quiz result: {score} of {total}")]
    InvalidQuizResult { score: u32, total: u32 },
}

pub type Result<T> = std::result::Result<T, StudyStorageError>;

/// Storage manager for per-user study state
pub struct StudyStorage {
    study_dir: PathBuf,
}

impl StudyStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            study_dir: data_dir.join("study"),
        }
    }

    fn exposures_path(&self) -> PathBuf {
        self.study_dir.join("exposures.json")
    }

    fn saved_path(&self) -> PathBuf {
        self.study_dir.join("saved.json")
    }

    fn quiz_results_path(&self) -> PathBuf {
        self.study_dir.join("quiz_results.json")
    }

    fn stats_path(&self) -> PathBuf {
        self.study_dir.join("stats.json")
    }

    /// Read a JSON file, falling back to the default when it does not exist
    fn read_json<T: DeserializeOwned + Default>(&self, path: PathBuf) -> Result<T> {
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: PathBuf, value: &T) -> Result<()> {
        fs::create_dir_all(&self.study_dir)?;
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    // ==================== Exposure Operations ====================

    /// All exposure records keyed by term id
    pub fn exposures(&self) -> Result<HashMap<String, ExposureRecord>> {
        self.read_json(self.exposures_path())
    }

    /// Record that a term was shown at `now`
    pub fn record_exposure(&self, term_id: &str, now: DateTime<Utc>) -> Result<ExposureRecord> {
        if term_id.is_empty() {
            return Err(StudyStorageError::EmptyTermId);
        }

        let mut exposures = self.exposures()?;
        let record = exposures
            .entry(term_id.to_string())
            .and_modify(|r| r.mark_seen(now))
            .or_insert_with(|| ExposureRecord::first_seen(now))
            .clone();

        self.write_json(self.exposures_path(), &exposures)?;
        log::debug!("Recorded exposure of {} ({} times)", term_id, record.times_seen);
        Ok(record)
    }

    /// Number of terms shown at least once
    pub fn terms_seen_count(&self) -> Result<usize> {
        Ok(self
            .exposures()?
            .values()
            .filter(|r| r.times_seen > 0)
            .count())
    }

    // ==================== Saved Operations ====================

    fn saved_entries(&self) -> Result<Vec<SavedTerm>> {
        self.read_json(self.saved_path())
    }

    /// Flip a term's saved state; returns true if it is now saved
    pub fn toggle_saved(&self, term_id: &str, now: DateTime<Utc>) -> Result<bool> {
        if term_id.is_empty() {
            return Err(StudyStorageError::EmptyTermId);
        }

        let mut saved = self.saved_entries()?;
        let now_saved = match saved.iter().position(|s| s.term_id == term_id) {
            Some(pos) => {
                saved.remove(pos);
                false
            }
            None => {
                saved.push(SavedTerm {
                    term_id: term_id.to_string(),
                    saved_at: now,
                });
                true
            }
        };

        self.write_json(self.saved_path(), &saved)?;
        log::info!("Term {} {}", term_id, if now_saved { "saved" } else { "unsaved" });
        Ok(now_saved)
    }

    pub fn is_saved(&self, term_id: &str) -> Result<bool> {
        Ok(self.saved_entries()?.iter().any(|s| s.term_id == term_id))
    }

    /// Saved ids as a set, for feed weighting
    pub fn saved_ids(&self) -> Result<HashSet<String>> {
        Ok(self
            .saved_entries()?
            .into_iter()
            .map(|s| s.term_id)
            .collect())
    }

    /// Saved entries, most recently saved first
    pub fn saved_recent_first(&self) -> Result<Vec<SavedTerm>> {
        let mut saved = self.saved_entries()?;
        // Stable sort keeps insertion order for equal timestamps, so reverse first
        saved.reverse();
        saved.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saved)
    }

    pub fn saved_count(&self) -> Result<usize> {
        Ok(self.saved_entries()?.len())
    }

    pub fn clear_saved(&self) -> Result<()> {
        self.write_json(self.saved_path(), &Vec::<SavedTerm>::new())
    }

    // ==================== Quiz Operations ====================

    /// Every recorded quiz, oldest first
    pub fn quiz_results(&self) -> Result<Vec<QuizResult>> {
        self.read_json(self.quiz_results_path())
    }

    /// Append a finished quiz. `total` must be positive and `score` at most `total`.
    pub fn record_quiz_result(
        &self,
        score: u32,
        total: u32,
        now: DateTime<Utc>,
    ) -> Result<QuizResult> {
        if total == 0 || score > total {
            return Err(StudyStorageError::InvalidQuizResult { score, total });
        }

        let mut results = self.quiz_results()?;
        let id = results.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let result = QuizResult {
            id,
            taken_at: now,
            score,
            total,
        };
        results.push(result.clone());

        self.write_json(self.quiz_results_path(), &results)?;
        log::info!("Recorded quiz {} ({}/{})", id, score, total);
        Ok(result)
    }

    pub fn quiz_stats(&self) -> Result<QuizStats> {
        Ok(QuizStats::from_results(&self.quiz_results()?))
    }

    // ==================== Stats Operations ====================

    pub fn stats(&self) -> Result<AppStats> {
        self.read_json(self.stats_path())
    }

    /// Register an app open on `today`, returning the current streak
    pub fn update_streak(&self, today: NaiveDate) -> Result<u32> {
        let mut stats = self.stats()?;
        let before = stats.clone();
        let streak = stats.open_on(today);

        if stats != before {
            self.write_json(self.stats_path(), &stats)?;
        }
        Ok(streak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (StudyStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = StudyStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[test]
    fn test_record_exposure() {
        let (storage, _temp) = create_test_storage();
        let t0 = Utc::now();

        assert!(storage.exposures().unwrap().is_empty());

        let first = storage.record_exposure("grace", t0).unwrap();
        assert_eq!(first.times_seen, 1);

        let t1 = t0 + Duration::minutes(5);
        let second = storage.record_exposure("grace", t1).unwrap();
        assert_eq!(second.times_seen, 2);
        assert_eq!(second.last_seen_at, Some(t1));

        storage.record_exposure("apostasy", t1).unwrap();
        let exposures = storage.exposures().unwrap();
        assert_eq!(exposures.len(), 2);
        assert_eq!(exposures["grace"].times_seen, 2);
        assert_eq!(storage.terms_seen_count().unwrap(), 2);

        assert!(matches!(
            storage.record_exposure("", t1),
            Err(StudyStorageError::EmptyTermId)
        ));
    }

    #[test]
    fn test_toggle_saved() {
        let (storage, _temp) = create_test_storage();
        let now = Utc::now();

        assert!(storage.toggle_saved("grace", now).unwrap());
        assert!(storage.is_saved("grace").unwrap());
        assert!(!storage.toggle_saved("grace", now).unwrap());
        assert!(!storage.is_saved("grace").unwrap());
        assert_eq!(storage.saved_count().unwrap(), 0);
    }

    #[test]
    fn test_saved_recent_first() {
        let (storage, _temp) = create_test_storage();
        let t0 = Utc::now();

        storage.toggle_saved("a", t0).unwrap();
        storage.toggle_saved("b", t0 + Duration::seconds(10)).unwrap();
        storage.toggle_saved("c", t0 + Duration::seconds(5)).unwrap();

        let order: Vec<String> = storage
            .saved_recent_first()
            .unwrap()
            .into_iter()
            .map(|s| s.term_id)
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);

        let ids = storage.saved_ids().unwrap();
        assert!(ids.contains("a") && ids.contains("b") && ids.contains("c"));

        storage.clear_saved().unwrap();
        assert!(storage.saved_ids().unwrap().is_empty());
    }

    #[test]
    fn test_quiz_results() {
        let (storage, _temp) = create_test_storage();
        let now = Utc::now();

        assert_eq!(storage.quiz_stats().unwrap(), QuizStats::default());

        let first = storage.record_quiz_result(3, 4, now).unwrap();
        let second = storage.record_quiz_result(5, 5, now).unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let stats = storage.quiz_stats().unwrap();
        assert_eq!(stats.total_quizzes, 2);
        assert!((stats.avg_score - 0.875).abs() < 1e-12);
        assert_eq!(stats.accuracy_percent(), 88);

        assert!(matches!(
            storage.record_quiz_result(1, 0, now),
            Err(StudyStorageError::InvalidQuizResult { score: 1, total: 0 })
        ));
        assert!(matches!(
            storage.record_quiz_result(6, 5, now),
            Err(StudyStorageError::InvalidQuizResult { .. })
        ));
        assert_eq!(storage.quiz_results().unwrap().len(), 2);
    }

    #[test]
    fn test_update_streak_persists() {
        let (storage, _temp) = create_test_storage();
        let day = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();

        assert_eq!(storage.update_streak(day).unwrap(), 1);
        assert_eq!(storage.update_streak(day.succ_opt().unwrap()).unwrap(), 2);

        let stats = storage.stats().unwrap();
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.last_opened, NaiveDate::from_ymd_opt(2026, 2, 1));
    }
}

//! Data models for study history

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A bookmarked term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTerm {
    pub term_id: String,
    pub saved_at: DateTime<Utc>,
}

/// One finished quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: u32,
    pub taken_at: DateTime<Utc>,
    pub score: u32,
    pub total: u32,
}

impl QuizResult {
    /// Fraction of questions answered correctly, 0.0 to 1.0
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total)
    }
}

/// Aggregate over every recorded quiz
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_quizzes: usize,
    /// Mean of per-quiz accuracy; 0.0 when no quiz was taken
    pub avg_score: f64,
}

impl QuizStats {
    pub fn from_results(results: &[QuizResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let sum: f64 = results.iter().map(QuizResult::accuracy).sum();
        Self {
            total_quizzes: results.len(),
            avg_score: sum / results.len() as f64,
        }
    }

    /// Average accuracy as a whole percentage
    pub fn accuracy_percent(&self) -> u32 {
        (self.avg_score * 100.0).round() as u32
    }
}

/// Daily-use statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<NaiveDate>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

impl AppStats {
    /// Register an app open on `today` and return the current streak.
    ///
    /// Same day leaves the streak alone, the next day extends it, anything
    /// else (including a clock that went backwards) restarts it at 1.
    pub fn open_on(&mut self, today: NaiveDate) -> u32 {
        let streak = match self.last_opened {
            Some(last) if last == today => return self.current_streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.current_streak + 1,
            _ => 1,
        };

        self.last_opened = Some(today);
        self.current_streak = streak;
        self.longest_streak = self.longest_streak.max(streak);
        streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_streak_progression() {
        let mut stats = AppStats::default();
        assert_eq!(stats.open_on(day(1)), 1);
        assert_eq!(stats.open_on(day(1)), 1);
        assert_eq!(stats.open_on(day(2)), 2);
        assert_eq!(stats.open_on(day(3)), 3);
        assert_eq!(stats.open_on(day(5)), 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_quiz_stats_average_per_quiz_accuracy() {
        assert_eq!(QuizStats::from_results(&[]), QuizStats::default());

        let taken_at = Utc::now();
        let results = vec![
            QuizResult { id: 1, taken_at, score: 1, total: 2 },
            QuizResult { id: 2, taken_at, score: 10, total: 10 },
        ];
        let stats = QuizStats::from_results(&results);
        assert_eq!(stats.total_quizzes, 2);
        // Mean of 0.5 and 1.0, not 11 / 12
        assert!((stats.avg_score - 0.75).abs() < 1e-12);
        assert_eq!(stats.accuracy_percent(), 75);
    }

    #[test]
    fn test_streak_resets_when_clock_goes_back() {
        let mut stats = AppStats::default();
        stats.open_on(day(10));
        stats.open_on(day(11));
        assert_eq!(stats.open_on(day(4)), 1);
    }
}

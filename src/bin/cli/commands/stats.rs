use anyhow::{Context, Result};
use chrono::Local;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let streak = app
        .study
        .update_streak(Local::now().date_naive())
        .context("Failed to update streak")?;
    let stats = app.study.stats()?;
    let seen = app.study.terms_seen_count()?;
    let saved = app.study.saved_count()?;
    let quiz = app.study.quiz_stats().context("Failed to read quiz results")?;
    let total = app.snapshot().len();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "currentStreak": streak,
                "longestStreak": stats.longest_streak,
                "termsSeen": seen,
                "totalTerms": total,
                "saved": saved,
                "quizzesTaken": quiz.total_quizzes,
                "quizAccuracy": quiz.avg_score,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Streak:      {} day(s) (longest {})", streak, stats.longest_streak);
            println!("Terms seen:  {} of {}", seen, total);
            println!("Saved:       {}", saved);
            println!(
                "Quizzes:     {} (accuracy {}%)",
                quiz.total_quizzes,
                quiz.accuracy_percent()
            );
        }
    }

    Ok(())
}

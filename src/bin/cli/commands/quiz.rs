use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::OutputFormat;

/// Record a finished quiz
pub fn run(app: &App, score: u32, total: u32, format: &OutputFormat) -> Result<()> {
    let result = app
        .study
        .record_quiz_result(score, total, Utc::now())
        .context("Failed to record quiz result")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Plain => {
            println!(
                "Recorded quiz #{}: {}/{} ({:.0}%)",
                result.id,
                result.score,
                result.total,
                result.accuracy() * 100.0
            );
        }
    }

    Ok(())
}

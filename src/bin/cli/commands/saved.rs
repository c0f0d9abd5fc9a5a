use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

/// Toggle the saved state of a term
pub fn run_toggle(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let term = app.find_term(reference)?;
    let now_saved = app
        .study
        .toggle_saved(&term.id, Utc::now())
        .context("Failed to update saved terms")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": term.id, "saved": now_saved });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let verb = if now_saved { "Saved" } else { "Removed" };
            println!("{} {} ({})", verb, term.name, term.id);
        }
    }

    Ok(())
}

/// List saved terms, most recent first
pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let snapshot = app.snapshot();
    let saved = app.study.saved_recent_first().context("Failed to read saved terms")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        OutputFormat::Plain => {
            if saved.is_empty() {
                println!("No saved terms.");
                return Ok(());
            }

            for entry in &saved {
                match snapshot.get(&entry.term_id) {
                    Some(term) => println!("{}", terminal::render_term_summary(term, use_color)),
                    // Term dropped from the catalog since it was saved
                    None => println!("{}  (no longer in catalog)", entry.term_id),
                }
            }
            println!("\n{} saved", saved.len());
        }
    }

    Ok(())
}

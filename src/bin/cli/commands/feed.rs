use anyhow::{Context, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    count: Option<usize>,
    seed: Option<u64>,
    mark_seen: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let snapshot = app.snapshot();
    let exposures = app.study.exposures().context("Failed to read exposures")?;
    let saved = app.study.saved_ids().context("Failed to read saved terms")?;

    let count = count.unwrap_or(app.config.feed_size);
    let now = Utc::now();
    let mut rng = match seed.or(app.config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let queue = snapshot.feed(&exposures, &saved, count, now, &mut rng)?;

    if mark_seen {
        for term in &queue {
            app.study
                .record_exposure(&term.id, now)
                .with_context(|| format!("Failed to record exposure of {}", term.id))?;
        }
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = queue
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "term": t.name,
                        "shortDefinition": t.short_definition,
                        "saved": saved.contains(&t.id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (i, term) in queue.iter().enumerate() {
                let marker = if saved.contains(&term.id) { "*" } else { " " };
                println!("{:>3}{} {}", i + 1, marker, terminal::render_term_summary(term, use_color));
            }
        }
    }

    Ok(())
}

use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, query: &str, limit: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let snapshot = app.snapshot();
    let mut results = snapshot.search(query);
    results.sort_by_cached_key(|t| t.name.to_lowercase());
    let total = results.len();
    results.truncate(limit);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Plain => {
            if results.is_empty() {
                println!("No results found for '{}'.", query);
                return Ok(());
            }

            for term in &results {
                println!("{}", terminal::render_term_summary(term, use_color));
            }

            if total > results.len() {
                println!("\n{} of {} matches shown", results.len(), total);
            }
        }
    }

    Ok(())
}

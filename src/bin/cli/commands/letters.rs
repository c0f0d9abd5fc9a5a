use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let snapshot = app.snapshot();
    let groups = snapshot.grouped_by_letter();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = groups
                .iter()
                .map(|(letter, terms)| {
                    serde_json::json!({
                        "letter": letter.to_string(),
                        "count": terms.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (letter, terms) in &groups {
                println!("{}  {}", letter, terms.len());
            }
            println!("\n{} terms total", snapshot.len());
        }
    }

    Ok(())
}

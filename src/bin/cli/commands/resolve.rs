use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let snapshot = app.snapshot();
    let resolved = snapshot.resolve(reference);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "reference": reference,
                "termId": resolved,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => match resolved {
            Some(id) => println!("{}", id),
            None => println!("No term matching '{}'.", reference),
        },
    }

    Ok(())
}

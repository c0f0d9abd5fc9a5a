use anyhow::{Context, Result};

use theologia_lib::catalog::CustomTermInput;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    name: &str,
    short_definition: &str,
    full_definition: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let term = app
        .custom_terms
        .add(CustomTermInput {
            name: name.to_string(),
            short_definition: short_definition.to_string(),
            full_definition: full_definition.unwrap_or_default().to_string(),
        })
        .context("Failed to add term")?;

    app.reload_catalog()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&term)?),
        OutputFormat::Plain => println!("Added {} ({})", term.name, term.id),
    }

    Ok(())
}

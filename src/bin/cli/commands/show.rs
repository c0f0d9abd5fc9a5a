use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, reference: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let term = app.find_term(reference)?;
    let snapshot = app.snapshot();
    let segments = snapshot.linked_definition(&term);
    let related = snapshot.related(&term);
    let saved = app.study.is_saved(&term.id)?;

    if let OutputFormat::Json = format {
        let output = serde_json::json!({
            "term": term,
            "saved": saved,
            "definition": segments,
            "related": related,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let title = if saved { format!("{} (saved)", term.name) } else { term.name.clone() };
    println!("{}", terminal::styled(&title, Color::BOLD, use_color));
    println!("{}", terminal::styled(&term.short_definition, Color::ITALIC, use_color));

    if !segments.is_empty() {
        println!();
        println!("{}", terminal::render_segments(&segments, use_color));
    }

    if !term.example.is_empty() {
        println!();
        println!("{} {}", terminal::styled("Example:", Color::BOLD, use_color), term.example);
    }
    if !term.non_example.is_empty() {
        println!("{} {}", terminal::styled("Not:", Color::BOLD, use_color), term.non_example);
    }

    let related_lines = terminal::render_related(&related, use_color);
    if !related_lines.is_empty() {
        println!();
        for line in related_lines {
            println!("{}", line);
        }
    }

    if !term.tags.is_empty() {
        let tags = term.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ");
        println!();
        println!("{}", terminal::styled(&tags, Color::DIM, use_color));
    }

    Ok(())
}

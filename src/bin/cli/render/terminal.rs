use theologia_lib::catalog::Term;
use theologia_lib::references::{RelatedLink, Relation, TextSegment};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const UNDERLINE: &str = "\x1b[4m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

const WRAP_WIDTH: usize = 80;

pub fn styled(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render definition segments; links are highlighted, or followed by
/// their target id when colors are off
pub fn render_segments(segments: &[TextSegment], use_color: bool) -> String {
    let text: String = segments
        .iter()
        .map(|seg| match seg {
            TextSegment::Text { content } => content.clone(),
            TextSegment::Link { display, target } => {
                if use_color {
                    format!("{}{}{}{}", Color::CYAN, Color::UNDERLINE, display, Color::RESET)
                } else {
                    format!("{} [{}]", display, target)
                }
            }
        })
        .collect();

    if use_color {
        // Escape codes break width counting, leave wrapping to the terminal
        text
    } else {
        wrap_lines(&text, "", WRAP_WIDTH).join("\n")
    }
}

/// One line per related label, grouped by relation
pub fn render_related(links: &[RelatedLink], use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for (relation, heading) in [(Relation::SeeAlso, "See also"), (Relation::ContrastsWith, "Contrasts with")] {
        let group: Vec<&RelatedLink> = links.iter().filter(|l| l.relation == relation).collect();
        if group.is_empty() {
            continue;
        }

        lines.push(styled(heading, Color::BOLD, use_color));
        for link in group {
            match &link.target {
                Some(id) => lines.push(format!("  - {} {}", link.label, styled(&format!("({})", id), Color::GRAY, use_color))),
                None => lines.push(format!("  - {}", link.label)),
            }
        }
    }

    lines
}

/// A term's name and short definition on one line each
pub fn render_term_summary(term: &Term, use_color: bool) -> String {
    format!(
        "{}  {}\n    {}",
        styled(&term.name, Color::BOLD, use_color),
        styled(&term.id, Color::GRAY, use_color),
        term.short_definition
    )
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}

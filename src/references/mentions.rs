//! Inline `*mention` parsing for definition bodies
//!
//! A mention is `*` immediately followed by a letter, running over letters,
//! whitespace, hyphens and apostrophes, and ending on a letter. The marker is
//! always dropped; resolved mentions become links, the rest stay plain text.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::index::ReferenceIndex;
use super::resolver::resolve;

/// One piece of a parsed definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TextSegment {
    Text { content: String },
    Link { display: String, target: String },
}

impl TextSegment {
    /// The text this segment shows, link or not
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text { content } => content,
            Self::Link { display, .. } => display,
        }
    }
}

fn mention_regex() -> &'static Regex {
    static MENTION_RE: OnceLock<Regex> = OnceLock::new();
    MENTION_RE.get_or_init(|| {
        Regex::new(r"\*([A-Za-z][A-Za-z\s\-']*[A-Za-z]|[A-Za-z])").expect("mention pattern is valid")
    })
}

/// Split definition text into plain and linked segments
pub fn parse_definition(index: &ReferenceIndex, text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in mention_regex().captures_iter(text) {
        let (Some(whole), Some(phrase)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if whole.start() > last_end {
            segments.push(TextSegment::Text {
                content: text[last_end..whole.start()].to_string(),
            });
        }

        let phrase = phrase.as_str();
        match resolve(index, phrase) {
            Some(target) => segments.push(TextSegment::Link {
                display: phrase.to_string(),
                target: target.to_string(),
            }),
            None => segments.push(TextSegment::Text {
                content: phrase.to_string(),
            }),
        }

        last_end = whole.end();
    }

    if last_end < text.len() {
        segments.push(TextSegment::Text {
            content: text[last_end..].to_string(),
        });
    }

    segments
}

/// Concatenate segment text; equals the input with mention markers removed
pub fn plain_text(segments: &[TextSegment]) -> String {
    segments.iter().map(TextSegment::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Term;

    fn sample_index() -> ReferenceIndex {
        ReferenceIndex::build(&[
            Term::new("grace", "Grace"),
            Term::new("faith-alone", "Faith Alone"),
        ])
    }

    #[test]
    fn test_round_trip_strips_markers_only() {
        let index = sample_index();
        let segments = parse_definition(&index, "See *grace and *faith-alone for more.");
        assert_eq!(plain_text(&segments), "See grace and faith-alone for more.");
    }

    #[test]
    fn test_mentions_are_greedy_up_to_last_letter() {
        let index = sample_index();
        let segments = parse_definition(&index, "See *grace and *faith-alone for more.");

        assert_eq!(
            segments,
            vec![
                TextSegment::Text { content: "See ".to_string() },
                TextSegment::Link {
                    display: "grace and".to_string(),
                    target: "grace".to_string(),
                },
                TextSegment::Text { content: " ".to_string() },
                // Slugs drop hyphens, so "faithalone-for-more" matches no key
                TextSegment::Text { content: "faith-alone for more".to_string() },
                TextSegment::Text { content: ".".to_string() },
            ]
        );
    }

    #[test]
    fn test_mention_ending_at_punctuation() {
        let index = sample_index();
        let segments = parse_definition(&index, "Grace, then *faith-alone.");

        assert_eq!(
            segments,
            vec![
                TextSegment::Text { content: "Grace, then ".to_string() },
                TextSegment::Link {
                    display: "faith-alone".to_string(),
                    target: "faith-alone".to_string(),
                },
                TextSegment::Text { content: ".".to_string() },
            ]
        );
    }

    #[test]
    fn test_unresolved_mention_becomes_text() {
        let index = sample_index();
        let segments = parse_definition(&index, "Compare *purgatory.");

        assert_eq!(
            segments,
            vec![
                TextSegment::Text { content: "Compare ".to_string() },
                TextSegment::Text { content: "purgatory".to_string() },
                TextSegment::Text { content: ".".to_string() },
            ]
        );
    }

    #[test]
    fn test_single_letter_and_bare_asterisks() {
        let index = sample_index();

        let segments = parse_definition(&index, "Footnote* and * spaced and *x.");
        assert_eq!(plain_text(&segments), "Footnote* and * spaced and x.");

        let segments = parse_definition(&index, "no mentions here");
        assert_eq!(
            segments,
            vec![TextSegment::Text { content: "no mentions here".to_string() }]
        );

        assert!(parse_definition(&index, "").is_empty());
    }

    #[test]
    fn test_apostrophes_inside_mentions() {
        let index = ReferenceIndex::build(&[Term::new("lords-supper", "Lord's Supper")]);
        let segments = parse_definition(&index, "The *Lord's Supper, also called");

        assert_eq!(
            segments[1],
            TextSegment::Link {
                display: "Lord's Supper".to_string(),
                target: "lords-supper".to_string(),
            }
        );
    }
}

//! Mention extraction and sanitization.
//!
//! Specialists embed control tokens in their replies using the wire syntax
//! `@[label](id)`. The label may not contain `]` and the id may not contain
//! `)`; anything else that only looks similar is left in the text untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MENTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@\[([^\]]+)\]\(([^)]+)\)").expect("mention pattern is a valid regex")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// A control token found in specialist output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    /// Human-readable label, e.g. `Inicio`.
    pub label: String,
    /// Opaque identifier, e.g. `inicio-fluxo-001`.
    pub id: String,
    /// The exact matched span, including the `@[...](...)` wrapper.
    pub full_match: String,
}

impl Mention {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        let label = label.into();
        let id = id.into();
        let full_match = format!("@[{}]({})", label, id);
        Self {
            label,
            id,
            full_match,
        }
    }
}

/// Returns true if the text contains at least one well-formed mention.
pub fn contains_mention(text: &str) -> bool {
    MENTION_PATTERN.is_match(text)
}

/// Extracts every well-formed mention, left to right, without overlap.
pub fn extract_mentions(text: &str) -> Vec<Mention> {
    MENTION_PATTERN
        .captures_iter(text)
        .map(|caps| Mention {
            label: caps[1].to_string(),
            id: caps[2].to_string(),
            full_match: caps[0].to_string(),
        })
        .collect()
}

/// Strips mention spans and normalizes whitespace.
///
/// Removal is repeated until no span remains, since deleting one span can
/// join its neighbours into a new one. Whitespace runs (newlines included)
/// collapse to a single space and the result is trimmed, so applying the
/// function twice yields the same text as applying it once.
///
/// Because of the repeat, spans that only form after an inner removal are
/// stripped too even though `extract_mentions` never reports them:
/// `@[x]@[y](z)(w)` yields one mention (`y`) and sanitizes to `""`.
pub fn sanitize(text: &str) -> String {
    let mut stripped = text.to_string();
    while MENTION_PATTERN.is_match(&stripped) {
        stripped = MENTION_PATTERN.replace_all(&stripped, "").into_owned();
    }
    WHITESPACE_RUN
        .replace_all(stripped.trim(), " ")
        .trim()
        .to_string()
}

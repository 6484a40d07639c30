//! Recovery of the event array from the model's free-text reply.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::EventRecord;
use crate::{Error, Result};

/// What the reply yielded.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The array between the first `[` and the last `]`
    Events(Vec<EventRecord>),
    /// No bracket pair in the cleaned text
    NoArray { cleaned: String },
}

impl Extraction {
    pub fn into_events(self) -> Vec<EventRecord> {
        match self {
            Extraction::Events(events) => events,
            Extraction::NoArray { .. } => Vec::new(),
        }
    }
}

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```json\s*").expect("valid fence pattern"))
}

fn bare_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```\s*").expect("valid fence pattern"))
}

/// Remove code fence markers (and the whitespace after them), then trim.
pub fn strip_code_fences(text: &str) -> String {
    let without_json = json_fence().replace_all(text, "");
    bare_fence().replace_all(&without_json, "").trim().to_string()
}

/// Locate and parse the event array in a model reply.
///
/// A reply without `[` or without `]` is not an error. Anything between the
/// first `[` and the last `]` must parse as an array of JSON objects.
pub fn extract_events(text: &str) -> Result<Extraction> {
    let cleaned = strip_code_fences(text);

    let (Some(start), Some(end)) = (cleaned.find('['), cleaned.rfind(']')) else {
        return Ok(Extraction::NoArray { cleaned });
    };

    // `]` before `[` leaves nothing to parse, which fails below.
    let candidate = if end >= start {
        &cleaned[start..=end]
    } else {
        ""
    };

    let events: Vec<EventRecord> = serde_json::from_str(candidate).map_err(Error::Parse)?;
    Ok(Extraction::Events(events))
}

//! Generator response cleanup and strict parsing.
//!
//! The sanitizer is a liberal, infallible text transform; all correctness
//! enforcement is deferred to the strict JSON parse and the encoders' own
//! field validation. Keep those two stages distinct.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error produced when sanitized generator output fails the strict parse.
///
/// Carries the sanitized and original text for diagnostics; the sanitizer
/// itself never fails.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid generator output: {source}")]
    InvalidGeneratorOutput {
        source: serde_json::Error,
        /// The text that was actually handed to the parser.
        sanitized: String,
        /// The unmodified generator response.
        raw: String,
    },
}

/// Strip a leading ```` ```json ```` fence marker and a trailing fence,
/// then trim surrounding whitespace. Best effort; never fails.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest.strip_prefix('\n').unwrap_or(rest);
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim().to_string()
}

/// Remove `//`-to-end-of-line sequences.
///
/// The generator habitually annotates note lists with line comments, which
/// are not valid in strict JSON. This is a blunt textual strip: it does not
/// try to protect `//` inside string literals, matching the observed
/// generator output where URLs never appear.
pub fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match line.find("//") {
            Some(pos) => out.push_str(&line[..pos]),
            None => out.push_str(line),
        }
    }
    out
}

/// Sanitize a raw generator response and parse it strictly.
///
/// `strip_comments` is set for documents destined for the MIDI encoder and
/// the template patcher; chunk-container documents are parsed verbatim.
pub fn parse_generator_json<T: DeserializeOwned>(
    raw: &str,
    strip_comments: bool,
) -> Result<T, DocumentError> {
    let mut sanitized = sanitize(raw);
    if strip_comments {
        sanitized = strip_line_comments(&sanitized);
    }

    serde_json::from_str(&sanitized).map_err(|source| DocumentError::InvalidGeneratorOutput {
        source,
        sanitized,
        raw: raw.to_string(),
    })
}

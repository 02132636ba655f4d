//! dawforge Document Library
//!
//! This crate provides the document types, response sanitizer, and structural
//! validation shared by the dawforge encoding backends. Documents are JSON
//! trees produced by an external text generator; the generator's output is
//! untrusted free text masquerading as structured data, so cleanup is a
//! best-effort text transform and all correctness enforcement happens in a
//! strict parse step plus per-encoder field validation.
//!
//! # Example
//!
//! ```
//! use dawforge_spec::MidiDocument;
//!
//! let raw = "{\"tempo\": 128, \"notes\": []} // eight bars";
//! let doc = MidiDocument::from_generator(raw).unwrap();
//! assert_eq!(doc.tempo, 128);
//! assert!(doc.notes.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`documents`]: Document types and the output-kind tag
//! - [`sanitize`]: Generator response cleanup and strict parsing
//! - [`validation`]: Coded structural validation

pub mod documents;
pub mod sanitize;
pub mod validation;

// Re-export commonly used types at the crate root
pub use documents::{
    MidiDocument, NoteEvent, OutputKind, PresetDocument, TimeSignature, DEFAULT_PRESET_NAME,
    DEFAULT_TEMPO,
};
pub use sanitize::{parse_generator_json, sanitize, strip_line_comments, DocumentError};
pub use validation::{
    validate_midi_document, validate_preset_document, ErrorCode, ValidationError,
    ValidationResult, ValidationWarning, WarningCode,
};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Parse the exact document shape the generator prompt asks for.
    #[test]
    fn test_parse_generator_midi_response() {
        let raw = r#"```json
{
    "tempo": 128,
    "time_signature": [3, 4],
    "notes": [
        {"pitch": 60, "velocity": 100, "duration": 1.0, "start": 0.0},
        {"pitch": 64, "velocity": 90, "duration": 0.5, "start": 1.0} // third
    ]
}
```"#;

        let doc = MidiDocument::from_generator(raw).expect("should parse");

        assert_eq!(doc.tempo, 128);
        assert_eq!(doc.time_signature, TimeSignature::new(3, 4));
        assert_eq!(doc.notes.len(), 2);
        assert_eq!(doc.notes[1].pitch, 64);

        let result = validate_midi_document(&doc);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
    }

    #[test]
    fn test_parse_generator_preset_response() {
        let raw = r#"```json
{
    "preset_name": "Warm Pad",
    "oscillators": {"osc1": {"waveform": "Basic Shapes", "level": 1.0}},
    "filters": {"filter1": {"type": "LP 24", "cutoff": 0.6}}
}
```"#;

        let doc = PresetDocument::from_generator(raw).expect("should parse");
        assert_eq!(doc.preset_name(), "Warm Pad");

        let result = validate_preset_document(&doc);
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    /// Out-of-range note fields must survive parsing so the encoder can
    /// reject them as an encoding error rather than a parse failure.
    #[test]
    fn test_out_of_range_notes_parse_but_fail_validation() {
        let raw = r#"{"notes": [{"pitch": 128, "velocity": -1, "duration": 1.0, "start": 0.0}]}"#;
        let doc = MidiDocument::from_generator(raw).expect("should parse");

        let result = validate_midi_document(&doc);
        assert!(!result.is_ok());
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::PitchOutOfRange));
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::VelocityOutOfRange));
    }

    #[test]
    fn test_midi_document_json_round_trip() {
        let raw = r#"{"tempo": 90, "time_signature": [6, 8], "notes": [{"pitch": 48, "velocity": 80, "duration": 2.0, "start": 0.5}]}"#;
        let doc = MidiDocument::from_generator(raw).unwrap();

        let json = serde_json::to_string(&doc).unwrap();
        let parsed: MidiDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(doc, parsed);
    }
}

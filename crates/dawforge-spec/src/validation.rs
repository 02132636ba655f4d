//! Coded structural validation for generator documents.
//!
//! The encoders enforce these rules themselves and fail with typed errors;
//! this module exists so callers (the CLI `validate` command, a transport
//! layer) can report every problem in a document at once instead of
//! stopping at the first.

/// Error codes for document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Note pitch outside 0-127
    PitchOutOfRange,
    /// E002: Note velocity outside 0-127
    VelocityOutOfRange,
    /// E003: Note duration not positive
    NonPositiveDuration,
    /// E004: Note start negative or non-finite
    NegativeStart,
    /// E005: Tempo outside the encodable range
    TempoOutOfRange,
    /// E006: Time signature not representable
    InvalidTimeSignature,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::PitchOutOfRange => "E001",
            ErrorCode::VelocityOutOfRange => "E002",
            ErrorCode::NonPositiveDuration => "E003",
            ErrorCode::NegativeStart => "E004",
            ErrorCode::TempoOutOfRange => "E005",
            ErrorCode::InvalidTimeSignature => "E006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Preset document has no usable preset_name
    MissingPresetName,
    /// W002: MIDI document has no notes
    EmptyNoteList,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingPresetName => "W001",
            WarningCode::EmptyNoteList => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "notes\[3\].pitch").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Result of document validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates an empty (passing) validation result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

use crate::documents::{MidiDocument, PresetDocument};

/// The largest tempo meta-event value is three bytes of microseconds per
/// quarter note, so the slowest encodable tempo is 60_000_000 / 0xFFFFFF,
/// i.e. anything below 4 bpm cannot be written.
pub const MIN_TEMPO: u32 = 4;

/// Validate every note and header field of a MIDI document.
pub fn validate_midi_document(doc: &MidiDocument) -> ValidationResult {
    let mut result = ValidationResult::new();

    if doc.tempo < MIN_TEMPO {
        result.add_error(ValidationError::with_path(
            ErrorCode::TempoOutOfRange,
            format!("tempo {} is below the encodable minimum {}", doc.tempo, MIN_TEMPO),
            "tempo",
        ));
    }

    if !doc.time_signature.is_valid() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTimeSignature,
            format!(
                "time signature {} needs a 1-255 numerator and a power-of-two denominator",
                doc.time_signature
            ),
            "time_signature",
        ));
    }

    for (i, note) in doc.notes.iter().enumerate() {
        if !(0..=127).contains(&note.pitch) {
            result.add_error(ValidationError::with_path(
                ErrorCode::PitchOutOfRange,
                format!("pitch {} outside 0-127", note.pitch),
                format!("notes[{}].pitch", i),
            ));
        }
        if !(0..=127).contains(&note.velocity) {
            result.add_error(ValidationError::with_path(
                ErrorCode::VelocityOutOfRange,
                format!("velocity {} outside 0-127", note.velocity),
                format!("notes[{}].velocity", i),
            ));
        }
        if !note.duration.is_finite() || note.duration <= 0.0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonPositiveDuration,
                format!("duration {} must be positive", note.duration),
                format!("notes[{}].duration", i),
            ));
        }
        if !note.start.is_finite() || note.start < 0.0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::NegativeStart,
                format!("start {} must not be negative", note.start),
                format!("notes[{}].start", i),
            ));
        }
    }

    if doc.notes.is_empty() {
        result.add_warning(ValidationWarning::new(
            WarningCode::EmptyNoteList,
            "document has no notes; the encoded file will contain only meta events",
        ));
    }

    result
}

/// Validate a preset document. There is no schema to enforce, so this only
/// reports advisory problems.
pub fn validate_preset_document(doc: &PresetDocument) -> ValidationResult {
    let mut result = ValidationResult::new();

    let named = doc
        .params()
        .get("preset_name")
        .map(|v| v.is_string())
        .unwrap_or(false);
    if !named {
        result.add_warning(ValidationWarning::new(
            WarningCode::MissingPresetName,
            format!(
                "no usable preset_name; the container will use \"{}\"",
                crate::documents::DEFAULT_PRESET_NAME
            ),
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{NoteEvent, TimeSignature};

    fn note(pitch: i64, velocity: i64, duration: f64, start: f64) -> NoteEvent {
        NoteEvent {
            pitch,
            velocity,
            duration,
            start,
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::PitchOutOfRange.code(), "E001");
        assert_eq!(ErrorCode::InvalidTimeSignature.code(), "E006");
        assert_eq!(WarningCode::MissingPresetName.code(), "W001");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::with_path(
            ErrorCode::PitchOutOfRange,
            "pitch 128 outside 0-127",
            "notes[0].pitch",
        );
        assert_eq!(
            err.to_string(),
            "E001: pitch 128 outside 0-127 (at notes[0].pitch)"
        );
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = MidiDocument {
            tempo: 120,
            time_signature: TimeSignature::new(4, 4),
            notes: vec![note(60, 100, 1.0, 0.0), note(64, 100, 0.5, 1.0)],
        };
        let result = validate_midi_document(&doc);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_out_of_range_fields_are_errors() {
        let doc = MidiDocument {
            tempo: 0,
            time_signature: TimeSignature::new(4, 5),
            notes: vec![note(128, -1, 0.0, -0.5)],
        };
        let result = validate_midi_document(&doc);
        let codes: Vec<ErrorCode> = result.errors.iter().map(|e| e.code).collect();
        assert!(codes.contains(&ErrorCode::TempoOutOfRange));
        assert!(codes.contains(&ErrorCode::InvalidTimeSignature));
        assert!(codes.contains(&ErrorCode::PitchOutOfRange));
        assert!(codes.contains(&ErrorCode::VelocityOutOfRange));
        assert!(codes.contains(&ErrorCode::NonPositiveDuration));
        assert!(codes.contains(&ErrorCode::NegativeStart));
    }

    #[test]
    fn test_non_finite_fields_are_errors() {
        let doc = MidiDocument {
            tempo: 120,
            time_signature: TimeSignature::default(),
            notes: vec![note(60, 100, f64::NAN, f64::INFINITY)],
        };
        let result = validate_midi_document(&doc);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_empty_note_list_warns() {
        let doc = MidiDocument {
            tempo: 120,
            time_signature: TimeSignature::default(),
            notes: vec![],
        };
        let result = validate_midi_document(&doc);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WarningCode::EmptyNoteList);
    }

    #[test]
    fn test_preset_without_name_warns() {
        let doc = PresetDocument::default();
        let result = validate_preset_document(&doc);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::MissingPresetName);

        let doc: PresetDocument =
            serde_json::from_str(r#"{"preset_name": "Bass"}"#).unwrap();
        assert!(validate_preset_document(&doc).warnings.is_empty());
    }
}

//! Document types for generator-produced musical descriptions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sanitize::{parse_generator_json, DocumentError};

/// Default tempo in beats per minute when the generator omits one.
pub const DEFAULT_TEMPO: u32 = 120;

/// Fallback preset name when the generator omits one.
pub const DEFAULT_PRESET_NAME: &str = "Untitled";

/// A single generated note.
///
/// Pitch and velocity are deliberately wide integers: out-of-range values
/// must survive parsing so the MIDI encoder can reject them as an encoding
/// error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI note number, valid range 0-127.
    pub pitch: i64,
    /// Note-on velocity, valid range 0-127.
    pub velocity: i64,
    /// Note length in beats; must be positive.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Onset position in beats from the start of the sequence.
    #[serde(default)]
    pub start: f64,
}

fn default_duration() -> f64 {
    1.0
}

/// A time signature, serialized as a two-element JSON array `[4, 4]`.
///
/// The denominator must be a power of two; that constraint is enforced at
/// encode time, not at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// True if the signature can be represented in a MIDI meta event.
    pub fn is_valid(&self) -> bool {
        self.numerator >= 1
            && self.numerator <= 255
            && self.denominator.is_power_of_two()
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl From<(u32, u32)> for TimeSignature {
    fn from((numerator, denominator): (u32, u32)) -> Self {
        Self::new(numerator, denominator)
    }
}

impl From<TimeSignature> for (u32, u32) {
    fn from(ts: TimeSignature) -> Self {
        (ts.numerator, ts.denominator)
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A generated note sequence destined for the MIDI encoder.
///
/// Notes need not arrive start-sorted; the encoder stable-sorts them by
/// start before computing delta times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiDocument {
    /// Beats per minute.
    #[serde(default = "default_tempo")]
    pub tempo: u32,
    /// Time signature, e.g. `[4, 4]`.
    #[serde(default)]
    pub time_signature: TimeSignature,
    /// Generated notes, in generator order.
    #[serde(default)]
    pub notes: Vec<NoteEvent>,
}

fn default_tempo() -> u32 {
    DEFAULT_TEMPO
}

impl MidiDocument {
    /// Parse a raw generator response into a MIDI document.
    ///
    /// Applies the sanitizer and line-comment stripping (the generator
    /// habitually annotates note lists with `//` comments) before the
    /// strict parse.
    pub fn from_generator(raw: &str) -> Result<Self, DocumentError> {
        parse_generator_json(raw, true)
    }
}

/// An arbitrary, nested synthesizer-preset parameter tree.
///
/// No fixed schema is enforced; the only field with defined meaning is
/// `preset_name`, which falls back to [`DEFAULT_PRESET_NAME`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetDocument(pub Map<String, Value>);

impl PresetDocument {
    /// Parse a raw generator response into a preset document (FXP path).
    ///
    /// No comment stripping: chunk-container documents are parsed as-is.
    pub fn from_generator(raw: &str) -> Result<Self, DocumentError> {
        parse_generator_json(raw, false)
    }

    /// Parse a raw generator response into a flat parameter document
    /// (FST template-patching path). Line comments are stripped first.
    pub fn from_generator_params(raw: &str) -> Result<Self, DocumentError> {
        parse_generator_json(raw, true)
    }

    /// The preset name, defaulting to [`DEFAULT_PRESET_NAME`] when absent
    /// or not a string. Byte truncation to the container's 28-byte name
    /// field happens in the packer, not here.
    pub fn preset_name(&self) -> &str {
        self.0
            .get("preset_name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PRESET_NAME)
    }

    /// The underlying key/value tree.
    pub fn params(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// The requested terminal artifact kind.
///
/// The three encoders share no behavior; this tag is the only thing that
/// selects between them. It also carries the filename and media-type hints
/// the transport layer attaches to its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Standard MIDI File note sequence.
    Midi,
    /// Synthesizer-preset chunk container.
    Fxp,
    /// Patched binary instrument-preset template.
    Fst,
}

impl OutputKind {
    /// Suggested download filename for the artifact.
    pub fn filename_hint(&self) -> &'static str {
        match self {
            OutputKind::Midi => "generated_ai_midi.mid",
            OutputKind::Fxp => "generated_serum_preset.fxp",
            OutputKind::Fst => "generated_3xosc_preset.fst",
        }
    }

    /// Media type the transport layer should attach.
    pub fn media_type(&self) -> &'static str {
        match self {
            OutputKind::Midi => "audio/midi",
            OutputKind::Fxp | OutputKind::Fst => "application/octet-stream",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Midi => "mid",
            OutputKind::Fxp => "fxp",
            OutputKind::Fst => "fst",
        }
    }

    /// Whether generator responses for this kind get `//` comments
    /// stripped before parsing. Chunk-container documents are parsed
    /// verbatim; note lists and flat parameter maps are not.
    pub fn strips_line_comments(&self) -> bool {
        !matches!(self, OutputKind::Fxp)
    }
}

impl std::str::FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "midi" => Ok(OutputKind::Midi),
            "fxp" => Ok(OutputKind::Fxp),
            "fst" => Ok(OutputKind::Fst),
            _ => Err(format!("unknown output kind: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputKind::Midi => "midi",
            OutputKind::Fxp => "fxp",
            OutputKind::Fst => "fst",
        };
        write!(f, "{}", name)
    }
}

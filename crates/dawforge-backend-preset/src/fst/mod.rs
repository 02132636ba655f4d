//! Binary preset template patching.
//!
//! The template is an opaque instrument preset captured from the target
//! DAW. Patching copies it and overwrites single bytes at the offsets a
//! parameter table maps each known parameter name to. Everything outside
//! those offsets passes through untouched.

mod offsets;

pub use offsets::OffsetTable;

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Oscillator waveform selector values as the template stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
    Square,
    Noise,
}

impl Waveform {
    /// Map a waveform name, case-insensitively. Unknown names fall back to
    /// [`Waveform::Sine`] rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "triangle" => Waveform::Triangle,
            "saw" => Waveform::Saw,
            "square" => Waveform::Square,
            "noise" => Waveform::Noise,
            _ => Waveform::Sine,
        }
    }

    /// The selector byte written into the template.
    pub fn as_byte(self) -> u8 {
        match self {
            Waveform::Sine => 0,
            Waveform::Triangle => 1,
            Waveform::Saw => 2,
            Waveform::Square => 3,
            Waveform::Noise => 4,
        }
    }
}

/// Template loading and patching errors. [`TemplateError::Unavailable`] is
/// the only fatal condition a generation request can hit after parsing;
/// per-parameter problems are skipped, not raised.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("preset template {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template is {len} bytes but the offset table requires at least {required}")]
    TooSmall { len: usize, required: usize },

    #[error("offset table {path} is not valid JSON: {source}")]
    InvalidOffsetTable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A loaded preset template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTemplate {
    bytes: Vec<u8>,
}

impl BinaryTemplate {
    /// Load a template from disk.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let bytes = fs::read(path).map_err(|source| TemplateError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { bytes })
    }

    /// Wrap an in-memory template.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Template length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the template is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw template bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Patches generator parameters into a template copy.
#[derive(Debug, Clone)]
pub struct TemplatePatcher {
    template: BinaryTemplate,
    offsets: OffsetTable,
}

impl TemplatePatcher {
    /// Pair a template with an offset table. Fails if the template is too
    /// small to hold the table's largest offset.
    pub fn new(template: BinaryTemplate, offsets: OffsetTable) -> Result<Self, TemplateError> {
        if let Some(max) = offsets.max_offset() {
            if template.len() <= max {
                return Err(TemplateError::TooSmall {
                    len: template.len(),
                    required: max + 1,
                });
            }
        }
        Ok(Self { template, offsets })
    }

    /// Produce a patched copy of the template.
    ///
    /// Walks the offset table, not the parameter map: parameters the table
    /// does not know are ignored, and table entries the map does not set
    /// keep their template bytes. Values that cannot be coerced to a byte
    /// are skipped. Never fails.
    pub fn patch(&self, params: &Map<String, Value>) -> Vec<u8> {
        let mut data = self.template.bytes.clone();
        for (name, offset) in self.offsets.iter() {
            let Some(value) = params.get(name) else {
                continue;
            };
            if let Some(byte) = coerce_byte(name, value) {
                data[offset] = byte;
            }
        }
        data
    }
}

/// Coerce a parameter value to the single byte written into the template.
///
/// Waveform parameters accept names via [`Waveform::from_name`]; anything
/// numeric (including numeric strings) is truncated toward zero and
/// clamped to 0-255. Unusable values yield `None`.
fn coerce_byte(name: &str, value: &Value) -> Option<u8> {
    if name.contains("waveform") {
        if let Some(text) = value.as_str() {
            return Some(Waveform::from_name(text).as_byte());
        }
    }

    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => u8::from(*b).into(),
        _ => return None,
    };
    if number.is_nan() {
        return None;
    }
    Some(number.clamp(0.0, 255.0) as u8)
}

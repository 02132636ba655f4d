//! Parameter-name to byte-offset tables for binary preset templates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The built-in 3x-oscillator table. Offsets were mapped against the
/// stock template by diffing single-parameter edits.
const THREE_OSC_OFFSETS: &[(&str, usize)] = &[
    ("osc1_waveform", 159),
    ("osc1_coarse", 163),
    ("osc1_fine", 167),
    ("osc1_volume", 171),
    ("osc1_phase", 175),
    ("osc1_detune", 179),
    ("osc2_waveform", 187),
    ("osc2_coarse", 191),
    ("osc2_fine", 195),
    ("osc2_volume", 199),
    ("osc2_phase", 203),
    ("osc2_detune", 207),
    ("osc3_waveform", 215),
    ("osc3_coarse", 219),
    ("osc3_fine", 223),
    ("osc3_volume", 227),
    ("osc3_phase", 231),
    ("osc3_detune", 235),
    ("mix_osc1", 239),
    ("mix_osc2", 243),
    ("mix_osc3", 247),
];

/// A parameter-name to byte-offset map.
///
/// Iteration order is the table's own key order, not the order parameters
/// appear in a request; the patcher walks the table, so request keys with
/// no table entry are silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffsetTable(BTreeMap<String, usize>);

impl OffsetTable {
    /// The built-in 3x-oscillator table.
    pub fn three_osc() -> Self {
        Self(
            THREE_OSC_OFFSETS
                .iter()
                .map(|&(name, offset)| (name.to_string(), offset))
                .collect(),
        )
    }

    /// Load a table from a JSON file of `{"name": offset}` pairs.
    pub fn from_json_file(path: &Path) -> Result<Self, super::TemplateError> {
        let text = fs::read_to_string(path).map_err(|source| {
            super::TemplateError::Unavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        serde_json::from_str(&text).map_err(|source| super::TemplateError::InvalidOffsetTable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Offset for a parameter name, if the table has one.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    /// The largest offset in the table. `None` for an empty table.
    pub fn max_offset(&self) -> Option<usize> {
        self.0.values().copied().max()
    }

    /// Iterate (name, offset) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, &offset)| (name.as_str(), offset))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! dawforge preset backend - synth preset file encoding.
//!
//! Two output paths share this crate:
//!
//! - [`fxp`]: packs a [`dawforge_spec::PresetDocument`] into an FXP opaque-
//!   chunk container with a zlib-compressed JSON payload.
//! - [`fst`]: patches generator parameters into a binary preset template by
//!   writing single bytes at known offsets.

pub mod fst;
pub mod fxp;

pub use fst::{BinaryTemplate, OffsetTable, TemplateError, TemplatePatcher, Waveform};
pub use fxp::{pack_preset, unpack_preset, PackError, UnpackError, UnpackedPreset};

//! dawforge MIDI backend - Standard MIDI File (format 0) encoding.
//!
//! Turns a validated [`dawforge_spec::MidiDocument`] into the exact byte
//! layout of a single-track SMF. Encoding is a pure function of the
//! document: no timestamps, no padding, byte-identical output for
//! identical input.

pub mod encode;
pub mod smf;

pub use encode::{encode_midi, EncodeError, PPQ};
pub use smf::{validate_smf_bytes, SmfFile, SmfValidationError};

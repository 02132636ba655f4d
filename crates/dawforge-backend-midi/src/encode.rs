//! Document to SMF encoding.

use dawforge_spec::{MidiDocument, NoteEvent};
use thiserror::Error;

use crate::smf::{Message, SmfFile};

/// Pulses per quarter note used for all encoded files.
pub const PPQ: u32 = 480;

/// Lowest encodable tempo. The tempo meta event stores microseconds per
/// quarter note in three bytes, so 60_000_000 / tempo must fit 0xFFFFFF.
pub const MIN_TEMPO: u32 = 4;

/// Error produced when a document cannot be encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("note {index}: pitch {pitch} out of MIDI range 0-127")]
    PitchOutOfRange { index: usize, pitch: i64 },

    #[error("note {index}: velocity {velocity} out of MIDI range 0-127")]
    VelocityOutOfRange { index: usize, velocity: i64 },

    #[error("note {index}: duration {duration} must be positive")]
    NonPositiveDuration { index: usize, duration: f64 },

    #[error("note {index}: start {start} must not be negative")]
    NegativeStart { index: usize, start: f64 },

    #[error("tempo {0} is outside the encodable range ({MIN_TEMPO}-60000000 bpm)")]
    TempoOutOfRange(u32),

    #[error("time signature {numerator}/{denominator} is not encodable")]
    InvalidTimeSignature { numerator: u32, denominator: u32 },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a document as a format-0 Standard MIDI File.
///
/// Notes are sorted by start time (stable, so equal starts keep document
/// order), then each becomes a note-on/note-off pair on channel 0. An
/// empty note list is valid and produces a file with only the tempo, time
/// signature and end-of-track events.
pub fn encode_midi(document: &MidiDocument) -> Result<Vec<u8>, EncodeError> {
    validate_notes(&document.notes)?;

    if document.tempo < MIN_TEMPO {
        return Err(EncodeError::TempoOutOfRange(document.tempo));
    }
    let signature = document.time_signature;
    if !signature.is_valid() {
        return Err(EncodeError::InvalidTimeSignature {
            numerator: signature.numerator,
            denominator: signature.denominator,
        });
    }

    let mut sorted: Vec<&NoteEvent> = document.notes.iter().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut file = SmfFile::new(PPQ as u16);

    file.track.push(0, Message::SetTempo {
        microseconds_per_quarter: 60_000_000 / document.tempo,
    });
    file.track.push(0, Message::TimeSignature {
        numerator: signature.numerator as u8,
        denominator_log2: signature.denominator.trailing_zeros() as u8,
    });

    // Deltas are computed against the previous event's own tick, clamped at
    // zero. Overlapping notes therefore never produce negative time.
    let mut prev_tick: u64 = 0;
    for note in sorted {
        // Start and duration are rounded to ticks separately, then summed.
        let on_tick = beats_to_ticks(note.start);
        let off_tick = on_tick + beats_to_ticks(note.duration);

        file.track.push((on_tick.saturating_sub(prev_tick)) as u32, Message::NoteOn {
            channel: 0,
            pitch: note.pitch as u8,
            velocity: note.velocity as u8,
        });
        prev_tick = on_tick;

        file.track.push((off_tick.saturating_sub(prev_tick)) as u32, Message::NoteOff {
            channel: 0,
            pitch: note.pitch as u8,
            velocity: 0,
        });
        prev_tick = off_tick;
    }

    file.track.push(0, Message::EndOfTrack);

    Ok(file.to_bytes()?)
}

fn validate_notes(notes: &[NoteEvent]) -> Result<(), EncodeError> {
    for (index, note) in notes.iter().enumerate() {
        if !(0..=127).contains(&note.pitch) {
            return Err(EncodeError::PitchOutOfRange {
                index,
                pitch: note.pitch,
            });
        }
        if !(0..=127).contains(&note.velocity) {
            return Err(EncodeError::VelocityOutOfRange {
                index,
                velocity: note.velocity,
            });
        }
        if !(note.duration > 0.0) {
            return Err(EncodeError::NonPositiveDuration {
                index,
                duration: note.duration,
            });
        }
        if note.start < 0.0 || !note.start.is_finite() {
            return Err(EncodeError::NegativeStart {
                index,
                start: note.start,
            });
        }
    }
    Ok(())
}

fn beats_to_ticks(beats: f64) -> u64 {
    (beats * f64::from(PPQ)).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smf::{read_vlq, validate_smf_bytes, SMF_HEADER_SIZE};
    use dawforge_spec::TimeSignature;
    use pretty_assertions::assert_eq;

    /// A decoded track event: (delta, raw message bytes).
    fn walk_track(bytes: &[u8]) -> Vec<(u32, Vec<u8>)> {
        assert!(validate_smf_bytes(bytes).is_ok());

        let mut events = Vec::new();
        let mut pos = SMF_HEADER_SIZE + 8;
        while pos < bytes.len() {
            let delta = read_vlq(bytes, &mut pos).unwrap();
            let status = bytes[pos];
            let message = match status {
                0xFF => {
                    let len = bytes[pos + 2] as usize;
                    bytes[pos..pos + 3 + len].to_vec()
                }
                s if s & 0xF0 == 0x90 || s & 0xF0 == 0x80 => bytes[pos..pos + 3].to_vec(),
                other => panic!("unexpected status byte {:#04x}", other),
            };
            pos += message.len();
            events.push((delta, message));
        }
        events
    }

    fn note(pitch: i64, velocity: i64, start: f64, duration: f64) -> NoteEvent {
        NoteEvent {
            pitch,
            velocity,
            start,
            duration,
        }
    }

    fn document(notes: Vec<NoteEvent>) -> MidiDocument {
        MidiDocument {
            tempo: 120,
            time_signature: TimeSignature::default(),
            notes,
        }
    }

    #[test]
    fn test_empty_note_list_is_valid() {
        let bytes = encode_midi(&document(vec![])).unwrap();
        let events = walk_track(&bytes);

        // Tempo, time signature, end of track. No channel messages.
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], (0, vec![0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]));
        assert_eq!(events[1], (0, vec![0xFF, 0x58, 0x04, 4, 2, 24, 8]));
        assert_eq!(events[2], (0, vec![0xFF, 0x2F, 0x00]));
    }

    #[test]
    fn test_note_on_off_pair_per_note() {
        let doc = document(vec![
            note(60, 100, 0.0, 1.0),
            note(64, 100, 1.0, 1.0),
            note(67, 100, 2.0, 2.0),
        ]);
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        let ons = events.iter().filter(|(_, m)| m[0] == 0x90).count();
        let offs = events.iter().filter(|(_, m)| m[0] == 0x80).count();
        assert_eq!(ons, 3);
        assert_eq!(offs, 3);
    }

    #[test]
    fn test_delta_times_one_beat_apart() {
        let doc = document(vec![note(60, 100, 0.0, 1.0), note(62, 90, 1.0, 1.0)]);
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        assert_eq!(events[2], (0, vec![0x90, 60, 100]));
        assert_eq!(events[3], (480, vec![0x80, 60, 0]));
        assert_eq!(events[4], (0, vec![0x90, 62, 90]));
        assert_eq!(events[5], (480, vec![0x80, 62, 0]));
    }

    #[test]
    fn test_notes_sorted_by_start() {
        let doc = document(vec![note(64, 100, 1.0, 1.0), note(60, 100, 0.0, 1.0)]);
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        // The later-listed but earlier-starting note comes first.
        assert_eq!(events[2].1, vec![0x90, 60, 100]);
        assert_eq!(events[4].1, vec![0x90, 64, 100]);
    }

    #[test]
    fn test_equal_starts_keep_document_order() {
        let doc = document(vec![note(72, 100, 0.0, 1.0), note(60, 100, 0.0, 1.0)]);
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        assert_eq!(events[2].1, vec![0x90, 72, 100]);
    }

    #[test]
    fn test_overlapping_notes_clamp_delta_to_zero() {
        // Second note starts before the first ends; its note-on delta is
        // measured from the first note-off's intended tick and clamps to 0.
        // The previous tick still advances to the note-on's own tick (480),
        // so the second note-off keeps its full duration delta.
        let doc = document(vec![note(60, 100, 0.0, 2.0), note(64, 100, 1.0, 1.0)]);
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        assert_eq!(events[2], (0, vec![0x90, 60, 100]));
        assert_eq!(events[3], (960, vec![0x80, 60, 0]));
        assert_eq!(events[4], (0, vec![0x90, 64, 100]));
        assert_eq!(events[5], (480, vec![0x80, 64, 0]));
    }

    #[test]
    fn test_pitch_128_rejected() {
        let err = encode_midi(&document(vec![note(128, 100, 0.0, 1.0)])).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::PitchOutOfRange { index: 0, pitch: 128 }
        ));
    }

    #[test]
    fn test_negative_velocity_rejected() {
        let err = encode_midi(&document(vec![note(60, -1, 0.0, 1.0)])).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::VelocityOutOfRange {
                index: 0,
                velocity: -1
            }
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = encode_midi(&document(vec![note(60, 100, 0.0, 0.0)])).unwrap_err();
        assert!(matches!(err, EncodeError::NonPositiveDuration { index: 0, .. }));
    }

    #[test]
    fn test_nan_duration_rejected() {
        let err = encode_midi(&document(vec![note(60, 100, 0.0, f64::NAN)])).unwrap_err();
        assert!(matches!(err, EncodeError::NonPositiveDuration { .. }));
    }

    #[test]
    fn test_negative_start_rejected() {
        let err = encode_midi(&document(vec![note(60, 100, -0.5, 1.0)])).unwrap_err();
        assert!(matches!(err, EncodeError::NegativeStart { index: 0, .. }));
    }

    #[test]
    fn test_first_failing_note_reported() {
        let doc = document(vec![note(60, 100, 0.0, 1.0), note(200, 100, 1.0, 1.0)]);
        let err = encode_midi(&doc).unwrap_err();
        assert!(matches!(err, EncodeError::PitchOutOfRange { index: 1, .. }));
    }

    #[test]
    fn test_tempo_below_minimum_rejected() {
        let mut doc = document(vec![]);
        doc.tempo = 3;
        assert!(matches!(
            encode_midi(&doc),
            Err(EncodeError::TempoOutOfRange(3))
        ));
    }

    #[test]
    fn test_tempo_event_reflects_document_tempo() {
        let mut doc = document(vec![]);
        doc.tempo = 90;
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        // 60_000_000 / 90 = 666_666 = 0x0A2C2A
        assert_eq!(events[0].1, vec![0xFF, 0x51, 0x03, 0x0A, 0x2C, 0x2A]);
    }

    #[test]
    fn test_non_power_of_two_denominator_rejected() {
        let mut doc = document(vec![]);
        doc.time_signature = TimeSignature {
            numerator: 4,
            denominator: 3,
        };
        assert!(matches!(
            encode_midi(&doc),
            Err(EncodeError::InvalidTimeSignature {
                numerator: 4,
                denominator: 3
            })
        ));
    }

    #[test]
    fn test_six_eight_time_signature() {
        let mut doc = document(vec![]);
        doc.time_signature = TimeSignature {
            numerator: 6,
            denominator: 8,
        };
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);
        assert_eq!(events[1].1, vec![0xFF, 0x58, 0x04, 6, 3, 24, 8]);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let doc = document(vec![
            note(60, 100, 0.0, 0.5),
            note(64, 90, 0.5, 0.5),
            note(67, 80, 1.0, 1.0),
        ]);
        let first = encode_midi(&doc).unwrap();
        let second = encode_midi(&doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_division_is_480() {
        let bytes = encode_midi(&document(vec![])).unwrap();
        assert_eq!(&bytes[12..14], &[0x01, 0xE0]);
    }

    #[test]
    fn test_off_tick_sums_separately_rounded_start_and_duration() {
        // 0.015625 beats is exactly 7.5 ticks, which rounds to 8. Start and
        // duration round independently, so the note spans ticks 8..16
        // rather than rounding the summed 15.0.
        let doc = document(vec![note(60, 100, 0.015625, 0.015625)]);
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        assert_eq!(events[2].0, 8);
        assert_eq!(events[3].0, 8);
    }

    #[test]
    fn test_fractional_starts_round_to_nearest_tick() {
        let doc = document(vec![note(60, 100, 0.25, 0.25)]);
        let bytes = encode_midi(&doc).unwrap();
        let events = walk_track(&bytes);

        assert_eq!(events[2].0, 120);
        assert_eq!(events[3].0, 120);
    }
}

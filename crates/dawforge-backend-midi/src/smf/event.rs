//! Track events: delta-time prefix, channel voice and meta messages.
//!
//! Only the message kinds the encoder emits are modeled; this is a writer,
//! not a general MIDI library.

use byteorder::WriteBytesExt;
use std::io::{self, Write};

/// Write a delta time as a MIDI variable-length quantity.
///
/// Seven payload bits per byte, high bit set on every byte except the
/// last, most significant group first.
pub fn write_vlq<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    let mut buf = [0u8; 5];
    let mut idx = buf.len() - 1;
    buf[idx] = (value & 0x7F) as u8;

    let mut rest = value >> 7;
    while rest > 0 {
        idx -= 1;
        buf[idx] = 0x80 | (rest & 0x7F) as u8;
        rest >>= 7;
    }

    writer.write_all(&buf[idx..])
}

/// Read a variable-length quantity starting at `*pos`, advancing `*pos`.
///
/// Returns `None` on truncated input. Used by the byte-level validator and
/// by tests that decode delta times back out of encoded files.
pub fn read_vlq(data: &[u8], pos: &mut usize) -> Option<u32> {
    let mut value: u32 = 0;
    loop {
        let byte = *data.get(*pos)?;
        *pos += 1;
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Some(value);
        }
    }
}

/// A track message. Field values are assumed already validated; the writer
/// never clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Channel voice note-on (status 0x9n).
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    /// Channel voice note-off (status 0x8n).
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
    /// Tempo meta event (FF 51): microseconds per quarter note.
    SetTempo { microseconds_per_quarter: u32 },
    /// Time signature meta event (FF 58). The denominator is stored as a
    /// power of two; clocks-per-click and 32nds-per-quarter are fixed at
    /// the conventional 24 and 8.
    TimeSignature { numerator: u8, denominator_log2: u8 },
    /// End of track meta event (FF 2F).
    EndOfTrack,
}

impl Message {
    /// Write the message bytes (no delta time).
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match *self {
            Message::NoteOn {
                channel,
                pitch,
                velocity,
            } => {
                writer.write_u8(0x90 | (channel & 0x0F))?;
                writer.write_u8(pitch)?;
                writer.write_u8(velocity)
            }
            Message::NoteOff {
                channel,
                pitch,
                velocity,
            } => {
                writer.write_u8(0x80 | (channel & 0x0F))?;
                writer.write_u8(pitch)?;
                writer.write_u8(velocity)
            }
            Message::SetTempo {
                microseconds_per_quarter,
            } => {
                let usq = microseconds_per_quarter;
                writer.write_all(&[0xFF, 0x51, 0x03])?;
                writer.write_all(&[(usq >> 16) as u8, (usq >> 8) as u8, usq as u8])
            }
            Message::TimeSignature {
                numerator,
                denominator_log2,
            } => writer.write_all(&[0xFF, 0x58, 0x04, numerator, denominator_log2, 24, 8]),
            Message::EndOfTrack => writer.write_all(&[0xFF, 0x2F, 0x00]),
        }
    }
}

/// A message prefixed with its delta time in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent {
    /// Ticks since the previous event.
    pub delta: u32,
    /// The message itself.
    pub message: Message,
}

impl TrackEvent {
    /// Write delta time and message.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_vlq(writer, self.delta)?;
        self.message.write(writer)
    }
}

//! SMF track chunk ("MTrk") assembly.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use super::event::{Message, TrackEvent};

/// Track chunk magic identifier.
pub const MTRK_MAGIC: &[u8; 4] = b"MTrk";

/// A single track chunk: an ordered event list with an exact byte-length
/// prefix computed at write time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmfTrack {
    /// Events in file order.
    pub events: Vec<TrackEvent>,
}

impl SmfTrack {
    /// Create an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the given delta time.
    pub fn push(&mut self, delta: u32, message: Message) {
        self.events.push(TrackEvent { delta, message });
    }

    /// Write the track chunk. The length prefix equals the exact encoded
    /// event byte length.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut body = Vec::new();
        for event in &self.events {
            event.write(&mut body)?;
        }

        writer.write_all(MTRK_MAGIC)?;
        writer.write_u32::<BigEndian>(body.len() as u32)?;
        writer.write_all(&body)
    }
}

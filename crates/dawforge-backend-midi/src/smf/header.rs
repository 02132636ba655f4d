//! SMF header chunk ("MThd") constants and writer.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

/// Header chunk magic identifier.
pub const MTHD_MAGIC: &[u8; 4] = b"MThd";

/// Header chunk body length (fixed at 6 bytes).
pub const MTHD_LENGTH: u32 = 6;

/// Format 0: a single multi-channel track.
pub const SMF_FORMAT_0: u16 = 0;

/// Total size of the serialized header chunk.
pub const SMF_HEADER_SIZE: usize = 14;

/// SMF header chunk data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmfHeader {
    /// SMF format (0, 1, or 2).
    pub format: u16,
    /// Number of track chunks that follow.
    pub num_tracks: u16,
    /// Time division: pulses per quarter note (metrical time only).
    pub division: u16,
}

impl SmfHeader {
    /// Create a format-0 header with a single track.
    pub fn format_0(division: u16) -> Self {
        Self {
            format: SMF_FORMAT_0,
            num_tracks: 1,
            division,
        }
    }

    /// Write the header chunk to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(MTHD_MAGIC)?;
        writer.write_u32::<BigEndian>(MTHD_LENGTH)?;
        writer.write_u16::<BigEndian>(self.format)?;
        writer.write_u16::<BigEndian>(self.num_tracks)?;
        writer.write_u16::<BigEndian>(self.division)?;
        Ok(())
    }
}

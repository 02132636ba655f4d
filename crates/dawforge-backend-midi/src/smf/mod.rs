//! Standard MIDI File container writing.

mod event;
mod header;
mod track;

pub use event::{read_vlq, write_vlq, Message, TrackEvent};
pub use header::{SmfHeader, MTHD_LENGTH, MTHD_MAGIC, SMF_FORMAT_0, SMF_HEADER_SIZE};
pub use track::{SmfTrack, MTRK_MAGIC};

use std::io::{self, Write};

/// A complete format-0 file: one header chunk and one track chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmfFile {
    /// Header chunk.
    pub header: SmfHeader,
    /// The single track chunk.
    pub track: SmfTrack,
}

impl SmfFile {
    /// Create an empty format-0 file at the given resolution.
    pub fn new(division: u16) -> Self {
        Self {
            header: SmfHeader::format_0(division),
            track: SmfTrack::new(),
        }
    }

    /// Write the complete file to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.header.write(writer)?;
        self.track.write(writer)
    }

    /// Write the file to a byte vector.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}

/// Validate that a byte buffer has a well-formed SMF header and an exact
/// track length prefix.
pub fn validate_smf_bytes(data: &[u8]) -> Result<(), SmfValidationError> {
    if data.len() < SMF_HEADER_SIZE + 8 {
        return Err(SmfValidationError::FileTooSmall(data.len()));
    }

    if &data[0..4] != MTHD_MAGIC {
        return Err(SmfValidationError::InvalidMagic);
    }

    let header_length = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
    if header_length != MTHD_LENGTH {
        return Err(SmfValidationError::InvalidHeaderLength(header_length));
    }

    if &data[SMF_HEADER_SIZE..SMF_HEADER_SIZE + 4] != MTRK_MAGIC {
        return Err(SmfValidationError::InvalidTrackMagic);
    }

    let at = SMF_HEADER_SIZE + 4;
    let declared = u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
    let actual = (data.len() - SMF_HEADER_SIZE - 8) as u32;
    if declared != actual {
        return Err(SmfValidationError::TrackLengthMismatch { declared, actual });
    }

    Ok(())
}

/// SMF byte-level validation error.
#[derive(Debug, Clone)]
pub enum SmfValidationError {
    /// File is too small to hold a header and track chunk.
    FileTooSmall(usize),
    /// Invalid header magic identifier.
    InvalidMagic,
    /// Header chunk declares a non-standard length.
    InvalidHeaderLength(u32),
    /// Invalid track magic identifier.
    InvalidTrackMagic,
    /// Track length prefix does not match the remaining bytes.
    TrackLengthMismatch { declared: u32, actual: u32 },
}

impl std::fmt::Display for SmfValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmfValidationError::FileTooSmall(size) => {
                write!(f, "File too small: {} bytes", size)
            }
            SmfValidationError::InvalidMagic => {
                write!(f, "Invalid SMF header magic")
            }
            SmfValidationError::InvalidHeaderLength(len) => {
                write!(f, "Invalid SMF header length: {}", len)
            }
            SmfValidationError::InvalidTrackMagic => {
                write!(f, "Invalid SMF track magic")
            }
            SmfValidationError::TrackLengthMismatch { declared, actual } => {
                write!(
                    f,
                    "Track length mismatch: declared {} bytes, found {}",
                    declared, actual
                )
            }
        }
    }
}

impl std::error::Error for SmfValidationError {}

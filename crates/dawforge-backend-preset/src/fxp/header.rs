//! FXP opaque-chunk container header constants and writer.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

/// Container magic identifier.
pub const FXP_MAGIC: &[u8; 4] = b"CcnK";

/// Fixed header-length field value.
pub const FXP_BYTE_SIZE: i32 = 0x0FC6;

/// Opaque-chunk program format identifier.
pub const FXP_FORMAT_ID: &[u8; 4] = b"FPCh";

/// Container format version.
pub const FXP_FORMAT_VERSION: i32 = 1;

/// Vendor identifier of the target instrument.
pub const FXP_VENDOR_ID: &[u8; 4] = b"XfsX";

/// Vendor-defined format version.
pub const FXP_VENDOR_VERSION: i32 = 1;

/// Number of programs in the container.
pub const FXP_PROGRAM_COUNT: i32 = 1;

/// Fixed width of the preset name field.
pub const FXP_PRESET_NAME_LEN: usize = 28;

/// Serialized header size up to and including the payload length field.
pub const FXP_HEADER_SIZE: usize = 4 + 4 + 4 + 4 + 4 + 4 + 4 + FXP_PRESET_NAME_LEN + 4;

/// FXP container header. All multi-byte fields are big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxpHeader {
    /// Preset name, truncated to [`FXP_PRESET_NAME_LEN`] bytes on write.
    pub preset_name: String,
    /// Compressed payload byte length.
    pub payload_len: i32,
}

impl FxpHeader {
    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(FXP_MAGIC)?;
        writer.write_i32::<BigEndian>(FXP_BYTE_SIZE)?;
        writer.write_all(FXP_FORMAT_ID)?;
        writer.write_i32::<BigEndian>(FXP_FORMAT_VERSION)?;
        writer.write_all(FXP_VENDOR_ID)?;
        writer.write_i32::<BigEndian>(FXP_VENDOR_VERSION)?;
        writer.write_i32::<BigEndian>(FXP_PROGRAM_COUNT)?;

        let mut name = [0u8; FXP_PRESET_NAME_LEN];
        let raw = self.preset_name.as_bytes();
        let len = raw.len().min(FXP_PRESET_NAME_LEN);
        name[..len].copy_from_slice(&raw[..len]);
        writer.write_all(&name)?;

        writer.write_i32::<BigEndian>(self.payload_len)?;
        Ok(())
    }
}

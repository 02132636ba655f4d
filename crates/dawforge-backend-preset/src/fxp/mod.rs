//! FXP preset container packing and unpacking.

mod header;

pub use header::{
    FxpHeader, FXP_BYTE_SIZE, FXP_FORMAT_ID, FXP_FORMAT_VERSION, FXP_HEADER_SIZE, FXP_MAGIC,
    FXP_PRESET_NAME_LEN, FXP_PROGRAM_COUNT, FXP_VENDOR_ID, FXP_VENDOR_VERSION,
};

use dawforge_spec::PresetDocument;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use thiserror::Error;

/// Error produced when a document cannot be packed.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to serialize preset payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compressed payload of {0} bytes exceeds the container length field")]
    PayloadTooLarge(usize),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Error produced when a byte buffer is not a well-formed container.
#[derive(Debug, Error)]
pub enum UnpackError {
    #[error("file too small: {0} bytes")]
    FileTooSmall(usize),

    #[error("invalid container magic")]
    InvalidMagic,

    #[error("invalid format identifier")]
    InvalidFormatId,

    #[error("invalid vendor identifier")]
    InvalidVendorId,

    #[error("unexpected {field} value {value}")]
    UnexpectedHeaderValue { field: &'static str, value: i32 },

    #[error("payload length {declared} does not match {actual} remaining bytes")]
    PayloadLengthMismatch { declared: i32, actual: usize },

    #[error("failed to inflate payload: {0}")]
    Inflate(#[source] std::io::Error),

    #[error("payload is not a valid preset document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parsed container: the header fields plus the decompressed document.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpackedPreset {
    /// Header with the NUL-trimmed preset name and declared payload length.
    pub header: FxpHeader,
    /// The decompressed JSON payload.
    pub document: PresetDocument,
}

/// Pack a preset document into FXP container bytes.
///
/// The payload is the document's compact JSON, zlib-compressed. The header
/// name comes from the document's `preset_name` field, falling back to
/// `"Untitled"` when absent.
pub fn pack_preset(document: &PresetDocument) -> Result<Vec<u8>, PackError> {
    let json = serde_json::to_vec(document)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let payload = encoder.finish()?;

    if payload.len() > i32::MAX as usize {
        return Err(PackError::PayloadTooLarge(payload.len()));
    }

    let header = FxpHeader {
        preset_name: document.preset_name().to_string(),
        payload_len: payload.len() as i32,
    };

    let mut buffer = Vec::with_capacity(FXP_HEADER_SIZE + payload.len());
    header.write(&mut buffer)?;
    buffer.write_all(&payload)?;
    Ok(buffer)
}

/// Unpack FXP container bytes back into the preset document.
///
/// Strict inverse of [`pack_preset`]: every fixed header field is checked
/// and the payload length must match the remaining bytes exactly.
pub fn unpack_preset(bytes: &[u8]) -> Result<UnpackedPreset, UnpackError> {
    if bytes.len() < FXP_HEADER_SIZE {
        return Err(UnpackError::FileTooSmall(bytes.len()));
    }

    if &bytes[0..4] != FXP_MAGIC {
        return Err(UnpackError::InvalidMagic);
    }
    check_field(bytes, 4, "header length", FXP_BYTE_SIZE)?;
    if &bytes[8..12] != FXP_FORMAT_ID {
        return Err(UnpackError::InvalidFormatId);
    }
    check_field(bytes, 12, "format version", FXP_FORMAT_VERSION)?;
    if &bytes[16..20] != FXP_VENDOR_ID {
        return Err(UnpackError::InvalidVendorId);
    }
    check_field(bytes, 20, "vendor format version", FXP_VENDOR_VERSION)?;
    check_field(bytes, 24, "program count", FXP_PROGRAM_COUNT)?;

    let name_raw = &bytes[28..28 + FXP_PRESET_NAME_LEN];
    let name_end = name_raw.iter().position(|&b| b == 0).unwrap_or(name_raw.len());
    let preset_name = String::from_utf8_lossy(&name_raw[..name_end]).into_owned();

    let declared = read_i32(bytes, FXP_HEADER_SIZE - 4);
    let payload = &bytes[FXP_HEADER_SIZE..];
    if declared < 0 || declared as usize != payload.len() {
        return Err(UnpackError::PayloadLengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    let mut json = Vec::new();
    ZlibDecoder::new(payload)
        .read_to_end(&mut json)
        .map_err(UnpackError::Inflate)?;
    let document: PresetDocument = serde_json::from_slice(&json)?;

    Ok(UnpackedPreset {
        header: FxpHeader {
            preset_name,
            payload_len: declared,
        },
        document,
    })
}

fn read_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn check_field(
    bytes: &[u8],
    at: usize,
    field: &'static str,
    expected: i32,
) -> Result<(), UnpackError> {
    let value = read_i32(bytes, at);
    if value != expected {
        return Err(UnpackError::UnexpectedHeaderValue { field, value });
    }
    Ok(())
}

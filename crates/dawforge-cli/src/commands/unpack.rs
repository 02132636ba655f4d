//! Unpack command implementation
//!
//! Parses a packed preset container and prints the header fields and the
//! decompressed JSON payload.

use anyhow::{Context, Result};
use colored::Colorize;
use dawforge_backend_preset::unpack_preset;
use std::fs;
use std::process::ExitCode;

/// Run the unpack command
///
/// # Returns
/// Exit code: 0 if the file parses, error otherwise
pub fn run(input: &str, pretty: bool) -> Result<ExitCode> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read preset file: {}", input))?;

    let unpacked = unpack_preset(&bytes)
        .with_context(|| format!("Not a well-formed preset container: {}", input))?;

    println!(
        "{} {}",
        "Preset:".cyan().bold(),
        unpacked.header.preset_name
    );
    println!(
        "{} {} compressed bytes",
        "Payload:".dimmed(),
        unpacked.header.payload_len
    );

    let json = if pretty {
        serde_json::to_string_pretty(&unpacked.document)?
    } else {
        serde_json::to_string(&unpacked.document)?
    };
    println!("{}", json);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dawforge_backend_preset::pack_preset;
    use dawforge_spec::PresetDocument;

    #[test]
    fn test_unpack_packed_file() {
        let doc: PresetDocument =
            serde_json::from_str(r#"{"preset_name": "Round Trip", "cutoff": 0.5}"#).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.fxp");
        fs::write(&path, pack_preset(&doc).unwrap()).unwrap();

        assert!(run(path.to_str().unwrap(), true).is_ok());
    }

    #[test]
    fn test_unpack_rejects_non_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_preset.bin");
        fs::write(&path, b"garbage").unwrap();

        let err = run(path.to_str().unwrap(), false).unwrap_err();
        assert!(err.to_string().contains("Not a well-formed"));
    }
}

//! Generate command implementation
//!
//! Reads a raw generator response from a file, parses and validates it,
//! encodes the requested artifact kind, and writes the result.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dawforge_backend_midi::encode_midi;
use dawforge_backend_preset::{pack_preset, BinaryTemplate, OffsetTable, TemplatePatcher};
use dawforge_spec::{
    validate_midi_document, validate_preset_document, MidiDocument, OutputKind, PresetDocument,
    ValidationResult,
};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the generate command
///
/// # Arguments
/// * `input` - Path to the raw generator response (text)
/// * `kind` - Artifact kind to encode
/// * `output` - Output path; defaults to the kind's filename hint
/// * `template` - Binary template path (fst only)
/// * `offsets` - Offset table JSON path (fst only; built-in table if absent)
///
/// # Returns
/// Exit code: 0 on success, 1 if the document fails validation
pub fn run(
    input: &str,
    kind: OutputKind,
    output: Option<&str>,
    template: Option<&str>,
    offsets: Option<&str>,
) -> Result<ExitCode> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read generator response: {}", input))?;
    debug!("read {} bytes of generator output from {}", raw.len(), input);

    let output_path: PathBuf = output.map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(kind.filename_hint())
    });

    let bytes = match kind {
        OutputKind::Midi => {
            let doc = MidiDocument::from_generator(&raw)?;
            let result = validate_midi_document(&doc);
            report(&result);
            if !result.is_ok() {
                return Ok(ExitCode::from(1));
            }
            debug!(
                "encoding {} notes at {} bpm, {} time",
                doc.notes.len(),
                doc.tempo,
                doc.time_signature
            );
            encode_midi(&doc)?
        }
        OutputKind::Fxp => {
            let doc = PresetDocument::from_generator(&raw)?;
            let result = validate_preset_document(&doc);
            report(&result);
            debug!("packing preset \"{}\"", doc.preset_name());
            pack_preset(&doc)?
        }
        OutputKind::Fst => {
            let Some(template_path) = template else {
                bail!("--template is required for fst output");
            };
            let doc = PresetDocument::from_generator_params(&raw)?;

            let table = match offsets {
                Some(path) => OffsetTable::from_json_file(Path::new(path))?,
                None => OffsetTable::three_osc(),
            };
            let template = BinaryTemplate::load(Path::new(template_path))?;
            debug!(
                "patching {} byte template with {} parameters",
                template.len(),
                doc.params().len()
            );
            TemplatePatcher::new(template, table)?.patch(doc.params())
        }
    };

    fs::write(&output_path, &bytes)
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
    info!("wrote {} bytes to {}", bytes.len(), output_path.display());

    println!(
        "{} {} ({} bytes, {})",
        "Wrote:".green().bold(),
        output_path.display(),
        bytes.len(),
        kind.media_type()
    );
    Ok(ExitCode::SUCCESS)
}

fn report(result: &ValidationResult) {
    for error in &result.errors {
        eprintln!("  {} {}", "error".red().bold(), error);
    }
    for warning in &result.warnings {
        eprintln!("  {} {}", "warning".yellow().bold(), warning);
    }
}

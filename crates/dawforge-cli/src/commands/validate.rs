//! Validate command implementation
//!
//! Parses a raw generator response and reports every coded error and
//! warning without producing an artifact.

use anyhow::{Context, Result};
use colored::Colorize;
use dawforge_spec::{
    validate_midi_document, validate_preset_document, MidiDocument, OutputKind, PresetDocument,
};
use std::fs;
use std::process::ExitCode;

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(input: &str, kind: OutputKind) -> Result<ExitCode> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read generator response: {}", input))?;

    println!("{} {} ({})", "Validating:".cyan().bold(), input, kind);

    let result = match kind {
        OutputKind::Midi => {
            let doc = MidiDocument::from_generator(&raw)?;
            validate_midi_document(&doc)
        }
        OutputKind::Fxp => {
            let doc = PresetDocument::from_generator(&raw)?;
            validate_preset_document(&doc)
        }
        OutputKind::Fst => {
            let doc = PresetDocument::from_generator_params(&raw)?;
            validate_preset_document(&doc)
        }
    };

    for error in &result.errors {
        println!("  {} {}", "error".red().bold(), error);
    }
    for warning in &result.warnings {
        println!("  {} {}", "warning".yellow().bold(), warning);
    }

    if result.is_ok() {
        println!(
            "{} ({} warnings)",
            "Valid".green().bold(),
            result.warnings.len()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} ({} errors, {} warnings)",
            "Invalid".red().bold(),
            result.errors.len(),
            result.warnings.len()
        );
        Ok(ExitCode::from(1))
    }
}

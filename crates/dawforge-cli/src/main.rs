//! dawforge CLI - Generator response encoding
//!
//! This binary turns raw text-generator responses into playable MIDI files
//! and loadable synthesizer presets.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use dawforge_cli::commands;
use dawforge_spec::OutputKind;

/// dawforge - MIDI and synth-preset encoding for generated music documents
#[derive(Parser)]
#[command(name = "dawforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a raw generator response into an artifact file
    Generate {
        /// Path to the raw generator response (text)
        #[arg(short, long)]
        input: String,

        /// Artifact kind to encode (midi, fxp, fst)
        #[arg(short, long)]
        kind: OutputKind,

        /// Output file path (default: the kind's conventional filename)
        #[arg(short, long)]
        output: Option<String>,

        /// Binary preset template path (fst only)
        #[arg(short, long)]
        template: Option<String>,

        /// Offset table JSON path (fst only; built-in 3x-oscillator table
        /// when omitted)
        #[arg(long)]
        offsets: Option<String>,
    },

    /// Validate a raw generator response without writing an artifact
    Validate {
        /// Path to the raw generator response (text)
        #[arg(short, long)]
        input: String,

        /// Artifact kind to validate against (midi, fxp, fst)
        #[arg(short, long)]
        kind: OutputKind,
    },

    /// Print the header and JSON payload of a packed preset container
    Unpack {
        /// Path to the packed preset file
        #[arg(short, long)]
        input: String,

        /// Pretty-print the payload JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            kind,
            output,
            template,
            offsets,
        } => commands::generate::run(
            &input,
            kind,
            output.as_deref(),
            template.as_deref(),
            offsets.as_deref(),
        ),
        Commands::Validate { input, kind } => commands::validate::run(&input, kind),
        Commands::Unpack { input, pretty } => commands::unpack::run(&input, pretty),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

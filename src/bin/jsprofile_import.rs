//! Convert a JS self-profiling trace to a time-weighted stack-list profile.
//!
//! Reads a trace JSON file (`frames`, `resources`, `stacks`, `samples`),
//! reconstructs the call stack of every sample, and writes the weighted
//! entries as JSON.
//!
//! # Usage
//!
//! ```bash
//! jsprofile_import trace.json -o profile.json
//! jsprofile_import trace.json
//! ```

use clap::Parser;
use jsprofile::trace::{JsProfileTrace, is_js_profile};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "jsprofile_import")]
#[command(about = "Convert a JS self-profiling trace to a weighted stack-list profile")]
#[command(version)]
struct Args {
    /// Input trace file (JSON with frames, resources, stacks, samples)
    input: PathBuf,

    /// Output profile file (defaults to input filename with .profile.json extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = args.output.unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_extension("profile.json");
        path
    });

    let input_file = File::open(&args.input).map_err(|e| {
        format!(
            "Failed to open input file '{}': {}",
            args.input.display(),
            e
        )
    })?;
    let mut reader = BufReader::new(input_file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    // Decline early if this is not a JS self-profiling trace, so another
    // format handler can take it
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    if !is_js_profile(&value) {
        return Err(
            "not a JS self-profiling trace: expected frames, resources, stacks, samples".into(),
        );
    }

    let trace = JsProfileTrace::from_reader(std::io::Cursor::new(&contents))?;
    eprintln!(
        "Importing {} samples over {} stack nodes",
        trace.samples.len(),
        trace.stacks.len()
    );

    let profile = jsprofile::import(&trace)?;

    let output_file = File::create(&output_path).map_err(|e| {
        format!(
            "Failed to create output file '{}': {}",
            output_path.display(),
            e
        )
    })?;
    let mut writer = BufWriter::new(output_file);
    serde_json::to_writer_pretty(&mut writer, &profile)?;
    writer.flush()?;

    eprintln!(
        "Converted '{}' -> '{}' ({} entries, {:.3}ms total)",
        args.input.display(),
        output_path.display(),
        profile.entries.len(),
        profile.total_duration
    );

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

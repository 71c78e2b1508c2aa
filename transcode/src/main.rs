//! A CLI tool for converting a DICOM file into another transfer syntax.
//!
//! The data set is streamed from input to output,
//! with bulk data copied straight from the source file,
//! so files of any size can be converted in little memory.
//!
//! The built-in dictionary knows the attributes
//! needed for encoding and decoding data sets,
//! not the whole standard.
//! Attributes it does not know have no VR in implicit VR input,
//! so converting such a file to an explicit VR syntax
//! writes them with a `UN` header.
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use dicomio_dictionary_std::uids;
use dicomio_parser::{transcode, DicomInputOptions, DicomInputStream, EncodeOptions, IncludeBulkData};
use snafu::{whatever, Report, ResultExt, Whatever};
use tracing::{error, info, Level};

/// Convert a DICOM file into another transfer syntax
///
/// Attributes missing from the built-in dictionary
/// are written as UN when converting from implicit VR.
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// Path to the DICOM file to convert
    file: PathBuf,

    /// Path to the output file
    #[arg(short = 'o', long = "out")]
    output: PathBuf,

    /// The transfer syntax to convert to,
    /// by UID or by one of the names
    /// `ivrle`, `evrle`, `evrbe` and `deflate`
    #[arg(short = 't', long = "ts", default_value = "evrle")]
    transfer_syntax: String,

    /// Write group length elements
    #[arg(long = "group-length")]
    group_length: bool,

    /// Assume this transfer syntax if the input is not recognized
    #[arg(long = "fallback-ts")]
    fallback_transfer_syntax: Option<String>,

    /// Print more information about the conversion
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Resolve a transfer syntax name or UID.
fn resolve_transfer_syntax(name: &str) -> Result<&str, Whatever> {
    let uid = match name.to_ascii_lowercase().as_str() {
        "ivrle" => uids::IMPLICIT_VR_LITTLE_ENDIAN,
        "evrle" => uids::EXPLICIT_VR_LITTLE_ENDIAN,
        "evrbe" => uids::EXPLICIT_VR_BIG_ENDIAN,
        "deflate" => uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
        _ if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit() || c == '.') => name,
        _ => whatever!("Unknown transfer syntax `{}`", name),
    };
    Ok(uid)
}

fn run(app: App) -> Result<(), Whatever> {
    let App {
        file,
        output,
        transfer_syntax,
        group_length,
        fallback_transfer_syntax,
        verbose: _,
    } = app;

    let uid = resolve_transfer_syntax(&transfer_syntax)?;

    let mut input_options = DicomInputOptions::new().include_bulk_data(IncludeBulkData::Uri);
    if let Some(fallback) = fallback_transfer_syntax {
        input_options = input_options.fallback_transfer_syntax(resolve_transfer_syntax(&fallback)?);
    }
    let mut input = DicomInputStream::open_file(&file, input_options)
        .with_whatever_context(|_| format!("Could not open {}", file.display()))?;
    info!(
        "Converting {} from {} to {}",
        file.display(),
        input.transfer_syntax().uid,
        uid
    );

    let out = File::create(&output)
        .with_whatever_context(|_| format!("Could not create {}", output.display()))?;
    let options = EncodeOptions::new().group_length(group_length);
    let out = transcode(&mut input, BufWriter::new(out), uid, options)
        .whatever_context("Could not convert data set")?;
    out.into_inner()
        .map_err(|e| e.into_error())
        .with_whatever_context(|_| format!("Could not write {}", output.display()))?;

    info!("Saved to {}", output.display());
    Ok(())
}

fn main() {
    let app = App::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(if app.verbose {
                Level::DEBUG
            } else {
                Level::WARN
            })
            .finish(),
    )
    .whatever_context("Could not set up global logging subscriber")
    .unwrap_or_else(|e: Whatever| {
        eprintln!("[ERROR] {}", Report::from_error(e));
    });

    run(app).unwrap_or_else(|e| {
        error!("{}", Report::from_error(e));
        std::process::exit(-1);
    });
}

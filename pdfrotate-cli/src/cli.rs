//! CLI argument parsing for pdfrotate.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use pdfrotate::config::{Config, RotationRequest};
use pdfrotate::error::{PdfRotateError, Result};
use pdfrotate::export::{ExportOptions, RotationMode};

/// Rotate PDF pages in 90 degree steps.
///
/// pdfrotate rotates individual pages or the whole document clockwise and
/// saves the result next to the original as
/// `<name>_rotated_<timestamp>.pdf`. Page content is never re-rendered;
/// only each page's orientation entry changes.
#[derive(Parser, Debug)]
#[command(name = "pdfrotate")]
#[command(version)]
#[command(about = "Rotate PDF pages in 90 degree steps", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF file
    ///
    /// Optional with --interactive, where `open <path>` loads files.
    #[arg(value_name = "FILE", required_unless_present = "interactive")]
    pub input: Option<PathBuf>,

    /// Rotate pages clockwise (e.g., "2", "1-3:180", "4,6:270")
    ///
    /// Page numbers are 1-indexed. Degrees default to 90 and must be a
    /// multiple of 90. Repeat the flag to rotate more pages; rotations of
    /// the same page add up.
    ///
    /// Examples:
    ///   pdfrotate scan.pdf -r 2
    ///   pdfrotate scan.pdf -r 1-3:180 -r 5:270
    #[arg(short, long = "rotate", value_name = "RANGE[:DEGREES]")]
    pub rotate: Vec<String>,

    /// Rotate every page by 90 degrees (repeat for more turns)
    #[arg(short = 'a', long = "rotate-all", action = ArgAction::Count)]
    pub rotate_all: u8,

    /// Enlarge preview thumbnails by N steps
    #[arg(long, value_name = "N", conflicts_with = "zoom_out")]
    #[arg(value_parser = clap::value_parser!(u8).range(1..=9))]
    pub zoom_in: Option<u8>,

    /// Shrink preview thumbnails by N steps
    #[arg(long, value_name = "N")]
    #[arg(value_parser = clap::value_parser!(u8).range(1..=9))]
    pub zoom_out: Option<u8>,

    /// Directory the rotated PDF is saved into
    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        env = "PDFROTATE_OUTPUT_DIR",
        default_value = "."
    )]
    pub output_dir: PathBuf,

    /// Add rotations on top of the orientation already stored in the file
    ///
    /// By default the tracked rotation replaces whatever the page had.
    #[arg(long)]
    pub relative: bool,

    /// Compress streams in the output PDF
    #[arg(long)]
    pub compress: bool,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,

    /// Dry run - rotate in memory and report what would be written
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show page previews and timings
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the final state and export outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Read commands from stdin (type `help` for the list)
    #[arg(short, long)]
    pub interactive: bool,

    /// Write debug logs to this file instead of the terminal
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A rotation request is malformed
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let rotations = self
            .rotate
            .iter()
            .map(|spec| {
                RotationRequest::parse(spec)
                    .map_err(|e| PdfRotateError::invalid_config(format!("{e:#}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let zoom_steps = match (self.zoom_in, self.zoom_out) {
            (Some(_), Some(_)) => {
                return Err(PdfRotateError::invalid_config(
                    "Cannot use both --zoom-in and --zoom-out",
                ));
            }
            (Some(steps), None) => zoom_steps(steps)?,
            (None, Some(steps)) => -zoom_steps(steps)?,
            (None, None) => 0,
        };

        let mode = if self.relative {
            RotationMode::Relative
        } else {
            RotationMode::Replace
        };

        let config = Config {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            rotations,
            rotate_all: self.rotate_all,
            zoom_steps,
            export: ExportOptions {
                mode,
                compress: self.compress,
            },
            overwrite: self.force,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            interactive: self.interactive,
        };

        config.validate().map_err(|e| {
            PdfRotateError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}

fn zoom_steps(steps: u8) -> Result<i8> {
    i8::try_from(steps)
        .map_err(|_| PdfRotateError::invalid_config(format!("Too many zoom steps: {steps}")))
}

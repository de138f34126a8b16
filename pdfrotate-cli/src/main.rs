//! pdfrotate - Rotate PDF pages in 90 degree steps.
//!
//! One-shot mode applies the requested rotations and exports once.
//! Interactive mode reads commands from stdin against a single session.

mod cli;
mod interactive;

use clap::Parser;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::Path;
use std::process;
use tokio::io::BufReader;

use crate::cli::Cli;
use crate::interactive::Interactive;
use pdfrotate::Session;
use pdfrotate::config::Config;
use pdfrotate::error::PdfRotateError;
use pdfrotate::export::{
    DirectorySaver, ExportOutcome, Exporter, FileSaver, MemorySaver, SystemClock,
};
use pdfrotate::io::{PdfReader, WriteOptions};
use pdfrotate::output::{
    ExportReport, OutputFormatter, SessionReport, display_outcome, display_session, to_json,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

fn log_level(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn init_logging(cli: &Cli) -> Result<(), PdfRotateError> {
    let config = simplelog::Config::default();

    let result = match &cli.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| PdfRotateError::FailedToCreateOutput {
                path: path.clone(),
                source: e,
            })?;
            WriteLogger::init(LevelFilter::Debug, config, file)
        }
        None => TermLogger::init(
            log_level(cli.verbose, cli.quiet),
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };

    result.map_err(|e| PdfRotateError::other(format!("Failed to initialize logging: {e}")))
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfRotateError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if config.interactive {
        return run_interactive(&config, formatter).await;
    }

    if formatter.should_print() && !config.json {
        formatter.section(&format!("{} v{}", pdfrotate::NAME, pdfrotate::VERSION));
    }

    let input = config
        .input
        .as_deref()
        .ok_or_else(|| PdfRotateError::invalid_config("No input file specified"))?;

    let mut session = Session::new();
    open_with_actions(&mut session, &config, input, &formatter).await?;

    if formatter.is_verbose() && !config.json {
        show_preview(&session, &formatter);
    }

    let exporter = Exporter::with_options(config.export.clone());

    if config.dry_run {
        let saver = MemorySaver::new();
        let outcome = session.export(&exporter, &saver, &SystemClock).await?;
        return report(&config, &formatter, &session, &outcome, true);
    }

    let saver = directory_saver(&config);
    let outcome = session.export(&exporter, &saver, &SystemClock).await?;
    report(&config, &formatter, &session, &outcome, false)
}

async fn open_with_actions(
    session: &mut Session,
    config: &Config,
    input: &Path,
    formatter: &OutputFormatter,
) -> Result<(), PdfRotateError> {
    if !config.json {
        formatter.info(&format!("Loading {}...", input.display()));
    }

    let document = PdfReader::new().load(input).await?;
    formatter.detail("Pages", &document.page_count.to_string());
    formatter.detail("Version", &document.version);
    formatter.detail("Size", &document.format_file_size());
    formatter.detail(
        "Load time",
        &format!("{:.2}s", document.load_time.as_secs_f64()),
    );

    let actions = config.actions(document.page_count);
    session.open(document);
    session.apply_all(actions);
    Ok(())
}

fn show_preview(session: &Session, formatter: &OutputFormatter) {
    display_session(formatter, session);

    if let Some(sheet) = session.thumbnails() {
        formatter.section("Preview");
        for thumbnail in &sheet.thumbnails {
            let (width, height) = thumbnail.bounding_box();
            formatter.detail(
                &format!("Page {}", thumbnail.page_number()),
                &format!("{width}x{height}px, {}", thumbnail.rotation),
            );
        }
    }
}

fn directory_saver(config: &Config) -> DirectorySaver {
    DirectorySaver::with_options(
        &config.output_dir,
        WriteOptions {
            overwrite: config.overwrite,
            ..Default::default()
        },
    )
}

fn report(
    config: &Config,
    formatter: &OutputFormatter,
    session: &Session,
    outcome: &ExportOutcome,
    dry_run: bool,
) -> Result<(), PdfRotateError> {
    if config.json {
        let report = ExportReport {
            session: SessionReport::new(session),
            outcome,
            dry_run,
        };
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    if dry_run {
        formatter.success("Dry run completed successfully");
        formatter.info(&format!(
            "  Output would be: {}",
            config.output_dir.join(&outcome.file_name).display()
        ));
        formatter.info("  Run without --dry-run to write the rotated PDF");
    } else {
        display_outcome(formatter, outcome);
    }

    Ok(())
}

async fn run_interactive(
    config: &Config,
    formatter: OutputFormatter,
) -> Result<(), PdfRotateError> {
    let mut session = Session::new();
    if let Some(input) = config.input.as_deref() {
        open_with_actions(&mut session, config, input, &formatter).await?;
    }

    let exporter = Exporter::with_options(config.export.clone());
    if config.dry_run {
        drive(session, exporter, MemorySaver::new(), config, formatter).await
    } else {
        let saver = directory_saver(config);
        drive(session, exporter, saver, config, formatter).await
    }
}

async fn drive<S: FileSaver>(
    session: Session,
    exporter: Exporter,
    saver: S,
    config: &Config,
    formatter: OutputFormatter,
) -> Result<(), PdfRotateError> {
    let mut driver =
        Interactive::new(session, exporter, saver, SystemClock, formatter).with_json(config.json);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    driver.run(stdin, &mut stdout).await
}

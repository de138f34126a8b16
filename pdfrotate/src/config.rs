//! Configuration module for pdfrotate.
//!
//! This module turns CLI arguments into a validated configuration and expands
//! the requested rotations into the store actions that a user would otherwise
//! trigger by clicking. It handles:
//! - Page range and rotation request parsing
//! - Validation of argument combinations
//! - Application of defaults

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::export::ExportOptions;
use crate::io::has_pdf_extension;
use crate::state::Action;

/// Page range specification.
///
/// Supports individual pages and ranges, 1-indexed:
/// - "1" - single page
/// - "1-5" - range of pages (inclusive)
/// - "1,3,5" - multiple individual pages
/// - "1-5,10-15" - combination of ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    ranges: Vec<PageRangeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageRangeItem {
    Single(u32),
    Range(u32, u32),
}

impl PageRange {
    /// Parse a page range string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string format is invalid or contains invalid page numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfrotate::config::PageRange;
    ///
    /// let range = PageRange::parse("1-5,10").unwrap();
    /// assert!(range.contains(3));
    /// assert!(range.contains(10));
    /// assert!(!range.contains(7));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut ranges = Vec::new();

        for part in s.split(',') {
            let part = part.trim();

            if part.contains('-') {
                let parts: Vec<&str> = part.split('-').collect();
                if parts.len() != 2 {
                    bail!("Invalid page range format: {part}. Expected format like '1-5'");
                }

                let start: u32 = parts[0]
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {}", parts[0]))?;

                let end: u32 = parts[1]
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {}", parts[1]))?;

                if start == 0 || end == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }

                if start > end {
                    bail!(
                        "Invalid range {start}-{end}: start page must be less than or equal to end page"
                    );
                }

                ranges.push(PageRangeItem::Range(start, end));
            } else {
                let page: u32 = part
                    .parse()
                    .with_context(|| format!("Invalid page number: {part}"))?;

                if page == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }

                ranges.push(PageRangeItem::Single(page));
            }
        }

        if ranges.is_empty() {
            bail!("Page range cannot be empty");
        }

        Ok(Self { ranges })
    }

    /// Check if a page number is included in this range.
    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|item| match item {
            PageRangeItem::Single(p) => *p == page,
            PageRangeItem::Range(start, end) => page >= *start && page <= *end,
        })
    }

    /// All page numbers in this range up to `max_pages`, sorted and deduplicated.
    pub fn to_pages(&self, max_pages: u32) -> Vec<u32> {
        (1..=max_pages).filter(|p| self.contains(*p)).collect()
    }

    /// Highest page number the range mentions.
    pub fn max_page(&self) -> u32 {
        self.ranges
            .iter()
            .map(|item| match item {
                PageRangeItem::Single(p) => *p,
                PageRangeItem::Range(_, end) => *end,
            })
            .max()
            .unwrap_or(0)
    }
}

/// "Rotate these pages by this much", e.g. `2`, `1-3:180`, `4,6:270`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationRequest {
    /// Pages to rotate (1-indexed).
    pub pages: PageRange,

    /// Clockwise quarter turns to apply to each page.
    pub quarter_turns: u16,
}

impl RotationRequest {
    /// Parse `RANGE[:DEGREES]`. Degrees default to 90.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or the degrees are not a
    /// positive multiple of 90.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfrotate::config::RotationRequest;
    ///
    /// let request = RotationRequest::parse("1-3:180").unwrap();
    /// assert_eq!(request.quarter_turns, 2);
    /// assert!(request.pages.contains(2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (range, degrees) = match s.rsplit_once(':') {
            Some((range, degrees)) => {
                let degrees: u16 = degrees
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid rotation degrees: {degrees}"))?;
                (range, degrees)
            }
            None => (s, 90),
        };

        if degrees == 0 || degrees % 90 != 0 {
            bail!("Invalid rotation: {degrees}. Must be a positive multiple of 90");
        }

        let pages = PageRange::parse(range)
            .with_context(|| format!("Invalid rotation request: {s}"))?;

        Ok(Self {
            pages,
            quarter_turns: degrees / 90,
        })
    }
}

/// Complete configuration for one pdfrotate run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Input PDF. Optional only in interactive mode.
    pub input: Option<PathBuf>,

    /// Directory the rotated file is saved into.
    pub output_dir: PathBuf,

    /// Per-page rotation requests, applied in order.
    pub rotations: Vec<RotationRequest>,

    /// Quarter turns applied to every page.
    pub rotate_all: u8,

    /// Net zoom clicks: positive zooms in, negative zooms out.
    pub zoom_steps: i8,

    /// Export behavior.
    pub export: ExportOptions,

    /// Replace an existing output file.
    pub overwrite: bool,

    /// Run the export in memory without writing anything.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print state and outcome as JSON.
    pub json: bool,

    /// Read commands from stdin instead of exporting once.
    pub interactive: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input is given outside interactive mode
    /// - The input does not carry a `.pdf` extension
    /// - Verbose and quiet modes are both enabled
    pub fn validate(&self) -> Result<()> {
        match &self.input {
            None if !self.interactive => bail!("No input file specified"),
            Some(input) if !has_pdf_extension(input) => {
                bail!("Input must be a .pdf file: {}", input.display())
            }
            _ => {}
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        Ok(())
    }

    /// Expand the requested rotations and zoom into store actions for a
    /// document with `page_count` pages.
    ///
    /// Pages past the end of the document are skipped with a warning.
    pub fn actions(&self, page_count: usize) -> Vec<Action> {
        let max_pages = u32::try_from(page_count).unwrap_or(u32::MAX);
        let mut actions = Vec::new();

        for request in &self.rotations {
            if request.pages.max_page() > max_pages {
                log::warn!(
                    "rotation request mentions page {} but the document has {page_count} pages",
                    request.pages.max_page()
                );
            }

            for page in request.pages.to_pages(max_pages) {
                let index = (page - 1) as usize;
                actions.extend(std::iter::repeat_n(
                    Action::Rotate(index),
                    request.quarter_turns.into(),
                ));
            }
        }

        actions.extend(std::iter::repeat_n(
            Action::RotateAll,
            self.rotate_all.into(),
        ));

        let zoom = if self.zoom_steps >= 0 {
            Action::IncreaseSize
        } else {
            Action::DecreaseSize
        };
        actions.extend(std::iter::repeat_n(
            zoom,
            self.zoom_steps.unsigned_abs().into(),
        ));

        actions
    }
}

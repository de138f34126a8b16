//! Line-oriented commands for interactive sessions.
//!
//! Each line maps to one user gesture: opening a file, clicking a page,
//! pressing a toolbar button. Page numbers are 1-based here and converted to
//! 0-based indices for the store.

use std::fmt;
use std::path::PathBuf;

use crate::error::{PdfRotateError, Result};
use crate::state::Action;

/// One interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a file, replacing the current one.
    Open(PathBuf),
    /// Unload the current file.
    Close,
    /// Apply a state action.
    Apply(Action),
    /// Clear every rotation, keeping the loaded pages.
    Reset,
    /// Print the current state.
    Show,
    /// Export the current file.
    Export,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Blank lines and lines starting with `#` yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfRotateError::InvalidCommand`] for unknown commands and
    /// malformed arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfrotate::command::Command;
    /// use pdfrotate::state::Action;
    ///
    /// assert_eq!(
    ///     Command::parse("rotate 2").unwrap(),
    ///     Some(Command::Apply(Action::Rotate(1)))
    /// );
    /// assert_eq!(Command::parse("  # comment").unwrap(), None);
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "open" => {
                if rest.is_empty() {
                    return Err(PdfRotateError::invalid_command("open needs a file path"));
                }
                Self::Open(PathBuf::from(rest))
            }
            "close" => Self::no_args(name, rest, Self::Close)?,
            "rotate" => Self::Apply(Action::Rotate(parse_page(rest)?)),
            "rotate-all" => Self::no_args(name, rest, Self::Apply(Action::RotateAll))?,
            "reset" => Self::no_args(name, rest, Self::Reset)?,
            "zoom-in" => Self::no_args(name, rest, Self::Apply(Action::IncreaseSize))?,
            "zoom-out" => Self::no_args(name, rest, Self::Apply(Action::DecreaseSize))?,
            "zoom-reset" => Self::no_args(name, rest, Self::Apply(Action::ResetSize))?,
            "show" => Self::no_args(name, rest, Self::Show)?,
            "export" => Self::no_args(name, rest, Self::Export)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(PdfRotateError::invalid_command(format!(
                    "Unknown command '{other}'"
                )));
            }
        };

        Ok(Some(command))
    }

    fn no_args(name: &str, rest: &str, command: Self) -> Result<Self> {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(PdfRotateError::invalid_command(format!(
                "{name} takes no arguments"
            )))
        }
    }

    /// Usage text listing every command.
    pub fn help_text() -> &'static str {
        "\
Commands:
  open <path>   load a PDF, replacing the current one
  close         unload the current PDF
  rotate <n>    rotate page n (1-based) by 90° clockwise
  rotate-all    rotate every page by 90° clockwise
  reset         clear all rotations
  zoom-in       enlarge thumbnails
  zoom-out      shrink thumbnails
  zoom-reset    restore the default thumbnail size
  show          print the current state
  export        save the rotated PDF
  help          show this list
  quit          leave"
    }
}

fn parse_page(arg: &str) -> Result<usize> {
    if arg.is_empty() {
        return Err(PdfRotateError::invalid_command("rotate needs a page number"));
    }

    let page: usize = arg
        .parse()
        .map_err(|_| PdfRotateError::invalid_command(format!("Invalid page number: {arg}")))?;

    if page == 0 {
        return Err(PdfRotateError::invalid_command(
            "Page numbers must be positive (1-indexed)",
        ));
    }

    Ok(page - 1)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(path) => write!(f, "open {}", path.display()),
            Self::Close => write!(f, "close"),
            Self::Apply(Action::Rotate(index)) => write!(f, "rotate {}", index + 1),
            Self::Apply(Action::RotateAll) => write!(f, "rotate-all"),
            Self::Apply(Action::IncreaseSize) => write!(f, "zoom-in"),
            Self::Apply(Action::DecreaseSize) => write!(f, "zoom-out"),
            Self::Apply(Action::ResetSize) => write!(f, "zoom-reset"),
            Self::Apply(action) => write!(f, "{action:?}"),
            Self::Reset => write!(f, "reset"),
            Self::Show => write!(f, "show"),
            Self::Export => write!(f, "export"),
            Self::Help => write!(f, "help"),
            Self::Quit => write!(f, "quit"),
        }
    }
}

//! Command loop for `--interactive`.
//!
//! Reads one command per line and answers on the writer. A failed command
//! is reported and the loop keeps going when the error is recoverable, so a
//! failed export can be retried. Any other error ends the session.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use pdfrotate::Session;
use pdfrotate::command::Command;
use pdfrotate::error::{PdfRotateError, Result};
use pdfrotate::export::{Clock, Exporter, FileSaver};
use pdfrotate::io::PdfReader;
use pdfrotate::output::{
    MessageLevel, OutputFormatter, SessionReport, document_summary, outcome_summary,
    session_lines,
};
use pdfrotate::state::Action;

/// Interactive driver around one [`Session`].
pub struct Interactive<S, C> {
    session: Session,
    reader: PdfReader,
    exporter: Exporter,
    saver: S,
    clock: C,
    formatter: OutputFormatter,
    json: bool,
}

impl<S, C> Interactive<S, C>
where
    S: FileSaver,
    C: Clock,
{
    pub fn new(
        session: Session,
        exporter: Exporter,
        saver: S,
        clock: C,
        formatter: OutputFormatter,
    ) -> Self {
        Self {
            session,
            reader: PdfReader::new(),
            exporter,
            saver,
            clock,
            formatter,
            json: false,
        }
    }

    /// Answer `show` with JSON instead of text.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[cfg(test)]
    fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    fn saver(&self) -> &S {
        &self.saver
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Fails when reading input or writing output fails, or when a command
    /// hits an error that is not [recoverable](PdfRotateError::is_recoverable).
    /// That error is printed before it is returned.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    self.write(output, MessageLevel::Error, &err.to_string())
                        .await?;
                    continue;
                }
            };

            log::debug!("command: {command}");
            if command == Command::Quit {
                break;
            }

            if let Err(err) = self.execute(command, output).await {
                self.write(output, MessageLevel::Error, &err.to_string())
                    .await?;
                if !err.is_recoverable() {
                    log::error!("ending session: {err}");
                    output.flush().await?;
                    return Err(err);
                }
                log::warn!("command failed: {err}");
            }
        }

        output.flush().await?;
        Ok(())
    }

    async fn execute<W>(&mut self, command: Command, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            Command::Open(path) => {
                let document = self.reader.load(&path).await?;
                let summary = document_summary(&document);
                self.session.open(document);
                self.write(output, MessageLevel::Success, &format!("Loaded {summary}"))
                    .await
            }
            Command::Close => match self.session.close() {
                Some(document) => {
                    self.write(output, MessageLevel::Info, &format!("Closed {}", document.name))
                        .await
                }
                None => {
                    self.write(output, MessageLevel::Warning, "No document loaded")
                        .await
                }
            },
            Command::Apply(action) => {
                self.session.apply(action);
                let message = self.describe(action);
                self.write(output, MessageLevel::Info, &message).await
            }
            Command::Reset => {
                self.session.reset_rotations();
                self.write(output, MessageLevel::Info, "Rotations cleared")
                    .await
            }
            Command::Show => {
                if self.json {
                    let json = SessionReport::new(&self.session).to_json()?;
                    self.write_raw(output, &json).await
                } else {
                    for line in session_lines(&self.session) {
                        self.write(output, MessageLevel::Info, &line).await?;
                    }
                    Ok(())
                }
            }
            Command::Export => {
                let outcome = self
                    .session
                    .export(&self.exporter, &self.saver, &self.clock)
                    .await?;
                self.write(output, MessageLevel::Success, &outcome_summary(&outcome))
                    .await
            }
            Command::Help => self.write_raw(output, Command::help_text()).await,
            Command::Quit => Ok(()),
        }
    }

    fn describe(&self, action: Action) -> String {
        let state = self.session.state();
        match action {
            Action::Rotate(index) if state.pages.contains_key(&index) => {
                format!("Page {}: {}", index + 1, state.rotation_of(index))
            }
            Action::Rotate(index) => format!("No page {} to rotate", index + 1),
            Action::RotateAll => format!("Rotated {} page(s)", state.page_count()),
            Action::IncreaseSize | Action::DecreaseSize | Action::ResetSize => {
                format!("Thumbnail size: {}px", state.thumbnail_size)
            }
            other => format!("{other:?}"),
        }
    }

    async fn write<W>(&self, output: &mut W, level: MessageLevel, message: &str) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let suppressed = self.formatter.is_quiet()
            && matches!(level, MessageLevel::Info | MessageLevel::Success);
        if suppressed {
            return Ok(());
        }
        self.write_raw(output, &self.formatter.render(level, message))
            .await
    }

    async fn write_raw<W>(&self, output: &mut W, text: &str) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        Ok(())
    }
}

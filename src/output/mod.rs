// src/output/mod.rs
//! Rendering of a read result for stdout.
//!
//! Rendering is a pure function; `print_to_stdout` is the only place that
//! touches the terminal.

use crate::error::AppError;
use crate::model::ReadResult;
use crate::pipeline::ResultRenderer;
use clap::ValueEnum;
use std::io::Write;

/// How the result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full result object as JSON
    Json,
    /// The document's plain text when it has one, JSON otherwise
    Text,
}

/// Renders a result in the requested format.
pub fn render_output(
    result: &ReadResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, AppError> {
    if format == OutputFormat::Text {
        if let Some(text) = result.text_content() {
            return Ok(text.to_string());
        }
        log::debug!("Result has no text content; printing JSON instead");
    }

    let rendered = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(rendered)
}

/// Output settings of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl ResultRenderer for Presentation {
    fn render(&self, result: &ReadResult) -> Result<String, AppError> {
        render_output(result, self.format, self.pretty)
    }
}

/// Writes the rendered output followed by a newline.
pub fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(content.as_bytes())?;
    handle.write_all(b"\n")?;
    handle.flush()?;
    Ok(())
}

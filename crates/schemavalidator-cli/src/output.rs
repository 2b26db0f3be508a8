//! Output formatting and writing utilities
//!
//! Results go to stdout in the selected format; human-oriented notes and the
//! failure table go to stderr so that stdout stays machine-readable.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use schemavalidator_core::TriageReport;
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // For human format, use pretty JSON as fallback
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
    diagnostics: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout and stderr
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writers(
            format,
            use_color,
            quiet,
            verbose,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    /// Create an output writer with custom writers
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
        diagnostics: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
            diagnostics,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn diagnostic(&mut self, content: &str) -> Result<()> {
        writeln!(self.diagnostics, "{}", content)?;
        self.diagnostics.flush()?;
        Ok(())
    }

    /// Write an info message (human format, -v only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.verbose == 0 || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.diagnostic(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.diagnostic(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting data: {}", formatted);

        // YAML already ends with a newline
        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write the failure table of a ranked report.
    ///
    /// Only human output at -v or above shows the table, on stderr; the
    /// structured formats carry the failures in their result data.
    pub fn report(&mut self, report: &TriageReport) -> Result<()> {
        if self.format != OutputFormat::Human || self.verbose == 0 || self.quiet {
            return Ok(());
        }

        let table = report.table();
        if self.use_color {
            self.diagnostic(&table.yellow().to_string())
        } else {
            self.diagnostic(&table)
        }
    }
}

//! # System Printer
//!
//! Sends print documents to the platform print spooler through `lp`.
//!
//! ```bash
//! # List destinations
//! $ lpstat -p
//! # Print to a named destination
//! $ boleta print --demo --printer Receipt_80mm
//! ```

use std::io::Write;
use std::process::{Command, Stdio};

use super::PrintSurface;
use crate::error::BoletaError;
use crate::export::PrintDocument;

/// Default spooler command
pub const DEFAULT_COMMAND: &str = "lp";

/// # System Printer
///
/// Pipes the HTML print document to `lp` on stdin, titled with the job name.
#[derive(Debug, Clone)]
pub struct SystemPrinter {
    command: String,
    destination: Option<String>,
}

impl Default for SystemPrinter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SystemPrinter {
    /// Print to `destination`, or the system default printer.
    pub fn new(destination: Option<String>) -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            destination,
        }
    }

    /// Use a different spooler command (same argument conventions as `lp`).
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Arguments passed to the spooler.
    fn args(&self, document: &PrintDocument) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(dest) = &self.destination {
            args.push("-d".to_string());
            args.push(dest.clone());
        }
        args.push("-t".to_string());
        args.push(document.job.clone());
        args
    }
}

impl PrintSurface for SystemPrinter {
    fn submit(&mut self, document: &PrintDocument) -> Result<(), BoletaError> {
        let mut child = Command::new(&self.command)
            .args(self.args(document))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BoletaError::Print(format!("Failed to run '{}': {}", self.command, e)))?;

        // stdin is dropped after the write so the spooler sees EOF
        let sent = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(document.to_html().as_bytes()),
            None => Ok(()),
        };

        // Reap the child even when the write failed
        let output = child
            .wait_with_output()
            .map_err(|e| BoletaError::Print(format!("Failed to wait for '{}': {}", self.command, e)))?;
        sent.map_err(|e| BoletaError::Print(format!("Failed to send document: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BoletaError::Print(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::info!(job = %document.job, response = %stdout.trim(), "sent to printer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_receipt;
    use crate::receipt::{ReceiptOptions, sample_receipt};
    use pretty_assertions::assert_eq;

    fn print_document() -> PrintDocument {
        let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
        PrintDocument::new(&document, "TXN1")
    }

    #[test]
    fn test_args_default_destination() {
        let printer = SystemPrinter::default();
        assert_eq!(printer.args(&print_document()), vec!["-t", "receipt-TXN1"]);
    }

    #[test]
    fn test_args_named_destination() {
        let printer = SystemPrinter::new(Some("Front".into()));
        assert_eq!(
            printer.args(&print_document()),
            vec!["-d", "Front", "-t", "receipt-TXN1"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_spooler_closing_stdin_is_print_error() {
        // `true` exits without reading; a document larger than the pipe buffer breaks the pipe
        let document = PrintDocument {
            markup: "x".repeat(1 << 20),
            ..print_document()
        };
        let mut printer = SystemPrinter::default().with_command("true");
        match printer.submit(&document) {
            Err(BoletaError::Print(message)) => assert!(message.starts_with("Failed to send document")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_missing_command_is_print_error() {
        let mut printer = SystemPrinter::default().with_command("boleta-no-such-spooler");
        let err = printer.submit(&print_document()).unwrap_err();
        assert!(matches!(err, BoletaError::Print(_)));
    }
}

//! # Print Surfaces
//!
//! Where a [`PrintDocument`] goes once the user asks to print.
//!
//! ## Available Surfaces
//!
//! - [`SpoolDirectory`]: writes `<job>.html` into a directory
//! - [`system::SystemPrinter`]: pipes the document to the platform `lp` command

pub mod system;

pub use system::SystemPrinter;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::BoletaError;
use crate::export::PrintDocument;

/// Something that accepts print documents.
pub trait PrintSurface {
    /// Hand a document to the surface.
    fn submit(&mut self, document: &PrintDocument) -> Result<(), BoletaError>;
}

/// # Spool Directory
///
/// Writes each print document as a standalone HTML file, ready to be opened in
/// a browser's print dialog or picked up by another spooler.
///
/// ## Example
///
/// ```no_run
/// use boleta::transport::{PrintSurface, SpoolDirectory};
/// # use boleta::export::PrintDocument;
/// # fn doc() -> PrintDocument { unimplemented!() }
///
/// let mut spool = SpoolDirectory::new("/var/spool/receipts");
/// spool.submit(&doc())?;
/// println!("{:?}", spool.last_job());
/// # Ok::<(), boleta::BoletaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SpoolDirectory {
    dir: PathBuf,
    last_job: Option<PathBuf>,
}

impl SpoolDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_job: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recently spooled document.
    pub fn last_job(&self) -> Option<&Path> {
        self.last_job.as_deref()
    }
}

impl PrintSurface for SpoolDirectory {
    fn submit(&mut self, document: &PrintDocument) -> Result<(), BoletaError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.html", document.job));

        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(document.to_html().as_bytes())?;
        file.persist(&path)
            .map_err(|e| BoletaError::Print(format!("Failed to spool {}: {}", path.display(), e.error)))?;

        tracing::info!(path = %path.display(), "spooled print document");
        self.last_job = Some(path);
        Ok(())
    }
}

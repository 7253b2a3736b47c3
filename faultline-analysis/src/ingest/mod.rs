//! Ingestion stage: walk the input paths, decode every contained unit, and
//! fill the repository.

pub mod archive;

use std::path::{Path, PathBuf};

use faultline_core::errors::IngestError;
use faultline_core::events::types::ArchiveFinishedEvent;
use faultline_core::events::ProgressDispatcher;
use faultline_core::{Cancellable, CancellationToken};

use crate::unit::{ProgramUnit, UnitDecoder, UnitRepository};

/// Ingests inputs into a [`UnitRepository`].
pub struct Ingestor<'a> {
    decoder: &'a dyn UnitDecoder,
    archive_extensions: &'a [String],
    cancellation: &'a CancellationToken,
    progress: &'a ProgressDispatcher,
}

/// Insert `unit` and append its name. A redefined unit replaces the earlier
/// definition and is listed again, so it is examined once per occurrence.
fn add_unit(repository: &mut UnitRepository, names: &mut Vec<String>, unit: ProgramUnit) {
    let name = unit.name.clone();
    if repository.add(unit).is_some() {
        tracing::warn!(unit = %name, "Unit defined more than once; keeping the last definition");
    }
    names.push(name);
}

impl<'a> Ingestor<'a> {
    pub fn new(
        decoder: &'a dyn UnitDecoder,
        archive_extensions: &'a [String],
        cancellation: &'a CancellationToken,
        progress: &'a ProgressDispatcher,
    ) -> Self {
        Self {
            decoder,
            archive_extensions,
            cancellation,
            progress,
        }
    }

    /// Whether `path` is opened as an archive rather than decoded directly.
    pub fn is_archive(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.archive_extensions
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(ext))
            })
    }

    /// Clear `repository`, then decode every unit of every input into it.
    ///
    /// Returns every decoded unit name in input order, then archive-entry
    /// order, repeats included. Cancellation is checked before each archive
    /// entry and before each standalone input.
    pub fn ingest<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        repository: &mut UnitRepository,
    ) -> Result<Vec<String>, IngestError> {
        repository.clear();
        let mut names: Vec<String> = Vec::new();

        for input in inputs {
            let path = input.as_ref();
            let before = names.len();

            if self.is_archive(path) {
                tracing::debug!(path = %path.display(), "Ingesting archive");
                archive::read_units(path, self.decoder, self.cancellation, |unit| {
                    add_unit(repository, &mut names, unit)
                })?;
            } else {
                tracing::debug!(path = %path.display(), "Ingesting unit file");
                let unit = self.decode_file(path)?;
                add_unit(repository, &mut names, unit);
            }

            self.progress.emit_archive_finished(&ArchiveFinishedEvent {
                path: PathBuf::from(path),
                units: names.len() - before,
            });
        }

        Ok(names)
    }

    fn decode_file(&self, path: &Path) -> Result<ProgramUnit, IngestError> {
        if self.cancellation.is_cancelled() {
            return Err(IngestError::Cancelled);
        }
        let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.decoder
            .decode(&bytes, &path.display().to_string())
            .map_err(|source| IngestError::Decode {
                path: path.to_path_buf(),
                entry: None,
                source,
            })
    }
}

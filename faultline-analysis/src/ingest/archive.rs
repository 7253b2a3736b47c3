//! Reading compiled units out of zip-format archives (`.jar`, `.zip`).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use faultline_core::errors::IngestError;
use faultline_core::{Cancellable, CancellationToken};

use crate::unit::{ProgramUnit, UnitDecoder};

/// Upper bound on the buffer preallocated from an entry's declared size.
/// The declared size comes from the archive and is not trusted.
const READ_HINT_LIMIT: u64 = 1 << 20;

/// Decode every unit entry of the archive at `path`, in entry order, passing
/// each to `on_unit`. Entries the decoder does not recognize are skipped.
///
/// Returns the number of units decoded.
pub fn read_units<F>(
    path: &Path,
    decoder: &dyn UnitDecoder,
    cancellation: &CancellationToken,
    mut on_unit: F,
) -> Result<usize, IngestError>
where
    F: FnMut(ProgramUnit),
{
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| archive_error(path, e))?;

    let mut decoded = 0;
    for index in 0..archive.len() {
        if cancellation.is_cancelled() {
            return Err(IngestError::Cancelled);
        }

        let mut entry = archive.by_index(index).map_err(|e| archive_error(path, e))?;
        if entry.is_dir() || !decoder.is_unit_entry(entry.name()) {
            continue;
        }
        let entry_name = entry.name().to_string();

        let mut bytes = Vec::with_capacity(entry.size().min(READ_HINT_LIMIT) as usize);
        entry.read_to_end(&mut bytes).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let unit = decoder
            .decode(&bytes, &entry_name)
            .map_err(|source| IngestError::Decode {
                path: path.to_path_buf(),
                entry: Some(entry_name.clone()),
                source,
            })?;
        on_unit(unit);
        decoded += 1;
    }

    Ok(decoded)
}

fn archive_error(path: &Path, err: zip::result::ZipError) -> IngestError {
    match err {
        zip::result::ZipError::Io(source) => IngestError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => IngestError::Archive {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

//! Zip backups of the source and build-output trees.

use crate::constants::BACKUP_TIMESTAMP_FORMAT;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use chrono::{DateTime, TimeZone};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive file name for a backup taken at `now`, e.g. `2024-05-01-13:45:10.zip`.
pub fn backup_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}.zip", now.format(BACKUP_TIMESTAMP_FORMAT))
}

/// Compresses every file under `source_folder` into `zip_path`.
///
/// Entries are named `<folder name>/<relative path>`. Returns the number of
/// files written.
pub fn compress_folder<P: AsRef<Path>, Q: AsRef<Path>>(
    source_folder: P,
    zip_path: Q,
) -> Result<usize> {
    let source_folder = source_folder.as_ref();
    let zip_path = zip_path.as_ref();
    let folder_name = match source_folder.file_name() {
        Some(name) => Path::new(name).to_str_checked()?.to_string(),
        None => String::new(),
    };

    if let Some(parent) = zip_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut zip = ZipWriter::new(BufWriter::new(File::create(zip_path)?));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0;

    for entry in WalkDir::new(source_folder).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let relative = entry.path().strip_prefix(source_folder).map_err(|e| {
            Error::Other(anyhow::anyhow!(
                "Cannot relativize '{}': {e}",
                entry.path().display()
            ))
        })?;
        let entry_name = Path::new(&folder_name).join(relative).to_entry_name()?;

        log::trace!("Adding {entry_name} to {}", zip_path.display());
        zip.start_file(entry_name, options)?;
        let mut file = File::open(entry.path())?;
        std::io::copy(&mut file, &mut zip)?;
        count += 1;
    }

    zip.finish()?;
    log::info!(
        "Archived {} file(s) from {} into {}",
        count,
        source_folder.display(),
        zip_path.display()
    );
    Ok(count)
}

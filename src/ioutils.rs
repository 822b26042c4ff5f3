use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Default settings document shipped with the binary.
const DEFAULT_SETTINGS: &str = include_str!("../resources/build.setting.json");

/// Resources bundled into the binary, by file name.
const BUNDLED_RESOURCES: &[(&str, &str)] =
    &[(crate::constants::SETTINGS_FILENAME, DEFAULT_SETTINGS)];

/// Looks up a bundled resource by file name.
pub fn bundled_resource(name: &str) -> Option<&'static str> {
    BUNDLED_RESOURCES
        .iter()
        .find(|(resource, _)| *resource == name)
        .map(|(_, contents)| *contents)
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if dest_path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)?;
    log::info!("Directory created: [{}]", dest_path.display());
    Ok(())
}

/// Deletes a directory and everything below it. A missing directory is not an error.
pub fn delete_dir_all<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("Folder does not exist: {}", path.display());
        return Ok(());
    }
    std::fs::remove_dir_all(path).map_err(|e| {
        log::error!("Failed to delete: {}", path.display());
        Error::IoError(e)
    })?;
    log::debug!("Deleted: {}", path.display());
    Ok(())
}

/// Recursively copies `source` into `destination`, creating it if needed.
pub fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(|e| {
            Error::Other(anyhow::anyhow!(
                "Cannot relativize '{}': {e}",
                entry.path().display()
            ))
        })?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source_path: P, dest_path: Q) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(source_path.as_ref(), dest_path).map(|_| ()).map_err(Error::IoError)
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    std::fs::read_to_string(path.as_ref()).map_err(|e| {
        log::error!("Failed to read {}: {e}", path.as_ref().display());
        Error::IoError(e)
    })
}

/// Overwrites `dest_path` with `content`, creating parent directories if needed.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Writes the bundled resource `name` into `target_dir` unless it already exists.
///
/// An unknown resource is logged and skipped.
pub fn extract_resource<P: AsRef<Path>>(name: &str, target_dir: P) -> Result<()> {
    let target = target_dir.as_ref().join(name);
    if target.exists() {
        log::info!("{name} file already exists.");
        return Ok(());
    }

    let Some(contents) = bundled_resource(name) else {
        log::error!("Resource file not found: {name}");
        return Ok(());
    };

    write_file(contents, &target)?;
    log::info!("Resource file extracted: {name}");
    Ok(())
}

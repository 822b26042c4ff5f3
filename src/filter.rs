use crate::error::{Error, Result};
use crate::ext::PathExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns true if `folder_name` ends with any of `suffixes`.
/// An empty suffix list matches everything.
pub fn matches_suffix<S: AsRef<str>>(folder_name: &str, suffixes: &[S]) -> bool {
    suffixes.is_empty() || suffixes.iter().any(|suffix| folder_name.ends_with(suffix.as_ref()))
}

/// Collects the files under `root` that should receive placeholder substitution.
///
/// In recursive mode every file below `root` is considered and kept when the
/// name of its containing folder matches one of `suffixes`. Otherwise only the
/// matching immediate subdirectories of `root` are considered, and the files
/// directly inside them are returned.
///
/// Results are sorted by path.
pub fn collect_matching_files<P: AsRef<Path>, S: AsRef<str>>(
    root: P,
    recursive: bool,
    suffixes: &[S],
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::NotADirectory { path: root.display().to_string() });
    }

    let mut files = Vec::new();
    if recursive {
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let folder = entry.path().folder_name()?.unwrap_or_default();
            if matches_suffix(folder, suffixes) {
                files.push(entry.into_path());
            }
        }
    } else {
        for dir in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
            let dir = dir?;
            if !dir.file_type().is_dir() {
                continue;
            }
            let name = Path::new(dir.file_name()).to_str_checked()?;
            if !matches_suffix(name, suffixes) {
                continue;
            }
            for entry in WalkDir::new(dir.path()).min_depth(1).max_depth(1).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_dir() {
                    files.push(entry.into_path());
                }
            }
        }
    }

    log::info!("Matched {} file(s) under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (folder, file) in [
            ("servers/config-a", "one.yml"),
            ("servers/config-b", "two.yml"),
            ("servers/deep/config-a", "three.yml"),
            ("config-a", "top.yml"),
        ] {
            fs::create_dir_all(dir.path().join(folder)).unwrap();
            fs::write(dir.path().join(folder).join(file), "x").unwrap();
        }
        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn suffix_matching() {
        assert!(matches_suffix("config-a", &["-a"]));
        assert!(!matches_suffix("config-b", &["-a"]));
        assert!(matches_suffix("anything", &[] as &[&str]));
    }

    #[test]
    fn recursive_walk_matches_containing_folder() {
        let dir = tree();
        let files = collect_matching_files(dir.path(), true, &["-a"]).unwrap();
        let mut found = names(&files);
        found.sort();
        assert_eq!(found, vec!["one.yml", "three.yml", "top.yml"]);
    }

    #[test]
    fn no_suffixes_match_everything() {
        let dir = tree();
        let files = collect_matching_files(dir.path(), true, &[] as &[&str]).unwrap();
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn flat_walk_only_checks_immediate_folders() {
        let dir = tree();
        let files = collect_matching_files(dir.path(), false, &["-a"]).unwrap();
        assert_eq!(names(&files), vec!["top.yml"]);
    }

    #[test]
    fn rejects_non_directory_root() {
        let dir = tree();
        let file = dir.path().join("config-a/top.yml");
        assert!(matches!(
            collect_matching_files(&file, true, &["-a"]),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_folder_names_are_errors() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join(OsStr::from_bytes(b"bad\xff-a"));
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("one.yml"), "x").unwrap();

        for recursive in [true, false] {
            assert!(matches!(
                collect_matching_files(dir.path(), recursive, &["-a"]),
                Err(Error::InvalidUnicodePath { .. })
            ));
        }
    }
}

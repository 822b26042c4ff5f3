#![allow(dead_code)]

use mcpacker::ioutils::copy_dir_all;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub const FIXTURE: &str = "tests/fixtures/network";

/// Copies the fixture's data directory into a fresh temporary directory.
pub fn prepare_pack(fixture: &str) -> TempDir {
    let tmp_dir = tempfile::tempdir().unwrap();
    copy_dir_all(Path::new(fixture).join("pack"), tmp_dir.path()).unwrap();
    tmp_dir
}

fn relative_files(dir: &Path) -> HashSet<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect()
}

/// Prints files only present in one directory and content differences for files present in both.
pub fn print_dir_diff(actual: &Path, expected: &Path) {
    let files1 = relative_files(actual);
    let files2 = relative_files(expected);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", actual);
    println!("Expected output: {:?}", expected);

    for file in files1.difference(&files2) {
        println!("  + {:?}", file);
    }
    for file in files2.difference(&files1) {
        println!("  - {:?}", file);
    }
    for file in files1.intersection(&files2) {
        let content1 = fs::read_to_string(actual.join(file)).unwrap_or_default();
        let content2 = fs::read_to_string(expected.join(file)).unwrap_or_default();
        if content1 != content2 {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{}", content1);
            println!("  --- Expected content:\n{}", content2);
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directory trees are identical, printing a diff first if not.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    let different = dir_diff::is_different(actual, expected).unwrap();
    if different {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}

//! Filesystem helper for callers that locate their own test files.
//!
//! The engine performs no discovery of its own (registration is explicit);
//! this is a convenience for programs that map files to suites themselves.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lists every file under `base`, recursively, that satisfies `predicate`.
///
/// Traversal order is unspecified. Directories themselves are never
/// yielded; symlinks are reported as files, not followed.
pub fn files_under<P, F>(base: P, predicate: F) -> io::Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();
    collect(base.as_ref(), &mut files)?;
    files.retain(|path| predicate(path));
    Ok(files)
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn lists_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        fs::create_dir(base.join("nested")).unwrap();
        touch(&base.join("a.test.rs"));
        touch(&base.join("nested").join("b.test.rs"));
        touch(&base.join("nested").join("notes.md"));

        let mut found = files_under(base, |_| true).unwrap();
        found.sort();

        assert_eq!(found.len(), 3);
        assert!(found.contains(&base.join("nested").join("b.test.rs")));
    }

    #[test]
    fn predicate_filters_paths() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        touch(&base.join("a.test.rs"));
        touch(&base.join("readme.md"));

        let found = files_under(base, |p| {
            p.to_string_lossy().ends_with(".test.rs")
        })
        .unwrap();

        assert_eq!(found, vec![base.join("a.test.rs")]);
    }

    #[test]
    fn missing_base_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");
        assert!(files_under(&gone, |_| true).is_err());
    }
}

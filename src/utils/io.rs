//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a UTF-8 file, mapping failures to `internal.io_error`.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Replace a file's content in one step (write `<name>.tmp`, then rename).
///
/// Readers see either the old content or the new content, never a partial
/// write. The temp file is removed if the rename fails.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    write_files_atomic(&[(path, content)], operation)
}

/// Replace several files together.
///
/// Every temp file is written before any target is renamed. If one temp
/// write fails, the temps already written are removed and no target is
/// touched.
pub fn write_files_atomic(files: &[(&Path, &str)], operation: &str) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());

    for (path, content) in files {
        let tmp_path = match temp_path(path, operation) {
            Ok(tmp_path) => tmp_path,
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        };
        if let Err(e) = fs::write(&tmp_path, content) {
            discard(&staged);
            return Err(Error::internal_io(
                e.to_string(),
                Some(format!("{} (write temp {})", operation, tmp_path.display())),
            ));
        }
        staged.push((tmp_path, path));
    }

    for (index, (tmp_path, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp_path, path) {
            discard(&staged[index..]);
            return Err(Error::internal_io(
                e.to_string(),
                Some(format!("{} (rename {})", operation, path.display())),
            ));
        }
    }

    Ok(())
}

fn temp_path(path: &Path, operation: &str) -> Result<PathBuf> {
    let invalid = || {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    };
    let parent = path.parent().ok_or_else(invalid)?;
    let filename = path.file_name().ok_or_else(invalid)?;

    Ok(parent.join(format!("{}.tmp", filename.to_string_lossy())))
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp_path, _) in staged {
        let _ = fs::remove_file(tmp_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_replaces_content_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("body.html");
        fs::write(&path, "<p>old</p>").unwrap();

        write_file_atomic(&path, "<p>new</p>", "test write").unwrap();

        assert_eq!(read_file(&path, "test read").unwrap(), "<p>new</p>");
        assert!(!dir.path().join("body.html.tmp").exists());
    }

    #[test]
    fn atomic_write_into_missing_dir_is_io_error() {
        let err = write_file_atomic(Path::new("/nonexistent/dir/body.html"), "x", "test write")
            .unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn multi_file_write_touches_nothing_when_a_temp_cannot_be_written() {
        let dir = TempDir::new().unwrap();
        let title = dir.path().join("title.txt");
        fs::write(&title, "old title").unwrap();
        let unwritable = Path::new("/nonexistent/dir/body.html");

        let err = write_files_atomic(&[(&title, "new title"), (unwritable, "x")], "test write")
            .unwrap_err();

        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(fs::read_to_string(&title).unwrap(), "old title");
        assert!(!dir.path().join("title.txt.tmp").exists());
    }

    #[test]
    fn multi_file_write_replaces_every_file() {
        let dir = TempDir::new().unwrap();
        let title = dir.path().join("title.txt");
        let body = dir.path().join("body.html");
        fs::write(&title, "old").unwrap();

        write_files_atomic(&[(&title, "new"), (&body, "<p>new</p>")], "test write").unwrap();

        assert_eq!(fs::read_to_string(&title).unwrap(), "new");
        assert_eq!(fs::read_to_string(&body).unwrap(), "<p>new</p>");
        assert!(!dir.path().join("title.txt.tmp").exists());
        assert!(!dir.path().join("body.html.tmp").exists());
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_file(Path::new("/nonexistent/title.txt"), "test read").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(err.details["context"], "test read");
    }
}

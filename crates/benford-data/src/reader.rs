//! Upload discovery and loading.
//!
//! Applies the guards that run before validation: the extension allow-list
//! and the size cap. Directories are walked recursively for uploads with an
//! allowed extension.

use std::io::Read;
use std::path::{Path, PathBuf};

use benford_core::error::{BenfordError, Result};
use benford_core::formatting::format_bytes;
use benford_core::models::RawDocument;
use tracing::{debug, warn};

/// Extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".csv", ".txt"];

// ── Public API ────────────────────────────────────────────────────────────────

/// The dotted extension of `path` (`".csv"`), or `""` when it has none.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Fail with [`BenfordError::UnsupportedExtension`] unless `extension` is
/// allowed.
pub fn check_extension(extension: &str) -> Result<()> {
    if ALLOWED_EXTENSIONS.contains(&extension) {
        Ok(())
    } else {
        Err(BenfordError::UnsupportedExtension(extension.to_string()))
    }
}

/// Read the upload at `path` into a [`RawDocument`].
///
/// `extension` overrides the one derived from the file name. Files larger
/// than `max_bytes` are rejected without being read in full.
pub fn read_upload(path: &Path, extension: Option<&str>, max_bytes: u64) -> Result<RawDocument> {
    let extension = extension
        .map(str::to_string)
        .unwrap_or_else(|| file_extension(path));
    check_extension(&extension)?;

    let file_read = |source: std::io::Error| BenfordError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(file_read)?;
    let size = file.metadata().map_err(file_read)?.len();
    if size > max_bytes {
        return Err(BenfordError::FileTooLarge {
            size,
            limit: max_bytes,
        });
    }

    // The file may grow between the metadata call and the read.
    let mut data = Vec::with_capacity(size as usize);
    file.take(max_bytes + 1)
        .read_to_end(&mut data)
        .map_err(file_read)?;
    if data.len() as u64 > max_bytes {
        return Err(BenfordError::FileTooLarge {
            size: data.len() as u64,
            limit: max_bytes,
        });
    }

    debug!(
        "Read {} from {} ({})",
        format_bytes(data.len() as u64),
        path.display(),
        extension
    );
    Ok(RawDocument::new(data, extension))
}

/// Find every file under `dir` with an allowed extension, sorted by path.
pub fn find_upload_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Upload path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && ALLOWED_EXTENSIONS.contains(&file_extension(entry.path()).as_str())
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Expand each input: directories become the uploads found beneath them,
/// files are kept as given.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    inputs
        .iter()
        .flat_map(|input| {
            if input.is_dir() {
                find_upload_files(input)
            } else {
                vec![input.clone()]
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    // ── file_extension / check_extension ──────────────────────────────────────

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(Path::new("data.csv")), ".csv");
        assert_eq!(file_extension(Path::new("/tmp/a.b.txt")), ".txt");
        assert_eq!(file_extension(Path::new("README")), "");
    }

    #[test]
    fn test_check_extension() {
        assert!(check_extension(".csv").is_ok());
        assert!(check_extension(".txt").is_ok());
        let err = check_extension(".xlsx").unwrap_err();
        assert!(matches!(err, BenfordError::UnsupportedExtension(ref e) if e == ".xlsx"));
        assert!(check_extension("").is_err());
    }

    // ── read_upload ───────────────────────────────────────────────────────────

    #[test]
    fn test_read_upload_keeps_bytes_and_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "upload.csv", b"id;7_2009\na;1");

        let doc = read_upload(&path, None, 1024).unwrap();
        assert_eq!(doc.data(), b"id;7_2009\na;1");
        assert_eq!(doc.extension(), ".csv");
    }

    #[test]
    fn test_read_upload_extension_override() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "upload.dat", b"x");

        assert!(read_upload(&path, None, 1024).is_err());
        let doc = read_upload(&path, Some(".txt"), 1024).unwrap();
        assert_eq!(doc.extension(), ".txt");
    }

    #[test]
    fn test_read_upload_rejects_extension_before_reading() {
        let err = read_upload(Path::new("/does/not/exist.xlsx"), None, 1024).unwrap_err();
        assert!(matches!(err, BenfordError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_read_upload_too_large() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "big.txt", &[b'1'; 2048]);

        let err = read_upload(&path, None, 1024).unwrap_err();
        assert!(matches!(
            err,
            BenfordError::FileTooLarge {
                size: 2048,
                limit: 1024
            }
        ));
    }

    #[test]
    fn test_read_upload_at_limit_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "exact.txt", &[b'1'; 1024]);
        assert_eq!(read_upload(&path, None, 1024).unwrap().len(), 1024);
    }

    #[test]
    fn test_read_upload_missing_file() {
        let err = read_upload(Path::new("/tmp/benford-missing-xyz.txt"), None, 1024).unwrap_err();
        assert!(matches!(err, BenfordError::FileRead { .. }));
    }

    // ── find_upload_files ─────────────────────────────────────────────────────

    #[test]
    fn test_find_upload_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir_all(&sub).unwrap();
        write_file(dir.path(), "c.txt", b"x");
        write_file(dir.path(), "a.csv", b"x");
        write_file(&sub, "b.txt", b"x");
        write_file(dir.path(), "skip.json", b"{}");

        let files = find_upload_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "c.txt", "b.txt"]);
    }

    #[test]
    fn test_find_upload_files_nonexistent_path() {
        assert!(find_upload_files(Path::new("/tmp/does-not-exist-benford-xyz")).is_empty());
    }

    #[test]
    fn test_expand_inputs_mixes_files_and_dirs() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("uploads");
        std::fs::create_dir_all(&sub).unwrap();
        let inside = write_file(&sub, "one.txt", b"x");
        let single = PathBuf::from("/some/file.txt");

        let expanded = expand_inputs(&[single.clone(), sub]);
        assert_eq!(expanded, vec![single, inside]);
    }
}

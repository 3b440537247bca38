use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Content of a file read into memory
///
/// The whole file is read before any processing starts; mutation happens on
/// an in-memory copy and the file is only rewritten as a single full
/// replacement, so a failed run leaves the original untouched.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Path the content was read from
    pub path: String,
    /// File content as valid UTF-8 string
    pub content: String,
    /// Byte length of the content
    pub len: usize,
    /// BLAKE3 hash of the content (hex-encoded)
    pub checksum: String,
}

/// Error types for file operations
#[derive(Debug)]
pub enum FileError {
    NotFound(String),
    IoError(String),
    InvalidUtf8(String),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound(p) => write!(f, "File not found: {}", p),
            FileError::IoError(e) => write!(f, "I/O error: {}", e),
            FileError::InvalidUtf8(p) => write!(f, "Invalid UTF-8 in file: {}", p),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        FileError::IoError(err.to_string())
    }
}

/// Compute the hex-encoded BLAKE3 checksum of text
pub fn checksum_of(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Read a file from disk with UTF-8 validation
///
/// # Arguments
/// * `path` - Path to the file to read
///
/// # Returns
/// * `Ok(FileContent)` - File content with checksum metadata
/// * `Err(FileError)` - File not found, I/O error, or invalid UTF-8
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FileContent, FileError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(FileError::NotFound(path_ref.display().to_string()));
    }

    let bytes = fs::read(path_ref)?;

    let content = String::from_utf8(bytes)
        .map_err(|_| FileError::InvalidUtf8(path_ref.display().to_string()))?;

    let len = content.len();
    let checksum = checksum_of(&content);

    Ok(FileContent {
        path: path_ref.display().to_string(),
        content,
        len,
        checksum,
    })
}

/// Replace a file's content in full
///
/// The replacement is written to a sibling temp file and renamed over the
/// target, so the target never holds a partially written buffer: on any
/// failure the original content is still in place.
///
/// # Arguments
/// * `path` - Path of the file to replace
/// * `content` - The full replacement text
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(FileError)` on I/O failure (the original file is untouched)
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FileError> {
    let path_ref = path.as_ref();

    let mut temp_name = path_ref.as_os_str().to_os_string();
    temp_name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content.as_bytes())?;

    if let Err(e) = fs::rename(&temp_path, path_ref) {
        let _ = fs::remove_file(&temp_path);
        return Err(FileError::from(e));
    }

    Ok(())
}

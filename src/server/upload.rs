//! # Upload Staging
//!
//! Uploaded and encoded images pass through a staging directory on disk. Each
//! file is owned by a [`StagedFile`] handle and removed when the handle drops,
//! whether the request succeeded, failed, or panicked.

use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::config::UploadConfig;

/// Staging area for request files, plus the extension allow-list.
#[derive(Debug)]
pub struct UploadStore {
    directory: PathBuf,
    allowed_extensions: Vec<String>,
}

/// A temporary file inside the staging directory, deleted on drop.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl UploadStore {
    /// Create the store, making the staging directory if needed.
    pub fn new(config: &UploadConfig) -> io::Result<Self> {
        fs::create_dir_all(&config.directory)?;

        Ok(Self {
            directory: config.directory.clone(),
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// True if `filename` has an extension from the allow-list.
    pub fn is_allowed(&self, filename: &str) -> bool {
        extension(filename).is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }

    /// Write an upload to a fresh staged file that keeps the upload's extension.
    pub fn stage(&self, filename: &str, bytes: &[u8]) -> io::Result<StagedFile> {
        let suffix = extension(&secure_filename(filename))
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let mut file = tempfile::Builder::new()
            .prefix("upload_")
            .suffix(&suffix)
            .tempfile_in(&self.directory)?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!("Staged {} bytes at {}", bytes.len(), file.path().display());
        Ok(StagedFile { file })
    }

    /// Create an empty staged file for output, e.g. `reserve("png")`.
    pub fn reserve(&self, extension: &str) -> io::Result<StagedFile> {
        let file = tempfile::Builder::new()
            .prefix("encoded_")
            .suffix(&format!(".{extension}"))
            .tempfile_in(&self.directory)?;
        Ok(StagedFile { file })
    }
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(self.path())
    }
}

/// Lowercased text after the last '.', or `None` if there is no dot.
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Reduce a client-supplied filename to a safe ASCII name.
///
/// Path separators become underscores, anything other than ASCII
/// alphanumerics, `.`, `-` and `_` is dropped, and leading or trailing dots and
/// underscores are trimmed. May return an empty string.
pub fn secure_filename(filename: &str) -> String {
    let flattened = filename.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

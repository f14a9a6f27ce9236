//! Where the library keeps its documents.

use std::path::{Path, PathBuf};

pub const DEFAULT_BOOKS_FILE: &str = "books.json";
pub const DEFAULT_LOANS_FILE: &str = "loans.json";

/// Location of the two collection documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub data_dir: PathBuf,
    pub books_file: String,
    pub loans_file: String,
}

impl LibraryConfig {
    /// Uses the default document names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            books_file: DEFAULT_BOOKS_FILE.to_string(),
            loans_file: DEFAULT_LOANS_FILE.to_string(),
        }
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    pub fn loans_path(&self) -> PathBuf {
        self.data_dir.join(&self.loans_file)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Creates the data directory tree if missing.
    ///
    /// # Errors
    /// - Returns the underlying I/O error when the directory cannot be created.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}

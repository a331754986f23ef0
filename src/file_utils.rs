use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::errors::AppError;

// @module: File utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    /// Read a file fully into a string, mapping failures to [`AppError::Io`]
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, AppError> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a string to a file, creating parent directories if needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

//! Image storage for uploaded post images.
//!
//! Images live directly under the upload directory so they can be served
//! as `/image/{stored_name}`. Stored names are
//! `{unix seconds}{50 hex chars}.{extension}`, where the extension comes
//! from the detected image format rather than the uploaded filename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::RngCore;

use crate::{BbsError, Result};

/// Number of random bytes in a stored name.
const RANDOM_BYTES: usize = 25;

/// Storage for uploaded images.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    /// Upload directory.
    base_path: PathBuf,
}

impl ImageStorage {
    /// Create a new storage rooted at `base_path`, creating the directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the upload directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Save an image under a freshly generated name ending in `extension`.
    ///
    /// Returns the stored name.
    pub fn save(&self, content: &[u8], extension: &str) -> Result<String> {
        let stored_name = Self::generate_stored_name(extension);
        fs::write(self.get_file_path(&stored_name)?, content)?;
        Ok(stored_name)
    }

    /// Delete a stored image.
    ///
    /// Returns `false` if it didn't exist.
    pub fn delete(&self, stored_name: &str) -> Result<bool> {
        match fs::remove_file(self.get_file_path(stored_name)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a stored image exists.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.get_file_path(stored_name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Number of files in the upload directory.
    pub fn count(&self) -> Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.base_path)? {
            if entry?.file_type()?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Resolve a stored name to a path inside the upload directory.
    ///
    /// Names containing path separators or parent references are rejected.
    pub fn get_file_path(&self, stored_name: &str) -> Result<PathBuf> {
        if stored_name.is_empty()
            || stored_name.contains(['/', '\\'])
            || stored_name == "."
            || stored_name == ".."
        {
            return Err(BbsError::Validation(format!(
                "invalid stored name: {stored_name}"
            )));
        }
        Ok(self.base_path.join(stored_name))
    }

    /// Generate a stored name from the current time, random bytes and the
    /// given extension.
    pub fn generate_stored_name(extension: &str) -> String {
        let mut bytes = [0u8; RANDOM_BYTES];
        rand::rng().fill_bytes(&mut bytes);

        let mut name = chrono::Utc::now().timestamp().to_string();
        for b in bytes {
            name.push_str(&format!("{b:02x}"));
        }
        name.push('.');
        name.push_str(&Self::sanitize_extension(extension));
        name
    }

    /// Lowercase ASCII alphanumerics of an extension; "bin" if none remain.
    fn sanitize_extension(extension: &str) -> String {
        let ext: String = extension
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if ext.is_empty() {
            "bin".to_string()
        } else {
            ext
        }
    }
}

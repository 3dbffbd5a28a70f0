//! Document file I/O service.
//!
//! Centralizes writing the generated document so path handling, atomic
//! replacement, and backups are consistent. Responsibility ends at the
//! written file; the engine watches its configuration path itself.

use anyhow::{Context, Result};
use chrono::Local;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::karabiner::KarabinerDocument;

/// Service for persisting generated documents.
pub struct DocumentService;

impl DocumentService {
    /// Renders a document as pretty-printed JSON with a trailing newline.
    pub fn render(document: &KarabinerDocument) -> Result<String> {
        let mut text =
            serde_json::to_string_pretty(document).context("Failed to serialize document")?;
        text.push('\n');
        Ok(text)
    }

    /// Writes a document to `path`.
    ///
    /// The write is atomic (temp file + rename) so the engine never sees a
    /// half-written configuration. With `backup` set, an existing target is
    /// first copied to a timestamped `.bak` sibling.
    pub fn write(document: &KarabinerDocument, path: &Path, backup: bool) -> Result<()> {
        let content = Self::render(document)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }

        if backup && path.exists() {
            let backup_path = Self::backup_path(path);
            fs::copy(path, &backup_path).with_context(|| {
                format!("Failed to back up existing file to {}", backup_path.display())
            })?;
            debug!(backup = %backup_path.display(), "backed up existing document");
        }

        let temp_path = Self::temp_path(path);
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move document into place: {}", path.display()))?;

        debug!(path = %path.display(), "wrote document");
        Ok(())
    }

    /// Sibling path used for the atomic write.
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Timestamped sibling path for backups.
    fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(OsStr::to_os_string).unwrap_or_default();
        name.push(format!(".{}.bak", Local::now().format("%Y%m%d%H%M%S")));
        path.with_file_name(name)
    }
}

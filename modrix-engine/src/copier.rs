//! Template tree copying
//!
//! Walks a read-only template tree, mirrors it under the destination root,
//! and substitutes the placeholder mod-id token in known text formats.
//! Binary assets are copied byte-for-byte.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{EngineError, Result};
use crate::patch;
use crate::progress::ProgressSink;

/// Mod-id token every template is authored with.
pub const PLACEHOLDER_MOD_ID: &str = "modid";

/// Extensions that get placeholder substitution after copying. Everything
/// else is treated as a binary asset.
const TEXT_EXTENSIONS: &[&str] = &[
    "java", "json", "json5", "toml", "gradle", "properties", "txt", "md", "mcmeta", "cfg",
];

/// Files and directories never copied out of a template tree.
const SKIP_NAMES: &[&str] = &[
    ".git",
    ".gitignore",
    ".gitattributes",
    ".github",
    ".DS_Store",
    "LICENSE",
    "LICENSE.txt",
    "README.md",
    "README.txt",
];

/// Delete attempts before a locked directory becomes fatal.
const DELETE_ATTEMPTS: u32 = 3;

/// Fixed delay between delete attempts.
const DELETE_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Default skip predicate: VCS metadata, license and readme placeholders.
#[must_use]
pub fn default_skip(relative: &Path) -> bool {
    relative.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| SKIP_NAMES.contains(&name))
    })
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Remove a directory tree, retrying a bounded number of times with a
/// fixed delay. Directories can be transiently locked by OS file-watchers;
/// anything that survives every attempt escalates to
/// [`EngineError::DirectoryLocked`].
///
/// # Errors
///
/// Returns [`EngineError::DirectoryLocked`] after the final failed attempt.
pub fn remove_dir_all_with_retry(path: &Path, attempts: u32, delay: Duration) -> Result<()> {
    for attempt in 1..=attempts {
        if !path.exists() {
            return Ok(());
        }
        match fs::remove_dir_all(path) {
            Ok(()) => return Ok(()),
            Err(e) => {
                debug!(path = %path.display(), attempt, error = %e, "delete attempt failed");
                if attempt < attempts {
                    std::thread::sleep(delay);
                }
            }
        }
    }

    Err(EngineError::DirectoryLocked {
        path: path.to_path_buf(),
        attempts,
    })
}

/// Copy a template tree into `destination_root`, substituting the
/// placeholder mod-id token (and its uppercase form) in text files.
///
/// A pre-existing destination is deleted and recreated first. Progress is
/// reported as the fraction of files processed; callers scale it into
/// their window with [`crate::progress::SubRange`].
///
/// # Errors
///
/// Returns an error if the template root is missing, the destination
/// cannot be cleared, or any file operation fails.
pub fn copy_template(
    template_root: &Path,
    destination_root: &Path,
    mod_id: &str,
    skip: &dyn Fn(&Path) -> bool,
    progress: &dyn ProgressSink,
) -> Result<()> {
    if !template_root.is_dir() {
        return Err(EngineError::TemplateRootMissing(template_root.to_path_buf()));
    }

    if destination_root.exists() {
        info!(dest = %destination_root.display(), "clearing pre-existing destination");
        remove_dir_all_with_retry(destination_root, DELETE_ATTEMPTS, DELETE_RETRY_DELAY)?;
    }
    fs::create_dir_all(destination_root).map_err(|e| EngineError::io(destination_root, e))?;

    let files: Vec<PathBuf> = WalkDir::new(template_root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            p.strip_prefix(template_root)
                .map(|rel| !skip(rel))
                .unwrap_or(false)
        })
        .collect();

    let total = files.len();
    for (index, source) in files.iter().enumerate() {
        let relative = source
            .strip_prefix(template_root)
            .unwrap_or_else(|_| source.as_path());
        let dest = destination_root.join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| EngineError::io(parent, e))?;
        }
        fs::copy(source, &dest).map_err(|e| EngineError::io(&dest, e))?;

        // Substitution only applies to known text formats, and quietly
        // skips a text-extension file that turns out not to be UTF-8.
        if is_text_file(&dest) {
            if let Ok(content) = fs::read_to_string(&dest) {
                let substituted = patch::replace_literal_all_caps(
                    &patch::replace_literal(&content, PLACEHOLDER_MOD_ID, mod_id),
                    PLACEHOLDER_MOD_ID,
                    mod_id,
                );
                if substituted != content {
                    fs::write(&dest, substituted).map_err(|e| EngineError::io(&dest, e))?;
                }
            }
        }

        #[allow(clippy::cast_precision_loss)]
        progress.report(
            (index + 1) as f64 / total.max(1) as f64,
            &relative.display().to_string(),
        );
    }

    info!(copied = total, dest = %destination_root.display(), "template copy complete");
    Ok(())
}

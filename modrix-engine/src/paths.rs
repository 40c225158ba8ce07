//! Package path rewriting
//!
//! Template trees carry their Java sources under a fixed placeholder
//! package (`com.example`). This module maps those paths onto the target
//! package, relocates the files, rewrites package/import declarations, and
//! conservatively prunes the emptied placeholder directories.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{EngineError, Result};
use crate::patch;

/// Root package every template tree is authored under.
pub const TEMPLATE_PACKAGE: &str = "com.example";

/// Directory names that belong to template skeletons and may be removed
/// once emptied. Anything else is left alone, even when empty.
pub const PRUNABLE_SEGMENTS: &[&str] = &["com", "example", "net", "fabricmc"];

/// Convert a dotted package to its relative directory path.
#[must_use]
pub fn package_to_path(package: &str) -> PathBuf {
    package.split('.').collect()
}

/// Map a template-relative path onto the destination-relative path by
/// substituting the placeholder package segments with the target's.
///
/// Pure and deterministic; paths without the placeholder segments pass
/// through unchanged, which makes reapplication to an already-rewritten
/// tree the identity.
#[must_use]
pub fn map_template_path(relative: &Path, target_package: &str) -> PathBuf {
    let components: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    let placeholder: Vec<&str> = TEMPLATE_PACKAGE.split('.').collect();
    let Some(at) = components
        .windows(placeholder.len())
        .position(|w| w == placeholder.as_slice())
    else {
        return relative.to_path_buf();
    };

    let mut mapped = PathBuf::new();
    for segment in &components[..at] {
        mapped.push(segment);
    }
    mapped.push(package_to_path(target_package));
    for segment in &components[at + placeholder.len()..] {
        mapped.push(segment);
    }
    mapped
}

/// Move the placeholder package tree under `java_root` to the target
/// package path, rewriting in-file `package`/`import` declarations as the
/// files move, then prune the emptied placeholder directories.
///
/// A tree without the placeholder package is treated as already migrated
/// and left untouched.
///
/// # Errors
///
/// Returns an error on any filesystem failure.
pub fn relocate_package(java_root: &Path, target_package: &str) -> Result<()> {
    let old_root = java_root.join(package_to_path(TEMPLATE_PACKAGE));
    if !old_root.exists() {
        debug!(root = %java_root.display(), "no placeholder package, skipping relocation");
        return Ok(());
    }

    let new_root = java_root.join(package_to_path(target_package));
    fs::create_dir_all(&new_root).map_err(|e| EngineError::io(&new_root, e))?;

    for entry in WalkDir::new(&old_root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry
            .path()
            .strip_prefix(&old_root)
            .unwrap_or_else(|_| entry.path());
        let dest = new_root.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| EngineError::io(parent, e))?;
        }

        fs::rename(entry.path(), &dest).map_err(|e| EngineError::io(entry.path(), e))?;

        if dest.extension().is_some_and(|ext| ext == "java") {
            let content = fs::read_to_string(&dest).map_err(|e| EngineError::io(&dest, e))?;
            let rewritten = patch::replace_literal(&content, TEMPLATE_PACKAGE, target_package);
            if rewritten != content {
                fs::write(&dest, rewritten).map_err(|e| EngineError::io(&dest, e))?;
            }
        }
    }

    // Template subdirectories emptied by the move (e.g. mixin/) go first;
    // anything still holding files is left and blocks the upward prune.
    for entry in WalkDir::new(&old_root)
        .contents_first(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_dir() && e.path() != old_root)
    {
        let _ = fs::remove_dir(entry.path());
    }

    prune_template_ancestors(java_root, &old_root);
    Ok(())
}

/// Walk upward from `leaf` to (but not including) `java_root`, removing
/// each directory that is empty and whose name is in
/// [`PRUNABLE_SEGMENTS`]. Stops at the first directory that fails either
/// check.
pub fn prune_template_ancestors(java_root: &Path, leaf: &Path) {
    let mut current = leaf.to_path_buf();

    while current.starts_with(java_root) && current != java_root {
        let name_allowed = current
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| PRUNABLE_SEGMENTS.contains(&n));
        if !name_allowed {
            break;
        }

        let is_empty = fs::read_dir(&current)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if !is_empty {
            break;
        }

        debug!(dir = %current.display(), "pruning emptied template directory");
        if fs::remove_dir(&current).is_err() {
            break;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn maps_placeholder_segments_to_target_package() {
        let mapped = map_template_path(
            Path::new("src/main/java/com/example/ExampleMod.java"),
            "net.wizards.wands",
        );
        assert_eq!(
            mapped,
            Path::new("src/main/java/net/wizards/wands/ExampleMod.java")
        );
    }

    #[test]
    fn mapping_is_idempotent_on_rewritten_paths() {
        let once = map_template_path(
            Path::new("src/main/java/com/example/item/MagicWand.java"),
            "net.wizards.wands",
        );
        let twice = map_template_path(&once, "net.wizards.wands");
        assert_eq!(once, twice);
    }

    #[test]
    fn relocation_moves_sources_and_rewrites_declarations() {
        let dir = tempdir().unwrap();
        let java_root = dir.path().join("src/main/java");
        let old_pkg = java_root.join("com/example");
        fs::create_dir_all(old_pkg.join("mixin")).unwrap();
        fs::write(
            old_pkg.join("ExampleMod.java"),
            "package com.example;\n\nimport com.example.mixin.ExampleMixin;\n\npublic class ExampleMod {}\n",
        )
        .unwrap();
        fs::write(
            old_pkg.join("mixin/ExampleMixin.java"),
            "package com.example.mixin;\n\npublic class ExampleMixin {}\n",
        )
        .unwrap();

        relocate_package(&java_root, "net.wizards.wands").unwrap();

        let moved = java_root.join("net/wizards/wands/ExampleMod.java");
        let content = fs::read_to_string(&moved).unwrap();
        assert!(content.starts_with("package net.wizards.wands;"));
        assert!(content.contains("import net.wizards.wands.mixin.ExampleMixin;"));

        assert!(java_root.join("net/wizards/wands/mixin/ExampleMixin.java").exists());
        assert!(!java_root.join("com").exists());
    }

    #[test]
    fn relocation_is_a_no_op_when_already_migrated() {
        let dir = tempdir().unwrap();
        let java_root = dir.path().join("src/main/java");
        let pkg = java_root.join("net/wizards/wands");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("Mod.java"), "package net.wizards.wands;\n").unwrap();

        relocate_package(&java_root, "net.wizards.wands").unwrap();
        assert!(pkg.join("Mod.java").exists());
    }

    #[test]
    fn prune_never_touches_directories_outside_allowlist() {
        let dir = tempdir().unwrap();
        let java_root = dir.path().to_path_buf();
        let leaf = java_root.join("org/example");
        fs::create_dir_all(&leaf).unwrap();

        prune_template_ancestors(&java_root, &leaf);

        // `example` is allowlisted and empty, so it goes; `org` is not.
        assert!(!leaf.exists());
        assert!(java_root.join("org").exists());
    }

    #[test]
    fn prune_stops_at_first_non_empty_ancestor() {
        let dir = tempdir().unwrap();
        let java_root = dir.path().to_path_buf();
        let leaf = java_root.join("com/example");
        fs::create_dir_all(&leaf).unwrap();
        fs::write(java_root.join("com/Keep.java"), "keep").unwrap();

        prune_template_ancestors(&java_root, &leaf);

        assert!(!leaf.exists());
        assert!(java_root.join("com/Keep.java").exists());
    }
}

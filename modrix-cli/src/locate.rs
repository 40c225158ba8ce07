//! Locating the bundled template trees

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Environment variable overriding the template search.
pub const TEMPLATES_ENV: &str = "MODRIX_TEMPLATES";

/// Find the directory holding the `forge/`, `fabric/`, and
/// `resourcepack/` template trees.
///
/// `MODRIX_TEMPLATES` wins when set; otherwise the search walks up from
/// the installed binary and finally falls back to the repository
/// checkout for development builds.
///
/// # Errors
///
/// Fails when the override points at a non-directory or no candidate
/// exists.
pub fn templates_root() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(TEMPLATES_ENV) {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            return Ok(path);
        }
        anyhow::bail!(
            "{TEMPLATES_ENV} points at '{}', which is not a directory",
            path.display()
        );
    }

    let mut candidates = Vec::new();
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join("templates"));
            candidates.push(dir.join("../templates"));
            candidates.push(dir.join("../../templates"));
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../templates"));

    for candidate in candidates {
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("could not locate the bundled templates directory; set {TEMPLATES_ENV}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_checkout_is_found() {
        // The fallback candidate resolves inside this repository.
        let root = templates_root().unwrap();
        assert!(root.join("fabric").is_dir());
        assert!(root.join("forge").is_dir());
        assert!(root.join("resourcepack").is_dir());
    }
}

//! Build-tool integration for generated projects

use std::path::Path;
use std::process::Command;

use modrix_engine::{EngineError, ProjectDescriptor, Toolchain};
use tracing::{debug, warn};

/// Toolchain backed by the generated project's own Gradle wrapper.
pub struct GradleToolchain;

impl Toolchain for GradleToolchain {
    fn ensure_jdk(&self, _descriptor: &ProjectDescriptor) -> modrix_engine::Result<()> {
        // Gradle provisions a project JDK on first build; a missing java
        // on PATH is worth a warning but never fatal here.
        if Command::new("java").arg("-version").output().is_err() {
            warn!("no java executable found on PATH");
        }
        Ok(())
    }

    fn bootstrap_build(&self, project_root: &Path) -> modrix_engine::Result<()> {
        let wrapper = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
        let script = project_root.join(wrapper);
        if !script.is_file() {
            debug!(root = %project_root.display(), "no gradle wrapper, skipping bootstrap");
            return Ok(());
        }

        let status = Command::new(&script)
            .arg("--no-daemon")
            .arg("tasks")
            .current_dir(project_root)
            .status()
            .map_err(|e| EngineError::io(&script, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(EngineError::BootstrapFailed {
                status: status.code().unwrap_or(-1),
            })
        }
    }
}

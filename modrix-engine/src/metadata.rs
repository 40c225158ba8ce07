//! Loader-specific metadata rewriting and the project setup pipeline
//!
//! Each pass is a sequence of patch-engine calls against known files, with
//! absolute replacement values so re-running a pass over an
//! already-rewritten project changes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::copier;
use crate::error::{EngineError, Result};
use crate::patch::{self, PatchOutcome};
use crate::paths;
use crate::progress::{ProgressSink, SubRange};
use crate::project::{ModLoader, ProjectDescriptor};
use crate::templates;
use crate::versions::fabric_versions_for;

/// Name of the main mod class every template tree ships.
const TEMPLATE_MAIN_CLASS: &str = "ExampleMod";

/// Out-of-scope toolchain collaborators: JDK discovery and, for Forge,
/// the project's build-tool bootstrap.
pub trait Toolchain {
    /// Make a suitable JDK available for the project.
    ///
    /// # Errors
    ///
    /// Implementations surface provisioning failures.
    fn ensure_jdk(&self, descriptor: &ProjectDescriptor) -> Result<()>;

    /// Run the loader's build-tool bootstrap in `project_root`.
    ///
    /// # Errors
    ///
    /// A nonzero exit becomes [`EngineError::BootstrapFailed`].
    fn bootstrap_build(&self, project_root: &Path) -> Result<()>;
}

/// Toolchain that does nothing; the default for library use and tests.
pub struct NoopToolchain;

impl Toolchain for NoopToolchain {
    fn ensure_jdk(&self, _descriptor: &ProjectDescriptor) -> Result<()> {
        Ok(())
    }

    fn bootstrap_build(&self, _project_root: &Path) -> Result<()> {
        Ok(())
    }
}

/// Rewrite one structured field inside a file.
///
/// `required` call sites turn a missing anchor into a hard
/// [`EngineError::MetadataRewrite`]; optional ones tolerate template
/// drift. Multiple matches are always an error.
fn rewrite_file_field(path: &Path, pattern: &Regex, replacement: &str, required: bool) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
    match patch::rewrite_field(&content, pattern, replacement) {
        PatchOutcome::Patched(updated) => {
            if updated != content {
                fs::write(path, updated).map_err(|e| EngineError::io(path, e))?;
            }
            Ok(())
        }
        PatchOutcome::NoMatchFound if !required => {
            debug!(path = %path.display(), pattern = %pattern, "optional field absent, skipping");
            Ok(())
        }
        PatchOutcome::NoMatchFound => Err(EngineError::MetadataRewrite {
            path: path.to_path_buf(),
            reason: format!("no match for `{pattern}`"),
        }),
        PatchOutcome::AmbiguousMultipleMatches(n) => Err(EngineError::MetadataRewrite {
            path: path.to_path_buf(),
            reason: format!("{n} matches for `{pattern}`, expected one"),
        }),
    }
}

fn properties_pattern(key: &str) -> Regex {
    // Keys are fixed identifiers, never regex metacharacters.
    Regex::new(&format!(r"(?m)^{key}\s*=.*$")).expect("static key pattern")
}

fn json_string_pattern(key: &str) -> Regex {
    Regex::new(&format!(r#""{key}"\s*:\s*"[^"]*""#)).expect("static key pattern")
}

/// Rename `assets/modid/` to the project's real mod id. Looks under both
/// mod-project and resource-pack layouts; a tree already renamed is left
/// alone.
///
/// # Errors
///
/// Returns an error if the rename itself fails.
pub fn fix_assets(project_root: &Path, mod_id: &str) -> Result<()> {
    for base in ["src/main/resources/assets", "assets"] {
        let placeholder = project_root.join(base).join(copier::PLACEHOLDER_MOD_ID);
        if placeholder.is_dir() {
            let target = project_root.join(base).join(mod_id);
            fs::rename(&placeholder, &target).map_err(|e| EngineError::io(&placeholder, e))?;
            debug!(from = %placeholder.display(), to = %target.display(), "renamed asset directory");
        }
    }
    Ok(())
}

/// Rename the placeholder mixin config to `{mod_id}.mixins.json` and point
/// its `"package"` field at the real mixin package. Fabric only.
///
/// # Errors
///
/// Returns an error if the rename fails or the package field is missing.
pub fn fix_mixins(project_root: &Path, descriptor: &ProjectDescriptor) -> Result<()> {
    let resources = project_root.join("src/main/resources");
    let placeholder = resources.join(format!("{}.mixins.json", copier::PLACEHOLDER_MOD_ID));
    let target = resources.join(format!("{}.mixins.json", descriptor.mod_id));

    if placeholder.is_file() {
        fs::rename(&placeholder, &target).map_err(|e| EngineError::io(&placeholder, e))?;
    }
    if target.is_file() {
        rewrite_file_field(
            &target,
            &json_string_pattern("package"),
            &format!("\"package\": \"{}.mixin\"", descriptor.package),
            true,
        )?;
    }
    Ok(())
}

/// Forge metadata pass: `gradle.properties`, `settings.gradle`, and
/// `META-INF/mods.toml`.
///
/// # Errors
///
/// Returns an error when a required field is absent or ambiguous.
pub fn rewrite_forge_metadata(project_root: &Path, descriptor: &ProjectDescriptor) -> Result<()> {
    let properties = project_root.join("gradle.properties");
    for (key, value) in [
        ("mod_id", descriptor.mod_id.clone()),
        ("mod_name", descriptor.name.clone()),
        ("mod_group_id", descriptor.package.clone()),
        ("mod_version", descriptor.mod_version.clone()),
        ("mod_license", descriptor.license.clone()),
        ("mod_authors", descriptor.authors.clone()),
        ("mod_description", descriptor.description.clone()),
    ] {
        rewrite_file_field(
            &properties,
            &properties_pattern(key),
            &format!("{key}={value}"),
            true,
        )?;
    }

    let settings = project_root.join("settings.gradle");
    if settings.is_file() {
        rewrite_file_field(
            &settings,
            &Regex::new(r"(?m)^rootProject\.name\s*=.*$").expect("static pattern"),
            &format!("rootProject.name = '{}'", descriptor.mod_id),
            false,
        )?;
    }

    let manifest = project_root.join("src/main/resources/META-INF/mods.toml");
    rewrite_file_field(
        &manifest,
        &Regex::new(r#"(?m)^modId\s*=\s*"[^"]*""#).expect("static pattern"),
        &format!("modId=\"{}\"", descriptor.mod_id),
        true,
    )?;
    rewrite_file_field(
        &manifest,
        &Regex::new(r#"(?m)^version\s*=\s*"[^"]*""#).expect("static pattern"),
        &format!("version=\"{}\"", descriptor.mod_version),
        true,
    )?;
    rewrite_file_field(
        &manifest,
        &Regex::new(r#"(?m)^displayName\s*=\s*"[^"]*""#).expect("static pattern"),
        &format!("displayName=\"{}\"", descriptor.name),
        true,
    )?;
    rewrite_file_field(
        &manifest,
        &Regex::new(r#"(?m)^authors\s*=\s*"[^"]*""#).expect("static pattern"),
        &format!("authors=\"{}\"", descriptor.authors),
        false,
    )?;
    rewrite_file_field(
        &manifest,
        &Regex::new(r"(?s)description\s*=\s*'''.*?'''").expect("static pattern"),
        &format!("description='''\n{}\n'''", descriptor.description),
        false,
    )?;

    info!("forge metadata rewritten");
    Ok(())
}

/// Fabric metadata pass: version triplet into `gradle.properties`,
/// identity into `fabric.mod.json`.
///
/// The compatibility lookup happens before any file is touched, so an
/// unsupported Minecraft version aborts with a clean tree.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedMinecraftVersion`] for versions
/// outside the table, or a rewrite error for missing required fields.
pub fn rewrite_fabric_metadata(project_root: &Path, descriptor: &ProjectDescriptor) -> Result<()> {
    let versions = fabric_versions_for(&descriptor.minecraft_version)?;

    let properties = project_root.join("gradle.properties");
    for (key, value) in [
        ("minecraft_version", versions.minecraft.to_string()),
        ("yarn_mappings", versions.yarn_mappings.to_string()),
        ("loader_version", versions.loader_version.to_string()),
        ("fabric_version", versions.fabric_api.to_string()),
        ("maven_group", descriptor.package.clone()),
        ("archives_base_name", descriptor.mod_id.clone()),
        ("mod_version", descriptor.mod_version.clone()),
    ] {
        rewrite_file_field(
            &properties,
            &properties_pattern(key),
            &format!("{key}={value}"),
            true,
        )?;
    }

    let manifest = project_root.join("src/main/resources/fabric.mod.json");
    rewrite_file_field(
        &manifest,
        &json_string_pattern("id"),
        &format!("\"id\": \"{}\"", descriptor.mod_id),
        true,
    )?;
    rewrite_file_field(
        &manifest,
        &json_string_pattern("version"),
        &format!("\"version\": \"{}\"", descriptor.mod_version),
        true,
    )?;
    rewrite_file_field(
        &manifest,
        &json_string_pattern("name"),
        &format!("\"name\": \"{}\"", descriptor.name),
        true,
    )?;
    rewrite_file_field(
        &manifest,
        &json_string_pattern("description"),
        &format!("\"description\": \"{}\"", descriptor.description),
        false,
    )?;

    // Authors array rebuilt from the comma-separated input string.
    let quoted: Vec<String> = descriptor
        .authors
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| format!("\"{a}\""))
        .collect();
    rewrite_file_field(
        &manifest,
        &Regex::new(r#""authors"\s*:\s*\[[^\]]*\]"#).expect("static pattern"),
        &format!("\"authors\": [{}]", quoted.join(", ")),
        false,
    )?;

    // Entrypoint class references still carry the template package.
    let content = fs::read_to_string(&manifest).map_err(|e| EngineError::io(&manifest, e))?;
    let updated = patch::replace_literal(&content, paths::TEMPLATE_PACKAGE, &descriptor.package);
    if updated != content {
        fs::write(&manifest, updated).map_err(|e| EngineError::io(&manifest, e))?;
    }

    info!("fabric metadata rewritten");
    Ok(())
}

/// Resource-pack pass: `pack.mcmeta` description only.
///
/// # Errors
///
/// Returns an error if `pack.mcmeta` lacks a description field.
pub fn rewrite_pack_metadata(project_root: &Path, descriptor: &ProjectDescriptor) -> Result<()> {
    rewrite_file_field(
        &project_root.join("pack.mcmeta"),
        &json_string_pattern("description"),
        &format!("\"description\": \"{}\"", descriptor.description),
        true,
    )
}

/// Rename the template's `ExampleMod` main class to the project's own
/// class name, updating references across source and manifest files.
///
/// A tree without `ExampleMod.java` is treated as already renamed.
///
/// # Errors
///
/// Returns an error on filesystem failure.
pub fn rename_main_class(project_root: &Path, descriptor: &ProjectDescriptor) -> Result<()> {
    let class_name = descriptor.main_class_name();
    if class_name == TEMPLATE_MAIN_CLASS {
        return Ok(());
    }

    let package_dir = project_root
        .join("src/main/java")
        .join(paths::package_to_path(&descriptor.package));
    let old_file = package_dir.join(format!("{TEMPLATE_MAIN_CLASS}.java"));
    if old_file.is_file() {
        let new_file = package_dir.join(format!("{class_name}.java"));
        fs::rename(&old_file, &new_file).map_err(|e| EngineError::io(&old_file, e))?;
        debug!(class = %class_name, "renamed main class file");
    }

    for entry in WalkDir::new(project_root.join("src"))
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let is_source = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| matches!(ext, "java" | "json" | "toml"));
        if !is_source {
            continue;
        }
        if let Ok(content) = fs::read_to_string(entry.path()) {
            let updated = patch::replace_literal(&content, TEMPLATE_MAIN_CLASS, &class_name);
            if updated != content {
                fs::write(entry.path(), updated)
                    .map_err(|e| EngineError::io(entry.path(), e))?;
            }
        }
    }
    Ok(())
}

/// Full project setup pipeline.
///
/// Stages run strictly in sequence and the first failure aborts the run;
/// the caller owns best-effort cleanup of the partially created
/// destination.
pub struct ProjectCreator<'a> {
    descriptor: &'a ProjectDescriptor,
    template_root: PathBuf,
    toolchain: &'a dyn Toolchain,
}

impl<'a> ProjectCreator<'a> {
    /// Set up a creator using the template tree for the descriptor's
    /// loader under `templates_root`.
    #[must_use]
    pub fn new(
        descriptor: &'a ProjectDescriptor,
        templates_root: &Path,
        toolchain: &'a dyn Toolchain,
    ) -> Self {
        Self {
            descriptor,
            template_root: templates_root.join(descriptor.loader.template_dir()),
            toolchain,
        }
    }

    /// Run the pipeline: copy, relocate, fix assets/mixins, rewrite
    /// metadata and build files, icon, main-class rename, manifest,
    /// readme, toolchain.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure. Configuration errors (unsupported
    /// Minecraft version, missing template tree) surface before the
    /// destination is created.
    pub fn create(&self, progress: &dyn ProgressSink) -> Result<()> {
        let d = self.descriptor;
        info!(name = %d.name, loader = %d.loader, "creating project");

        // Validate configuration before any filesystem mutation.
        if d.loader == ModLoader::Fabric {
            fabric_versions_for(&d.minecraft_version)?;
        }
        if !self.template_root.is_dir() {
            return Err(EngineError::TemplateRootMissing(self.template_root.clone()));
        }

        progress.report(0.02, "Copying template");
        let copy_window = SubRange::new(progress, 0.05, 0.35);
        copier::copy_template(
            &self.template_root,
            &d.location,
            &d.mod_id,
            &copier::default_skip,
            &copy_window,
        )?;

        if d.loader != ModLoader::ResourcePack {
            progress.report(0.40, "Relocating packages");
            paths::relocate_package(&d.location.join("src/main/java"), &d.package)?;
        }

        progress.report(0.45, "Fixing assets");
        fix_assets(&d.location, &d.mod_id)?;

        if d.loader == ModLoader::Fabric {
            progress.report(0.50, "Fixing mixin configs");
            fix_mixins(&d.location, d)?;
        }

        progress.report(0.60, "Rewriting metadata");
        match d.loader {
            ModLoader::Forge => rewrite_forge_metadata(&d.location, d)?,
            ModLoader::Fabric => rewrite_fabric_metadata(&d.location, d)?,
            ModLoader::ResourcePack => rewrite_pack_metadata(&d.location, d)?,
        }

        if let Some(icon) = &d.icon {
            progress.report(0.72, "Copying icon");
            let assets = if d.loader == ModLoader::ResourcePack {
                d.location.join("assets").join(&d.mod_id)
            } else {
                d.location.join("src/main/resources/assets").join(&d.mod_id)
            };
            fs::create_dir_all(&assets).map_err(|e| EngineError::io(&assets, e))?;
            let dest = assets.join("icon.png");
            fs::copy(icon, &dest).map_err(|e| EngineError::io(icon, e))?;
        }

        if d.loader != ModLoader::ResourcePack {
            progress.report(0.78, "Renaming main class");
            rename_main_class(&d.location, d)?;
        }

        progress.report(0.84, "Writing project manifest");
        d.write_manifest(&d.location)?;

        progress.report(0.88, "Writing readme");
        self.write_readme()?;

        progress.report(0.92, "Checking JDK");
        self.toolchain.ensure_jdk(d)?;

        if d.loader == ModLoader::Forge {
            progress.report(0.96, "Bootstrapping build tool");
            self.toolchain.bootstrap_build(&d.location)?;
        }

        progress.report(1.0, "Done");
        info!(dest = %d.location.display(), "project created");
        Ok(())
    }

    fn write_readme(&self) -> Result<()> {
        let mut handlebars = handlebars::Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        let rendered = handlebars.render_template(
            templates::PROJECT_README,
            &serde_json::json!({
                "name": self.descriptor.name,
                "loader": self.descriptor.loader.to_string(),
                "minecraft_version": self.descriptor.minecraft_version,
                "package": self.descriptor.package,
                "mod_id": self.descriptor.mod_id,
            }),
        )?;
        let path = self.descriptor.location.join("README.md");
        fs::write(&path, rendered).map_err(|e| EngineError::io(&path, e))
    }
}

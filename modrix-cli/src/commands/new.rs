//! Project creation command

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use modrix_engine::generator::format_registry_name;
use modrix_engine::{ModLoader, ProgressSink, ProjectCreator, ProjectDescriptor};

use crate::locate;
use crate::toolchain::GradleToolchain;

/// Create a new mod project from a bundled template
#[derive(Args)]
pub struct NewCommand {
    /// Human-readable project name, e.g. "Magic Wands"
    name: String,

    /// Mod loader to target
    #[arg(long, default_value = "fabric")]
    loader: ModLoader,

    /// Target Minecraft version
    #[arg(long = "mc", default_value = "1.21.5")]
    minecraft_version: String,

    /// Mod identifier; derived from the name when omitted
    #[arg(long)]
    mod_id: Option<String>,

    /// Java package for generated sources; derived when omitted
    #[arg(long)]
    package: Option<String>,

    /// Destination directory; defaults to ./<mod_id>
    #[arg(long, short = 'o')]
    location: Option<PathBuf>,

    /// Icon file to copy into the project's asset tree
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Mod description for manifests
    #[arg(long, default_value = "")]
    description: String,

    /// Comma-separated author list
    #[arg(long, default_value = "")]
    authors: String,

    /// License identifier for build files and manifests
    #[arg(long, default_value = "All Rights Reserved")]
    license: String,

    /// Initial mod version
    #[arg(long, default_value = "1.0.0")]
    mod_version: String,

    /// Overwrite an existing destination without asking
    #[arg(long)]
    force: bool,
}

impl NewCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Fails on invalid identifiers, a declined overwrite, or any
    /// pipeline stage failure.
    pub fn execute(&self) -> Result<()> {
        let descriptor = self.descriptor()?;

        if descriptor.location.exists() && !self.force {
            let proceed = Confirm::new()
                .with_prompt(format!(
                    "Directory '{}' already exists and will be replaced. Continue?",
                    descriptor.location.display()
                ))
                .default(false)
                .interact()
                .context("Failed to read confirmation")?;
            if !proceed {
                anyhow::bail!("aborted; destination left untouched");
            }
        }

        let templates_root = locate::templates_root()?;

        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style(format!("{} project:", descriptor.loader)).bold(),
            style(&descriptor.name).cyan().bold()
        );
        println!();

        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green/dim} {percent:>3}% {msg}")
                .context("Failed to set progress style")?,
        );

        let creator = ProjectCreator::new(&descriptor, &templates_root, &GradleToolchain);
        let sink = BarSink(&bar);
        if let Err(err) = creator.create(&sink) {
            bar.abandon_with_message("failed");
            // Best-effort cleanup so a half-built tree does not linger.
            if descriptor.location.exists() {
                let _ = fs::remove_dir_all(&descriptor.location);
            }
            return Err(err).with_context(|| {
                format!("Failed to create project '{}'", descriptor.name)
            });
        }
        bar.finish_and_clear();

        print_success(&descriptor);
        Ok(())
    }

    fn descriptor(&self) -> Result<ProjectDescriptor> {
        let mod_id = self
            .mod_id
            .clone()
            .unwrap_or_else(|| format_registry_name(&self.name));
        if !is_valid_mod_id(&mod_id) {
            anyhow::bail!(
                "Invalid mod id: {mod_id}. Must be lowercase alphanumeric with underscores, starting with a letter"
            );
        }

        let package = self
            .package
            .clone()
            .unwrap_or_else(|| format!("com.modrix.{mod_id}"));
        if !is_valid_package(&package) {
            anyhow::bail!(
                "Invalid package: {package}. Must be dot-separated lowercase identifiers"
            );
        }

        if let Some(icon) = &self.icon {
            if !icon.is_file() {
                anyhow::bail!("Icon file not found: {}", icon.display());
            }
        }

        let location = self
            .location
            .clone()
            .unwrap_or_else(|| PathBuf::from(&mod_id));

        Ok(ProjectDescriptor {
            name: self.name.clone(),
            mod_id,
            package,
            location,
            loader: self.loader,
            minecraft_version: self.minecraft_version.clone(),
            icon: self.icon.clone(),
            description: self.description.clone(),
            authors: self.authors.clone(),
            license: self.license.clone(),
            mod_version: self.mod_version.clone(),
        })
    }
}

/// Progress sink that drives an indicatif bar.
struct BarSink<'a>(&'a ProgressBar);

impl ProgressSink for BarSink<'_> {
    fn report(&self, fraction: f64, message: &str) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let position = (fraction.clamp(0.0, 1.0) * 100.0).round() as u64;
        self.0.set_position(position);
        self.0.set_message(message.to_string());
    }
}

fn print_success(descriptor: &ProjectDescriptor) {
    println!("{}", style("✓ Project created!").green().bold());
    println!();
    println!("{}", style("Next steps:").bold());
    println!();
    println!("  {} Navigate to the project:", style("1.").cyan());
    println!(
        "     {} {}",
        style("$").dim(),
        style(format!("cd {}", descriptor.location.display())).cyan()
    );
    println!();
    if descriptor.loader == ModLoader::ResourcePack {
        println!(
            "  {} Drop textures and models under {}",
            style("2.").cyan(),
            style(format!("assets/{}/", descriptor.mod_id)).cyan()
        );
        println!();
        return;
    }
    println!("  {} Add your first item:", style("2.").cyan());
    println!(
        "     {} {}",
        style("$").dim(),
        style("modrix item \"Ruby Sword\"").cyan()
    );
    println!();
    println!("  {} Build the mod:", style("3.").cyan());
    println!("     {} {}", style("$").dim(), style("./gradlew build").cyan());
    println!();
}

/// Validate a mod identifier: `[a-z][a-z0-9_]*`.
fn is_valid_mod_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Validate a dotted Java package; each segment is `[a-z][a-z0-9_]*`.
fn is_valid_package(package: &str) -> bool {
    !package.is_empty() && package.split('.').all(is_valid_mod_id)
}

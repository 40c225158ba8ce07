//! Element record management commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use modrix_engine::{ModElement, ModElementManager};
use uuid::Uuid;

/// Manage a project's element records
#[derive(Subcommand)]
pub enum ElementsCommand {
    /// List the project's element records
    List {
        /// Project directory
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Remove an element record; generated sources stay in place
    Remove {
        /// Element id, as shown by `modrix elements list`
        id: Uuid,
        /// Project directory
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
}

impl ElementsCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Fails when the record store cannot be read or written.
    pub fn execute(&self) -> Result<()> {
        match self {
            Self::List { project } => list(project),
            Self::Remove { id, project } => remove(*id, project),
        }
    }
}

fn list(project: &Path) -> Result<()> {
    let manager = ModElementManager::new(project);
    let elements = manager
        .list()
        .with_context(|| format!("Failed to read element records at {}", project.display()))?;

    if elements.is_empty() {
        println!("No element records found.");
        return Ok(());
    }

    for element in elements {
        let kind = match &element {
            ModElement::Item(_) => "item",
        };
        println!(
            "{}  {:<6} {}",
            style(element.id()).dim(),
            kind,
            style(element.display_name()).cyan()
        );
    }
    Ok(())
}

fn remove(id: Uuid, project: &Path) -> Result<()> {
    let manager = ModElementManager::new(project);
    if manager
        .delete(id)
        .context("Failed to remove element record")?
    {
        println!("{} {id}", style("✓ Removed record").green().bold());
        println!(
            "  {}",
            style("generated sources and assets are left in place").dim()
        );
        Ok(())
    } else {
        anyhow::bail!("no element record with id {id}")
    }
}

//! Item generation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use modrix_engine::elements::FoodProperties;
use modrix_engine::{
    ItemElement, ItemGenerator, ModElement, ModElementManager, ModLoader, RegistrationStatus,
};

/// Generate an item in an existing project
#[derive(Args)]
pub struct ItemCommand {
    /// Display name of the item, e.g. "Ruby Sword"
    name: String,

    /// Project directory
    #[arg(long, default_value = ".")]
    project: PathBuf,

    /// Override loader detection
    #[arg(long)]
    loader: Option<ModLoader>,

    /// Texture file to copy into the asset tree
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Maximum stack size
    #[arg(long, default_value_t = 64)]
    stack_size: u8,

    /// Hunger points restored when eaten; makes the item edible
    #[arg(long)]
    nutrition: Option<u32>,

    /// Saturation modifier for edible items
    #[arg(long, default_value_t = 0.6)]
    saturation: f32,

    /// Render the item with an enchantment glint
    #[arg(long)]
    glint: bool,
}

impl ItemCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Fails when the project cannot be opened or generation fails.
    pub fn execute(&self) -> Result<()> {
        if let Some(texture) = &self.texture {
            if !texture.is_file() {
                anyhow::bail!("Texture file not found: {}", texture.display());
            }
        }

        let mut item = ItemElement::new(&self.name);
        item.texture = self.texture.clone();
        item.max_stack_size = self.stack_size;
        item.glint = self.glint;
        item.food = self.nutrition.map(|nutrition| FoodProperties {
            nutrition,
            saturation: self.saturation,
        });

        let generator = ItemGenerator::open(&self.project, self.loader)
            .with_context(|| format!("Failed to open project at {}", self.project.display()))?;
        let generated = generator
            .generate(&item)
            .with_context(|| format!("Failed to generate item '{}'", self.name))?;

        let manager = ModElementManager::new(&self.project);
        let record = ModElement::Item(item);
        manager
            .save(&record)
            .context("Failed to save element record")?;

        println!(
            "{} {}",
            style("✓ Generated item").green().bold(),
            style(&self.name).cyan().bold()
        );
        println!("  class     {}", style(&generated.class_name).cyan());
        println!("  registry  {}", style(&generated.registry_name).cyan());
        println!("  lang key  {}", style(&generated.lang_key).cyan());
        println!("  source    {}", generated.source_file.display());
        match generated.registration {
            RegistrationStatus::Patched => {}
            RegistrationStatus::AlreadyPresent => println!(
                "  {}",
                style("registration already present, init file unchanged").yellow()
            ),
            RegistrationStatus::AnchorMissing => println!(
                "  {}",
                style("no registration anchor found, wire the item up manually").yellow()
            ),
        }
        println!("  record    {}", style(record.id()).dim());

        Ok(())
    }
}

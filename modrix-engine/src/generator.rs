//! Mod element generation
//!
//! Turns an [`ItemElement`] description into loader-specific Java source,
//! asset files, and registry wiring inside an existing project. Patching is
//! idempotent by construction: a registry file already mentioning the new
//! class is left untouched, so re-running a generation is a no-op.

use std::fs;
use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};
use handlebars::Handlebars;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::elements::ItemElement;
use crate::error::{EngineError, Result};
use crate::patch;
use crate::paths::package_to_path;
use crate::project::{ModLoader, ProjectDescriptor};
use crate::templates;
use crate::versions::{fabric_api_generation, FabricApiGeneration};

/// Format a human-readable name as a Java class identifier.
///
/// `"Magic Wand"` becomes `"MagicWand"`.
#[must_use]
pub fn format_class_name(name: &str) -> String {
    name.to_case(Case::Pascal)
}

/// Format a human-readable name as a registration key.
///
/// `"Magic Wand"` becomes `"magic_wand"`; accidental double underscores
/// are collapsed.
#[must_use]
pub fn format_registry_name(name: &str) -> String {
    let mut key = name.to_case(Case::Snake);
    while key.contains("__") {
        key = key.replace("__", "_");
    }
    key
}

/// Determine a project's loader by sniffing its tree.
///
/// Priority: `fabric.mod.json`, then `mods.toml` Forge/NeoForge markers,
/// then `build.gradle` dependency strings, then the `modrix.config`
/// manifest.
///
/// # Errors
///
/// Returns [`EngineError::LoaderUnknown`] when nothing matches.
pub fn sniff_loader(project_path: &Path) -> Result<ModLoader> {
    if project_path.join("src/main/resources/fabric.mod.json").exists()
        || project_path.join("fabric.mod.json").exists()
    {
        return Ok(ModLoader::Fabric);
    }

    for manifest in ["src/main/resources/META-INF/mods.toml", "src/main/resources/META-INF/neoforge.mods.toml"] {
        let path = project_path.join(manifest);
        if let Ok(content) = fs::read_to_string(&path) {
            let lowered = content.to_ascii_lowercase();
            if lowered.contains("javafml") || lowered.contains("neoforge") || lowered.contains("forge") {
                return Ok(ModLoader::Forge);
            }
        }
    }

    if let Ok(gradle) = fs::read_to_string(project_path.join("build.gradle")) {
        if gradle.contains("net.minecraftforge") || gradle.contains("neoforged") {
            return Ok(ModLoader::Forge);
        }
        if gradle.contains("fabric-loom") || gradle.contains("net.fabricmc") {
            return Ok(ModLoader::Fabric);
        }
    }

    if let Ok(descriptor) = ProjectDescriptor::read_manifest(project_path) {
        return Ok(descriptor.loader);
    }

    Err(EngineError::LoaderUnknown(project_path.to_path_buf()))
}

/// How the registry/init-file patch of one generation concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// The registration call and import were spliced in.
    Patched,
    /// The init file already carries the registration call (a re-run).
    AlreadyPresent,
    /// No registration anchor was found; the init file was left alone.
    AnchorMissing,
}

/// Result of a registration splice over raw source text. Distinguishes
/// a benign re-run from an init file missing its expected anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationPatch {
    /// Updated file content with the call and import inserted.
    Patched(String),
    /// The source already carries the registration call.
    AlreadyPresent,
    /// The expected anchor was absent; nothing to write.
    AnchorMissing,
}

/// Outcome summary of one item generation.
#[derive(Debug)]
pub struct GeneratedItem {
    /// Java class name of the emitted source
    pub class_name: String,
    /// Registration key
    pub registry_name: String,
    /// Language key added to `en_us.json`
    pub lang_key: String,
    /// Path of the emitted Java source
    pub source_file: PathBuf,
    /// How the registry/init-file patch concluded
    pub registration: RegistrationStatus,
}

/// Generator for item elements against one project.
pub struct ItemGenerator {
    project: ProjectDescriptor,
    loader: ModLoader,
    handlebars: Handlebars<'static>,
}

impl ItemGenerator {
    /// Open a generator for the project at `project_path`, reading its
    /// identity from `modrix.config`. The loader comes from `loader_hint`
    /// when given, otherwise from [`sniff_loader`].
    ///
    /// # Errors
    ///
    /// Returns an error when the manifest is missing or the loader cannot
    /// be determined.
    pub fn open(project_path: &Path, loader_hint: Option<ModLoader>) -> Result<Self> {
        let project = ProjectDescriptor::read_manifest(project_path)?;
        Self::with_descriptor(project, loader_hint)
    }

    /// Build a generator from an explicit descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error when the loader is absent from both the hint and
    /// the project tree.
    pub fn with_descriptor(
        project: ProjectDescriptor,
        loader_hint: Option<ModLoader>,
    ) -> Result<Self> {
        let loader = match loader_hint {
            Some(loader) => loader,
            None => sniff_loader(&project.location)?,
        };

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        Ok(Self {
            project,
            loader,
            handlebars,
        })
    }

    /// Loader the generator resolved for the project.
    #[must_use]
    pub const fn loader(&self) -> ModLoader {
        self.loader
    }

    /// Generate the sources, assets, and registry wiring for an item.
    ///
    /// # Errors
    ///
    /// Returns an error on render or filesystem failure, or when invoked
    /// against a resource-pack project.
    pub fn generate(&self, item: &ItemElement) -> Result<GeneratedItem> {
        if self.loader == ModLoader::ResourcePack {
            return Err(EngineError::LoaderUnknown(self.project.location.clone()));
        }

        let class_name = format_class_name(&item.name);
        let registry_name = format_registry_name(&item.name);
        let constant_name = registry_name.to_uppercase();
        let lang_key = format!("item.{}.{registry_name}", self.project.mod_id);

        let context = json!({
            "package": self.project.package,
            "mod_id": self.project.mod_id,
            "class_name": class_name,
            "constant_name": constant_name,
            "registry_name": registry_name,
            "max_stack_size": item.max_stack_size,
            "glint": item.glint,
            "food": item.food,
        });

        let template = match self.loader {
            ModLoader::Forge => templates::FORGE_ITEM,
            ModLoader::Fabric => match fabric_api_generation(&self.project.minecraft_version) {
                FabricApiGeneration::Legacy => templates::FABRIC_ITEM_LEGACY,
                FabricApiGeneration::V1_19 => templates::FABRIC_ITEM_1_19,
                FabricApiGeneration::V1_21 => templates::FABRIC_ITEM_1_21,
            },
            ModLoader::ResourcePack => unreachable!(),
        };

        let item_dir = self
            .project
            .location
            .join("src/main/java")
            .join(package_to_path(&self.project.package))
            .join("item");
        fs::create_dir_all(&item_dir).map_err(|e| EngineError::io(&item_dir, e))?;

        let source_file = item_dir.join(format!("{class_name}.java"));
        let rendered = self.handlebars.render_template(template, &context)?;
        fs::write(&source_file, rendered).map_err(|e| EngineError::io(&source_file, e))?;
        info!(class = %class_name, "emitted item source");

        if self.loader == ModLoader::Forge {
            self.ensure_forge_registry(&item_dir)?;
        }

        let registration = self.patch_init_file(&class_name)?;
        self.write_assets(item, &registry_name)?;
        self.update_language_file(&lang_key, &item.name)?;

        Ok(GeneratedItem {
            class_name,
            registry_name,
            lang_key,
            source_file,
            registration,
        })
    }

    /// Render the `ModItems` deferred-register class on first use.
    fn ensure_forge_registry(&self, item_dir: &Path) -> Result<()> {
        let path = item_dir.join("ModItems.java");
        if path.exists() {
            return Ok(());
        }
        let rendered = self.handlebars.render_template(
            templates::FORGE_MOD_ITEMS,
            &json!({
                "package": self.project.package,
                "mod_id": self.project.mod_id,
            }),
        )?;
        fs::write(&path, rendered).map_err(|e| EngineError::io(&path, e))?;
        debug!("created ModItems registry class");
        Ok(())
    }

    /// Patch the loader's init file to register the new class.
    fn patch_init_file(&self, class_name: &str) -> Result<RegistrationStatus> {
        let main_file = self.find_main_class_file()?;
        let content =
            fs::read_to_string(&main_file).map_err(|e| EngineError::io(&main_file, e))?;

        let patched = match self.loader {
            ModLoader::Fabric => {
                patch_fabric_initializer(&content, &self.project.package, class_name)
            }
            ModLoader::Forge => {
                let main_class = main_file
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                patch_forge_constructor(&content, &self.project.package, main_class)
            }
            ModLoader::ResourcePack => RegistrationPatch::AnchorMissing,
        };

        match patched {
            RegistrationPatch::Patched(updated) => {
                fs::write(&main_file, updated).map_err(|e| EngineError::io(&main_file, e))?;
                info!(file = %main_file.display(), "registered item in init file");
                Ok(RegistrationStatus::Patched)
            }
            RegistrationPatch::AlreadyPresent => {
                debug!("init file already wired, skipping patch");
                Ok(RegistrationStatus::AlreadyPresent)
            }
            RegistrationPatch::AnchorMissing => {
                warn!(file = %main_file.display(), "no registration anchor, init file left unchanged");
                Ok(RegistrationStatus::AnchorMissing)
            }
        }
    }

    /// Locate the project's main mod class by its loader marker.
    fn find_main_class_file(&self) -> Result<PathBuf> {
        let package_dir = self
            .project
            .location
            .join("src/main/java")
            .join(package_to_path(&self.project.package));
        let marker = match self.loader {
            ModLoader::Fabric => "implements ModInitializer",
            _ => "@Mod(",
        };

        let entries = fs::read_dir(&package_dir).map_err(|e| EngineError::io(&package_dir, e))?;
        for entry in entries.filter_map(std::result::Result::ok) {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "java") {
                continue;
            }
            if fs::read_to_string(&path).is_ok_and(|c| c.contains(marker)) {
                return Ok(path);
            }
        }

        Err(EngineError::LoaderUnknown(self.project.location.clone()))
    }

    /// Copy the texture into the asset tree and synthesize its item model.
    fn write_assets(&self, item: &ItemElement, registry_name: &str) -> Result<()> {
        let assets = self
            .project
            .location
            .join("src/main/resources/assets")
            .join(&self.project.mod_id);

        if let Some(texture) = &item.texture {
            let texture_dir = assets.join("textures/item");
            fs::create_dir_all(&texture_dir).map_err(|e| EngineError::io(&texture_dir, e))?;
            let dest = texture_dir.join(format!("{registry_name}.png"));
            fs::copy(texture, &dest).map_err(|e| EngineError::io(texture, e))?;
        }

        let model_dir = assets.join("models/item");
        fs::create_dir_all(&model_dir).map_err(|e| EngineError::io(&model_dir, e))?;
        let model = self.handlebars.render_template(
            templates::ITEM_MODEL_JSON,
            &json!({
                "mod_id": self.project.mod_id,
                "registry_name": registry_name,
            }),
        )?;
        let model_path = model_dir.join(format!("{registry_name}.json"));
        fs::write(&model_path, model).map_err(|e| EngineError::io(&model_path, e))?;
        Ok(())
    }

    /// Add the item's display name to `en_us.json`.
    fn update_language_file(&self, lang_key: &str, display_name: &str) -> Result<()> {
        let lang_dir = self
            .project
            .location
            .join("src/main/resources/assets")
            .join(&self.project.mod_id)
            .join("lang");
        fs::create_dir_all(&lang_dir).map_err(|e| EngineError::io(&lang_dir, e))?;

        let path = lang_dir.join("en_us.json");
        let existing = fs::read_to_string(&path).unwrap_or_else(|_| "{}".to_string());
        let merged = merge_language_entry(&existing, lang_key, display_name);
        fs::write(&path, merged).map_err(|e| EngineError::io(&path, e))
    }
}

/// Splice a registration call into a Fabric `onInitialize` body, plus the
/// matching import.
///
/// The presence check anchors on the full `{class_name}.register()` call,
/// so a class name that happens to be a substring of another identifier
/// (say `MagicWand` inside a `MagicWands` main class) never reads as
/// already registered.
#[must_use]
pub fn patch_fabric_initializer(
    content: &str,
    package: &str,
    class_name: &str,
) -> RegistrationPatch {
    if content.contains(&format!("{class_name}.register()")) {
        return RegistrationPatch::AlreadyPresent;
    }

    let Some(anchor) = content.find("void onInitialize(") else {
        return RegistrationPatch::AnchorMissing;
    };
    let close = patch::find_matching_closing_brace(content, anchor);
    if close >= content.len() {
        return RegistrationPatch::AnchorMissing;
    }

    let registration = format!("    {class_name}.register();\n    ");
    let with_call = patch::insert_before_offset(content, close, &registration);

    let Some(import_at) = patch::locate_last_import_end(&with_call) else {
        return RegistrationPatch::AnchorMissing;
    };
    let import_line = format!("\nimport {package}.item.{class_name};");
    RegistrationPatch::Patched(patch::insert_before_offset(
        &with_call,
        import_at,
        &import_line,
    ))
}

/// Splice the one-time `ModItems.register` call into a Forge mod class
/// constructor.
#[must_use]
pub fn patch_forge_constructor(
    content: &str,
    package: &str,
    main_class: &str,
) -> RegistrationPatch {
    if content.contains("ModItems.register(") {
        return RegistrationPatch::AlreadyPresent;
    }

    let Some(anchor) = content.find(&format!("public {main_class}(")) else {
        return RegistrationPatch::AnchorMissing;
    };
    let close = patch::find_matching_closing_brace(content, anchor);
    if close >= content.len() {
        return RegistrationPatch::AnchorMissing;
    }

    let registration = "    ModItems.register(modEventBus);\n    ".to_string();
    let with_call = patch::insert_before_offset(content, close, &registration);

    let Some(import_at) = patch::locate_last_import_end(&with_call) else {
        return RegistrationPatch::AnchorMissing;
    };
    let import_line = format!("\nimport {package}.item.ModItems;");
    RegistrationPatch::Patched(patch::insert_before_offset(
        &with_call,
        import_at,
        &import_line,
    ))
}

/// Merge a key into a language JSON document, preferring a JSON-aware
/// merge and falling back to splicing before the final closing brace when
/// the document does not parse (hand-edited files are tolerated).
#[must_use]
pub fn merge_language_entry(content: &str, key: &str, value: &str) -> String {
    if let Ok(serde_json::Value::Object(mut map)) = serde_json::from_str(content) {
        map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        if let Ok(rendered) = serde_json::to_string_pretty(&serde_json::Value::Object(map)) {
            return rendered + "\n";
        }
    }

    // Raw splice: before the last closing brace, with a comma when the
    // object already has entries.
    let Some(close) = content.rfind('}') else {
        return format!("{{\n  \"{key}\": \"{value}\"\n}}\n");
    };
    if content.contains(&format!("\"{key}\"")) {
        return content.to_string();
    }
    let prefix_len = content[..close].trim_end().len();
    let prefix = &content[..prefix_len];
    let needs_comma = !prefix.ends_with(',') && !prefix.ends_with('{') && prefix.contains(':');
    let entry = if needs_comma {
        format!(",\n  \"{key}\": \"{value}\"\n")
    } else {
        format!("\n  \"{key}\": \"{value}\"\n")
    };
    patch::insert_before_offset(content, prefix_len, &entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FABRIC_MAIN: &str = "package net.wizards.wands;\n\nimport net.fabricmc.api.ModInitializer;\nimport org.slf4j.Logger;\n\npublic class MagicWands implements ModInitializer {\n    public static final String MOD_ID = \"wands\";\n\n    @Override\n    public void onInitialize() {\n        LOGGER.info(\"loaded\");\n    }\n}\n";

    const FORGE_MAIN: &str = "package net.wizards.wands;\n\nimport net.minecraftforge.common.MinecraftForge;\nimport net.minecraftforge.eventbus.api.IEventBus;\nimport net.minecraftforge.fml.common.Mod;\n\n@Mod(MagicWands.MOD_ID)\npublic class MagicWands {\n    public static final String MOD_ID = \"wands\";\n\n    public MagicWands(IEventBus modEventBus) {\n        MinecraftForge.EVENT_BUS.register(this);\n    }\n}\n";

    #[test]
    fn class_and_registry_name_formatting() {
        assert_eq!(format_class_name("Magic Wand"), "MagicWand");
        assert_eq!(format_registry_name("Magic Wand"), "magic_wand");
        assert_eq!(format_class_name("ruby-sword"), "RubySword");
        assert_eq!(format_registry_name("Magic  Wand"), "magic_wand");
    }

    fn expect_patched(patch: RegistrationPatch) -> String {
        match patch {
            RegistrationPatch::Patched(content) => content,
            other => panic!("expected a patched result, got {other:?}"),
        }
    }

    #[test]
    fn fabric_patch_inserts_import_and_registration_once() {
        let patched = expect_patched(patch_fabric_initializer(
            FABRIC_MAIN,
            "net.wizards.wands",
            "MagicWand",
        ));
        assert!(patched.contains("import net.wizards.wands.item.MagicWand;"));
        assert_eq!(patched.matches("MagicWand.register();").count(), 1);

        // Second application sees the registration call and declines.
        assert_eq!(
            patch_fabric_initializer(&patched, "net.wizards.wands", "MagicWand"),
            RegistrationPatch::AlreadyPresent
        );
    }

    #[test]
    fn fabric_patch_registers_class_named_like_another_identifier() {
        // Item class "MagicWand" is a substring of the main class
        // "MagicWands"; the first generation must still wire it up.
        let patched = expect_patched(patch_fabric_initializer(
            FABRIC_MAIN,
            "net.wizards.wands",
            "MagicWand",
        ));
        assert_eq!(patched.matches("MagicWand.register();").count(), 1);
        assert_eq!(patched.matches("import net.wizards.wands.item.MagicWand;").count(), 1);
    }

    #[test]
    fn fabric_patch_keeps_braces_balanced() {
        let patched = expect_patched(patch_fabric_initializer(
            FABRIC_MAIN,
            "net.wizards.wands",
            "MagicWand",
        ));
        let depth: i64 = patched
            .bytes()
            .map(|b| match b {
                b'{' => 1,
                b'}' => -1,
                _ => 0,
            })
            .sum();
        assert_eq!(depth, 0);
    }

    #[test]
    fn forge_patch_wires_mod_items_once() {
        let patched = expect_patched(patch_forge_constructor(
            FORGE_MAIN,
            "net.wizards.wands",
            "MagicWands",
        ));
        assert!(patched.contains("import net.wizards.wands.item.ModItems;"));
        assert!(patched.contains("ModItems.register(modEventBus);"));

        assert_eq!(
            patch_forge_constructor(&patched, "net.wizards.wands", "MagicWands"),
            RegistrationPatch::AlreadyPresent
        );
    }

    #[test]
    fn patches_report_missing_anchor() {
        assert_eq!(
            patch_fabric_initializer("public class X {}", "p", "Item"),
            RegistrationPatch::AnchorMissing
        );
        assert_eq!(
            patch_forge_constructor("public class X {}", "p", "X"),
            RegistrationPatch::AnchorMissing
        );
    }

    #[test]
    fn language_merge_is_json_aware() {
        let merged = merge_language_entry(
            "{\n  \"item.wands.old\": \"Old\"\n}",
            "item.wands.magic_wand",
            "Magic Wand",
        );
        let parsed: serde_json::Value = serde_json::from_str(&merged).unwrap();
        assert_eq!(parsed["item.wands.magic_wand"], "Magic Wand");
        assert_eq!(parsed["item.wands.old"], "Old");
    }

    #[test]
    fn language_merge_splices_into_malformed_json() {
        // Trailing comma keeps serde from parsing; the raw splice applies.
        let malformed = "{\n  \"item.wands.old\": \"Old\",\n}";
        let merged = merge_language_entry(malformed, "item.wands.magic_wand", "Magic Wand");
        assert!(merged.contains("\"item.wands.magic_wand\": \"Magic Wand\""));
        assert!(merged.contains("\"item.wands.old\""));
    }

    #[test]
    fn language_merge_is_idempotent() {
        let once = merge_language_entry("{}", "item.wands.magic_wand", "Magic Wand");
        let twice = merge_language_entry(&once, "item.wands.magic_wand", "Magic Wand");
        assert_eq!(once, twice);
    }
}

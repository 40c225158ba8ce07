//! End-to-end project creation against the bundled template trees.

use std::fs;
use std::path::{Path, PathBuf};

use modrix_engine::{
    ItemElement, ItemGenerator, ModLoader, NoopToolchain, NullSink, ProjectCreator,
    ProjectDescriptor, RegistrationStatus,
};
use tempfile::tempdir;

fn templates_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates")
}

fn descriptor(location: &Path, loader: ModLoader, minecraft_version: &str) -> ProjectDescriptor {
    ProjectDescriptor {
        name: "Magic Wands".to_string(),
        mod_id: "wands".to_string(),
        package: "net.wizards.wands".to_string(),
        location: location.to_path_buf(),
        loader,
        minecraft_version: minecraft_version.to_string(),
        icon: None,
        description: "Wands for everyone".to_string(),
        authors: "Alex, Sam".to_string(),
        license: "MIT".to_string(),
        mod_version: "1.0.0".to_string(),
    }
}

fn read(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

#[test]
fn fabric_project_is_fully_instantiated() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("wands");
    let d = descriptor(&dest, ModLoader::Fabric, "1.21.5");

    ProjectCreator::new(&d, &templates_root(), &NoopToolchain)
        .create(&NullSink)
        .unwrap();

    // Version table applied on top of the template's baseline.
    let props = read(dest.join("gradle.properties"));
    assert!(props.contains("minecraft_version=1.21.5\n"));
    assert!(props.contains("yarn_mappings=1.21.5+build.1\n"));
    assert!(props.contains("fabric_version=0.119.5+1.21.5\n"));
    assert!(props.contains("maven_group=net.wizards.wands\n"));
    assert!(props.contains("archives_base_name=wands\n"));

    // Manifest identity and the relocated entrypoint.
    let manifest = read(dest.join("src/main/resources/fabric.mod.json"));
    assert!(manifest.contains("\"id\": \"wands\""));
    assert!(manifest.contains("\"name\": \"Magic Wands\""));
    assert!(manifest.contains("\"authors\": [\"Alex\", \"Sam\"]"));
    assert!(manifest.contains("net.wizards.wands.MagicWands"));
    assert!(!manifest.contains("com.example"));

    // Sources moved to the target package, placeholder ancestry pruned.
    let java_root = dest.join("src/main/java");
    let main_class = java_root.join("net/wizards/wands/MagicWands.java");
    let main_content = read(&main_class);
    assert!(main_content.contains("package net.wizards.wands;"));
    assert!(main_content.contains("class MagicWands"));
    assert!(main_content.contains("MOD_ID = \"wands\""));
    let mixin = read(java_root.join("net/wizards/wands/mixin/ExampleMixin.java"));
    assert!(mixin.contains("package net.wizards.wands.mixin;"));
    assert!(!java_root.join("com").exists());

    // Mixin config renamed and repackaged.
    let mixins = read(dest.join("src/main/resources/wands.mixins.json"));
    assert!(mixins.contains("\"package\": \"net.wizards.wands.mixin\""));
    assert!(!dest.join("src/main/resources/modid.mixins.json").exists());

    // Asset namespace renamed.
    assert!(dest
        .join("src/main/resources/assets/wands/lang/en_us.json")
        .is_file());
    assert!(!dest.join("src/main/resources/assets/modid").exists());

    // Identity manifest and generated readme; template housekeeping
    // files stay behind.
    assert!(read(dest.join("modrix.config")).contains("ModId=wands\n"));
    assert!(read(dest.join("README.md")).contains("Magic Wands"));
    assert!(!dest.join("LICENSE").exists());
    assert!(!dest.join(".gitignore").exists());
}

#[test]
fn forge_project_is_fully_instantiated() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("wands");
    let d = descriptor(&dest, ModLoader::Forge, "1.20.1");

    ProjectCreator::new(&d, &templates_root(), &NoopToolchain)
        .create(&NullSink)
        .unwrap();

    let props = read(dest.join("gradle.properties"));
    assert!(props.contains("mod_id=wands\n"));
    assert!(props.contains("mod_name=Magic Wands\n"));
    assert!(props.contains("mod_group_id=net.wizards.wands\n"));
    assert!(props.contains("mod_license=MIT\n"));

    let manifest = read(dest.join("src/main/resources/META-INF/mods.toml"));
    assert!(manifest.contains("modId=\"wands\""));
    assert!(manifest.contains("displayName=\"Magic Wands\""));
    assert!(manifest.contains("[[dependencies.wands]]"));

    assert!(read(dest.join("settings.gradle")).contains("rootProject.name = 'wands'"));

    let main_content = read(dest.join("src/main/java/net/wizards/wands/MagicWands.java"));
    assert!(main_content.contains("public class MagicWands"));
    assert!(main_content.contains("public MagicWands("));
    assert!(main_content.contains("@Mod(MagicWands.MOD_ID)"));
}

#[test]
fn resource_pack_needs_no_sources() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("wands");
    let d = descriptor(&dest, ModLoader::ResourcePack, "1.21.5");

    ProjectCreator::new(&d, &templates_root(), &NoopToolchain)
        .create(&NullSink)
        .unwrap();

    assert!(read(dest.join("pack.mcmeta")).contains("\"description\": \"Wands for everyone\""));
    assert!(dest.join("assets/wands/lang/en_us.json").is_file());
    assert!(!dest.join("src").exists());
}

#[test]
fn unsupported_fabric_version_leaves_no_destination() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("wands");
    let d = descriptor(&dest, ModLoader::Fabric, "1.12.2");

    let err = ProjectCreator::new(&d, &templates_root(), &NoopToolchain)
        .create(&NullSink)
        .unwrap_err();
    assert!(matches!(
        err,
        modrix_engine::EngineError::UnsupportedMinecraftVersion { .. }
    ));
    assert!(!dest.exists());
}

#[test]
fn item_generation_wires_a_created_fabric_project() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("wands");
    let d = descriptor(&dest, ModLoader::Fabric, "1.21.5");
    ProjectCreator::new(&d, &templates_root(), &NoopToolchain)
        .create(&NullSink)
        .unwrap();

    // Loader comes from the tree itself; the manifest carries identity.
    let generator = ItemGenerator::open(&dest, None).unwrap();
    assert_eq!(generator.loader(), ModLoader::Fabric);

    let item = ItemElement::new("Ruby Sword");
    let generated = generator.generate(&item).unwrap();
    assert_eq!(generated.class_name, "RubySword");
    assert_eq!(generated.registry_name, "ruby_sword");
    assert_eq!(generated.lang_key, "item.wands.ruby_sword");
    assert_eq!(generated.registration, RegistrationStatus::Patched);

    let source = read(dest.join("src/main/java/net/wizards/wands/item/RubySword.java"));
    assert!(source.contains("package net.wizards.wands.item;"));
    assert!(source.contains("class RubySword"));

    let main_content = read(dest.join("src/main/java/net/wizards/wands/MagicWands.java"));
    assert!(main_content.contains("RubySword.register();"));
    assert!(main_content.contains("import net.wizards.wands.item.RubySword;"));

    assert!(dest
        .join("src/main/resources/assets/wands/models/item/ruby_sword.json")
        .is_file());
    let lang = read(dest.join("src/main/resources/assets/wands/lang/en_us.json"));
    assert!(lang.contains("\"item.wands.ruby_sword\": \"Ruby Sword\""));

    // A second run re-emits the source but never double-registers.
    let second = generator.generate(&item).unwrap();
    assert_eq!(second.registration, RegistrationStatus::AlreadyPresent);
    let main_content = read(dest.join("src/main/java/net/wizards/wands/MagicWands.java"));
    assert_eq!(main_content.matches("RubySword.register();").count(), 1);
}

#[test]
fn item_generation_wires_a_created_forge_project() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("wands");
    let d = descriptor(&dest, ModLoader::Forge, "1.20.1");
    ProjectCreator::new(&d, &templates_root(), &NoopToolchain)
        .create(&NullSink)
        .unwrap();

    let generator = ItemGenerator::open(&dest, None).unwrap();
    assert_eq!(generator.loader(), ModLoader::Forge);

    let generated = generator.generate(&ItemElement::new("Ruby Sword")).unwrap();
    assert_eq!(generated.registration, RegistrationStatus::Patched);

    // Deferred-register class created once, constructor wired once.
    let registry = read(dest.join("src/main/java/net/wizards/wands/item/ModItems.java"));
    assert!(registry.contains("DeferredRegister"));
    let source = read(dest.join("src/main/java/net/wizards/wands/item/RubySword.java"));
    assert!(source.contains("RUBY_SWORD = ModItems.ITEMS.register(\"ruby_sword\""));
    let main_content = read(dest.join("src/main/java/net/wizards/wands/MagicWands.java"));
    assert_eq!(main_content.matches("ModItems.register(modEventBus);").count(), 1);

    let second = generator.generate(&ItemElement::new("Ruby Sword")).unwrap();
    assert_eq!(second.registration, RegistrationStatus::AlreadyPresent);
    let main_content = read(dest.join("src/main/java/net/wizards/wands/MagicWands.java"));
    assert_eq!(main_content.matches("ModItems.register(modEventBus);").count(), 1);
}

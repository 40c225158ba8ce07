//! Project identity and the `modrix.config` manifest

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Filename of the per-project identity manifest.
pub const CONFIG_MANIFEST: &str = "modrix.config";

/// Mod-loading framework a project targets.
///
/// NeoForge projects are recognised by the loader sniffer and handled as
/// [`Self::Forge`] — the two share a template tree and registration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModLoader {
    /// Forge (and NeoForge) mod project
    Forge,
    /// Fabric mod project
    Fabric,
    /// Plain resource pack, no build files or code
    ResourcePack,
}

impl ModLoader {
    /// Directory name of the bundled template tree for this loader.
    #[must_use]
    pub const fn template_dir(self) -> &'static str {
        match self {
            Self::Forge => "forge",
            Self::Fabric => "fabric",
            Self::ResourcePack => "resourcepack",
        }
    }
}

impl fmt::Display for ModLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forge => "Forge",
            Self::Fabric => "Fabric",
            Self::ResourcePack => "ResourcePack",
        })
    }
}

impl std::str::FromStr for ModLoader {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forge" | "neoforge" => Ok(Self::Forge),
            "fabric" => Ok(Self::Fabric),
            "resourcepack" | "resource-pack" => Ok(Self::ResourcePack),
            other => Err(format!("unknown loader: {other}")),
        }
    }
}

/// User-supplied parameters for a new project.
///
/// `mod_id` and `package` are expected to arrive already sanitized
/// (`[a-z0-9_]+` and `[a-z0-9._]+` respectively); the engine substitutes
/// them verbatim and does not re-validate. `location` is the sole root for
/// every path the engine writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Human-readable project name
    pub name: String,
    /// Lowercase mod identifier
    pub mod_id: String,
    /// Dotted Java package for generated sources
    pub package: String,
    /// Destination directory for the project
    pub location: PathBuf,
    /// Target mod loader
    pub loader: ModLoader,
    /// Dotted Minecraft version string
    pub minecraft_version: String,
    /// Optional icon file to copy into the asset tree
    pub icon: Option<PathBuf>,
    /// Mod description for manifests
    pub description: String,
    /// Comma-separated author list
    pub authors: String,
    /// License identifier
    pub license: String,
    /// Mod version for build files and manifests
    pub mod_version: String,
}

impl ProjectDescriptor {
    /// Java class name for the project's main mod class.
    #[must_use]
    pub fn main_class_name(&self) -> String {
        crate::generator::format_class_name(&self.name)
    }

    /// Write the `modrix.config` identity manifest into `project_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be written.
    pub fn write_manifest(&self, project_root: &Path) -> Result<()> {
        let mut out = String::new();
        out.push_str(&format!("ModId={}\n", self.mod_id));
        out.push_str(&format!("Name={}\n", self.name));
        out.push_str(&format!("Package={}\n", self.package));
        out.push_str(&format!("ModType={}\n", self.loader));
        out.push_str(&format!("MinecraftVersion={}\n", self.minecraft_version));
        if let Some(icon) = &self.icon {
            out.push_str(&format!("IconPath={}\n", icon.display()));
        }

        let path = project_root.join(CONFIG_MANIFEST);
        fs::write(&path, out).map_err(|e| EngineError::io(path, e))
    }

    /// Reconstruct a descriptor from a project's `modrix.config`, without
    /// re-parsing loader-specific build files.
    ///
    /// Fields the manifest does not record (description, authors, license,
    /// mod version) come back empty or defaulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is missing or unreadable.
    pub fn read_manifest(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_MANIFEST);
        let raw = fs::read_to_string(&path).map_err(|e| EngineError::io(&path, e))?;

        let mut descriptor = Self {
            name: String::new(),
            mod_id: String::new(),
            package: String::new(),
            location: project_root.to_path_buf(),
            loader: ModLoader::Forge,
            minecraft_version: String::new(),
            icon: None,
            description: String::new(),
            authors: String::new(),
            license: String::new(),
            mod_version: "1.0.0".to_string(),
        };

        for line in raw.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key.trim() {
                "ModId" => descriptor.mod_id = value.trim().to_string(),
                "Name" => descriptor.name = value.trim().to_string(),
                "Package" => descriptor.package = value.trim().to_string(),
                "ModType" => {
                    if let Ok(loader) = value.trim().parse() {
                        descriptor.loader = loader;
                    }
                }
                "MinecraftVersion" => descriptor.minecraft_version = value.trim().to_string(),
                "IconPath" => descriptor.icon = Some(PathBuf::from(value.trim())),
                _ => {}
            }
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn descriptor(root: &Path) -> ProjectDescriptor {
        ProjectDescriptor {
            name: "Magic Wands".to_string(),
            mod_id: "wands".to_string(),
            package: "net.example.wands".to_string(),
            location: root.to_path_buf(),
            loader: ModLoader::Fabric,
            minecraft_version: "1.21.5".to_string(),
            icon: None,
            description: "Wands for everyone".to_string(),
            authors: "Alex, Sam".to_string(),
            license: "MIT".to_string(),
            mod_version: "1.0.0".to_string(),
        }
    }

    #[test]
    fn manifest_round_trips_identity_fields() {
        let dir = tempdir().unwrap();
        descriptor(dir.path()).write_manifest(dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join(CONFIG_MANIFEST)).unwrap();
        assert!(raw.contains("ModId=wands\n"));
        assert!(raw.contains("ModType=Fabric\n"));
        assert!(!raw.contains("IconPath="));

        let loaded = ProjectDescriptor::read_manifest(dir.path()).unwrap();
        assert_eq!(loaded.mod_id, "wands");
        assert_eq!(loaded.name, "Magic Wands");
        assert_eq!(loaded.package, "net.example.wands");
        assert_eq!(loaded.loader, ModLoader::Fabric);
        assert_eq!(loaded.minecraft_version, "1.21.5");
        assert_eq!(loaded.location, dir.path());
    }

    #[test]
    fn read_manifest_fails_without_file() {
        let dir = tempdir().unwrap();
        assert!(ProjectDescriptor::read_manifest(dir.path()).is_err());
    }

    #[test]
    fn loader_parses_neoforge_as_forge() {
        assert_eq!("NeoForge".parse::<ModLoader>().unwrap(), ModLoader::Forge);
        assert_eq!("fabric".parse::<ModLoader>().unwrap(), ModLoader::Fabric);
        assert!("quilt".parse::<ModLoader>().is_err());
    }

    #[test]
    fn main_class_name_is_pascal_cased() {
        let dir = tempdir().unwrap();
        assert_eq!(descriptor(dir.path()).main_class_name(), "MagicWands");
    }
}

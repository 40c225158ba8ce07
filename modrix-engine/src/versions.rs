//! Static loader/version compatibility tables
//!
//! Fabric projects pin a Yarn/loader/Fabric-API triplet per Minecraft
//! version. The table is a shipped constant; a version outside it is a
//! configuration error raised before any file is touched.

use crate::error::{EngineError, Result};

/// One row of the Fabric compatibility table.
#[derive(Debug, Clone, Copy)]
pub struct FabricVersions {
    /// Minecraft version the row applies to
    pub minecraft: &'static str,
    /// Matching Yarn mappings build
    pub yarn_mappings: &'static str,
    /// Fabric loader version
    pub loader_version: &'static str,
    /// Fabric API version
    pub fabric_api: &'static str,
}

/// Known-good Fabric version triplets, newest first.
const FABRIC_VERSIONS: &[FabricVersions] = &[
    FabricVersions {
        minecraft: "1.21.5",
        yarn_mappings: "1.21.5+build.1",
        loader_version: "0.16.14",
        fabric_api: "0.119.5+1.21.5",
    },
    FabricVersions {
        minecraft: "1.21.4",
        yarn_mappings: "1.21.4+build.8",
        loader_version: "0.16.14",
        fabric_api: "0.119.2+1.21.4",
    },
    FabricVersions {
        minecraft: "1.21.1",
        yarn_mappings: "1.21.1+build.3",
        loader_version: "0.16.14",
        fabric_api: "0.115.0+1.21.1",
    },
    FabricVersions {
        minecraft: "1.21",
        yarn_mappings: "1.21+build.9",
        loader_version: "0.16.14",
        fabric_api: "0.102.0+1.21",
    },
    FabricVersions {
        minecraft: "1.20.4",
        yarn_mappings: "1.20.4+build.3",
        loader_version: "0.15.11",
        fabric_api: "0.97.2+1.20.4",
    },
    FabricVersions {
        minecraft: "1.20.1",
        yarn_mappings: "1.20.1+build.10",
        loader_version: "0.15.11",
        fabric_api: "0.92.2+1.20.1",
    },
    FabricVersions {
        minecraft: "1.19.2",
        yarn_mappings: "1.19.2+build.28",
        loader_version: "0.14.24",
        fabric_api: "0.77.0+1.19.2",
    },
];

/// Look up the Fabric triplet for a Minecraft version.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedMinecraftVersion`] when the version
/// has no table entry.
pub fn fabric_versions_for(minecraft: &str) -> Result<&'static FabricVersions> {
    FABRIC_VERSIONS
        .iter()
        .find(|row| row.minecraft == minecraft)
        .ok_or_else(|| EngineError::UnsupportedMinecraftVersion {
            loader: "Fabric".to_string(),
            version: minecraft.to_string(),
        })
}

/// Fabric item-registration API generation, keyed by Minecraft version
/// range. Picks which generated-source template variant applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabricApiGeneration {
    /// Pre-1.19 `Registry.ITEM` shape
    Legacy,
    /// 1.19–1.20 `Registries.ITEM` with `Identifier` constructor
    V1_19,
    /// 1.21+ registry-key-aware `Item.Settings`
    V1_21,
}

/// Classify a Minecraft version into a Fabric API generation.
///
/// Unparseable versions fall back to the newest generation.
#[must_use]
pub fn fabric_api_generation(minecraft: &str) -> FabricApiGeneration {
    let minor = minecraft
        .split('.')
        .nth(1)
        .and_then(|m| m.parse::<u32>().ok());

    match minor {
        Some(m) if m < 19 => FabricApiGeneration::Legacy,
        Some(19 | 20) => FabricApiGeneration::V1_19,
        _ => FabricApiGeneration::V1_21,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_resolves_1_21_5() {
        let row = fabric_versions_for("1.21.5").unwrap();
        assert_eq!(row.yarn_mappings, "1.21.5+build.1");
        assert_eq!(row.fabric_api, "0.119.5+1.21.5");
    }

    #[test]
    fn unlisted_version_is_a_configuration_error() {
        let err = fabric_versions_for("1.12.2").unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnsupportedMinecraftVersion { ref version, .. } if version == "1.12.2"
        ));
    }

    #[test]
    fn api_generation_ranges() {
        assert_eq!(fabric_api_generation("1.18.2"), FabricApiGeneration::Legacy);
        assert_eq!(fabric_api_generation("1.19.2"), FabricApiGeneration::V1_19);
        assert_eq!(fabric_api_generation("1.20.1"), FabricApiGeneration::V1_19);
        assert_eq!(fabric_api_generation("1.21"), FabricApiGeneration::V1_21);
        assert_eq!(fabric_api_generation("1.21.5"), FabricApiGeneration::V1_21);
        assert_eq!(fabric_api_generation("not-a-version"), FabricApiGeneration::V1_21);
    }
}

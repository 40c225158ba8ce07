//! Per-project mod element records
//!
//! Each generated content unit is recorded as one JSON file under
//! `modrix/elements/`, tagged by a `type` discriminator. The record is the
//! bookkeeping side of generation; the Java sources it produced live in the
//! project tree and are not tracked back from the record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// Project-relative directory holding element records.
pub const ELEMENTS_DIR: &str = "modrix/elements";

/// Food behaviour for edible items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodProperties {
    /// Hunger points restored
    pub nutrition: u32,
    /// Saturation modifier
    pub saturation: f32,
}

/// A single item element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemElement {
    /// Stable identity, generated once on first save
    pub id: Uuid,
    /// Human-readable display name, e.g. "Magic Wand"
    pub name: String,
    /// User-supplied texture file to copy into the asset tree
    pub texture: Option<PathBuf>,
    /// Maximum stack size (vanilla default 64)
    pub max_stack_size: u8,
    /// Present when the item is edible
    pub food: Option<FoodProperties>,
    /// Render with an enchantment glint
    pub glint: bool,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl ItemElement {
    /// Create a new item element with vanilla defaults.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            texture: None,
            max_stack_size: 64,
            food: None,
            glint: false,
            created: Utc::now(),
        }
    }
}

/// A discrete piece of generated mod content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModElement {
    /// An item element
    Item(ItemElement),
}

impl ModElement {
    /// Stable element identity.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::Item(item) => item.id,
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Item(item) => &item.name,
        }
    }
}

/// Owner of a project's element records.
pub struct ModElementManager {
    dir: PathBuf,
}

impl ModElementManager {
    /// Manager for the elements of the project at `project_root`.
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            dir: project_root.join(ELEMENTS_DIR),
        }
    }

    /// Directory holding the element records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist an element record, creating the directory on first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&self, element: &ModElement) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| EngineError::io(&self.dir, e))?;
        let path = self.dir.join(format!("{}.json", element.id()));
        let json = serde_json::to_string_pretty(element)?;
        fs::write(&path, json).map_err(|e| EngineError::io(&path, e))?;
        debug!(element = %element.id(), "saved element record");
        Ok(())
    }

    /// Load one element record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or malformed.
    pub fn load(&self, id: Uuid) -> Result<ModElement> {
        let path = self.dir.join(format!("{id}.json"));
        let raw = fs::read_to_string(&path).map_err(|e| EngineError::io(&path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// List all element records, skipping files that fail to parse.
    ///
    /// # Errors
    ///
    /// Returns an error only on directory read failure; an absent
    /// directory means no elements yet.
    pub fn list(&self) -> Result<Vec<ModElement>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| EngineError::io(&self.dir, e))?;
        let mut elements = Vec::new();
        for entry in entries.filter_map(std::result::Result::ok) {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match fs::read_to_string(&path)
                .ok()
                .and_then(|raw| serde_json::from_str(&raw).ok())
            {
                Some(element) => elements.push(element),
                None => debug!(path = %path.display(), "skipping unreadable element record"),
            }
        }
        Ok(elements)
    }

    /// Delete an element record. Returns whether a record existed.
    ///
    /// Deletion removes the record only: Java sources and registry edits
    /// the element produced stay in the project tree and are cleaned up
    /// manually.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing record cannot be removed.
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let path = self.dir.join(format!("{id}.json"));
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| EngineError::io(&path, e))?;
        Ok(true)
    }
}

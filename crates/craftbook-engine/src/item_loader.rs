//! Item definition loading.
//!
//! An item database describes what each item is, independent of how many
//! are held or what they craft into. Documents look like:
//!
//! ```json
//! { "items": [ { "name": "cloth", "desc": "Woven fabric",
//!                "atlas": "materials", "sprite": "cloth", "action": "", "key": false } ] }
//! ```
//!
//! Every field except `name` may be omitted.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use craftbook_gameplay::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during item loading.
#[derive(Debug, Error)]
pub enum ItemLoadError {
    /// Failed to read file.
    #[error("Failed to read item file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse JSON.
    #[error("Failed to parse item JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Item has no name.
    #[error("Item {0} has empty name")]
    EmptyName(usize),

    /// Item name listed twice.
    #[error("Duplicate item: {0}")]
    DuplicateItem(String),
}

impl ItemLoadError {
    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReadError(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            Self::ReadError(_) | Self::ParseError(_) => ErrorKind::ParseError,
            Self::EmptyName(_) => ErrorKind::InvalidArgument,
            Self::DuplicateItem(_) => ErrorKind::DuplicateKey,
        }
    }
}

/// Result type for item loading operations.
pub type ItemLoadResult<T> = Result<T, ItemLoadError>;

/// Descriptive data for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemInfo {
    /// Item name, matching inventory and recipe names.
    pub name: String,
    /// Player-facing description.
    pub desc: String,
    /// Texture atlas holding the icon.
    pub atlas: String,
    /// Sprite within the atlas.
    pub sprite: String,
    /// Action triggered when the item is used.
    pub action: String,
    /// Key items are never consumed by the player directly.
    pub key: bool,
}

impl ItemInfo {
    /// Creates an entry with only a name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }
}

/// Item definitions keyed by name, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDatabase {
    items: Vec<ItemInfo>,
    by_name: HashMap<String, usize>,
}

/// On-disk shape of an item database.
#[derive(Serialize, Deserialize)]
struct ItemDocument<T> {
    #[serde(default)]
    items: T,
}

impl ItemDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an item document.
    pub fn from_json(json: &str) -> ItemLoadResult<Self> {
        let document: ItemDocument<Vec<ItemInfo>> = serde_json::from_str(json)?;
        let mut database = Self::new();
        for item in document.items {
            database.insert(item)?;
        }
        Ok(database)
    }

    /// Reads and parses an item document from disk.
    pub fn from_file(path: &Path) -> ItemLoadResult<Self> {
        debug!("Loading item file: {:?}", path);
        let database = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded {} items from {:?}", database.len(), path);
        Ok(database)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> ItemLoadResult<String> {
        let document = ItemDocument {
            items: &self.items,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Adds an item definition. Names must be non-blank and unique.
    pub fn insert(&mut self, item: ItemInfo) -> ItemLoadResult<()> {
        if item.name.trim().is_empty() {
            return Err(ItemLoadError::EmptyName(self.items.len()));
        }
        if self.by_name.contains_key(&item.name) {
            return Err(ItemLoadError::DuplicateItem(item.name));
        }
        self.by_name.insert(item.name.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Looks up an item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ItemInfo> {
        self.by_name.get(name).map(|&index| &self.items[index])
    }

    /// Returns the description of an item, if it has a non-empty one.
    #[must_use]
    pub fn description(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(|item| item.desc.as_str())
            .filter(|desc| !desc.is_empty())
    }

    /// Returns all item definitions in document order.
    pub fn items(&self) -> impl Iterator<Item = &ItemInfo> + '_ {
        self.items.iter()
    }

    /// Returns the key items.
    pub fn key_items(&self) -> impl Iterator<Item = &ItemInfo> + '_ {
        self.items.iter().filter(|item| item.key)
    }

    /// Returns the number of items defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

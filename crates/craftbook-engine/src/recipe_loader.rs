//! Recipe asset loading.
//!
//! This module provides:
//! - Parsing recipe documents from JSON
//! - Recipe validation on load
//! - Registering loaded recipes with a [`RecipeBook`]
//! - Exporting a recipe book back to the same document shape
//!
//! A recipe document looks like:
//!
//! ```json
//! { "recipes": [ { "name": "hammer", "qty": 1,
//!                  "items": [ { "name": "stone", "qty": 1 } ] } ] }
//! ```

use std::fs;
use std::path::Path;

use craftbook_gameplay::{
    CraftingError, ErrorKind, InventoryError, InventoryResult, Recipe, RecipeBook,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during recipe loading.
#[derive(Debug, Error)]
pub enum RecipeLoadError {
    /// Failed to read file.
    #[error("Failed to read recipe file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse JSON.
    #[error("Failed to parse recipe JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Validation error.
    #[error("Recipe validation error: {0}")]
    ValidationError(String),

    /// Recipe could not be registered.
    #[error("Failed to register recipe: {0}")]
    Crafting(#[from] CraftingError),
}

impl RecipeLoadError {
    /// Returns the error category.
    ///
    /// A missing file counts as `NotFound`; any other read failure is
    /// reported as a parse error since no document could be obtained.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReadError(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            Self::ReadError(_) | Self::ParseError(_) => ErrorKind::ParseError,
            Self::ValidationError(_) => ErrorKind::InvalidArgument,
            Self::Crafting(e) => e.kind(),
        }
    }
}

impl From<InventoryError> for RecipeLoadError {
    fn from(e: InventoryError) -> Self {
        Self::Crafting(e.into())
    }
}

/// Result type for recipe loading operations.
pub type RecipeLoadResult<T> = Result<T, RecipeLoadError>;

/// A recipe ingredient from file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Item name.
    pub name: String,
    /// Quantity required.
    #[serde(default = "default_qty")]
    pub qty: i64,
}

/// A recipe definition loaded from file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Output item name, also the recipe name.
    pub name: String,
    /// Output quantity.
    #[serde(default = "default_qty")]
    pub qty: i64,
    /// Required ingredients (consumed).
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

/// A missing `qty` means one, not zero, so a bare ingredient entry counts.
const fn default_qty() -> i64 {
    1
}

impl RecipeDefinition {
    /// Validates the recipe definition.
    pub fn validate(&self) -> RecipeLoadResult<()> {
        if self.name.trim().is_empty() {
            return Err(RecipeLoadError::ValidationError(
                "Recipe has empty name".to_string(),
            ));
        }

        if let Some(i) = self.items.iter().position(|item| item.name.trim().is_empty()) {
            return Err(RecipeLoadError::ValidationError(format!(
                "Recipe {} ingredient {} has empty name",
                self.name, i
            )));
        }

        Ok(())
    }

    /// Converts to a gameplay recipe, applying each item as a requirement.
    pub fn to_recipe(&self) -> InventoryResult<Recipe> {
        Recipe::with_ingredients(
            self.name.as_str(),
            self.qty,
            self.items.iter().map(|item| (item.name.as_str(), item.qty)),
        )
    }

    /// Builds a definition from a gameplay recipe.
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name().to_string(),
            qty: i64::from(recipe.amount()),
            items: recipe
                .ingredients()
                .bundles()
                .map(|bundle| ItemDefinition {
                    name: bundle.name().to_string(),
                    qty: i64::from(bundle.amount()),
                })
                .collect(),
        }
    }
}

/// A collection of recipes from a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFile {
    /// Recipes in this document.
    pub recipes: Vec<RecipeDefinition>,
}

impl RecipeFile {
    /// Parses a recipe document.
    pub fn from_json(json: &str) -> RecipeLoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> RecipeLoadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Captures every recipe of a book, in registration order.
    #[must_use]
    pub fn from_book(book: &RecipeBook) -> Self {
        Self {
            recipes: book.recipes().map(RecipeDefinition::from_recipe).collect(),
        }
    }

    /// Registers every recipe with `book`.
    ///
    /// Stops at the first invalid or duplicate recipe; recipes registered
    /// before it stay registered. Returns the number registered.
    pub fn register_with(&self, book: &mut RecipeBook) -> RecipeLoadResult<usize> {
        for definition in &self.recipes {
            definition.validate()?;
            book.add(definition.to_recipe()?)?;
        }
        Ok(self.recipes.len())
    }
}

/// Parses a recipe document and registers its recipes with `book`.
pub fn load_into(book: &mut RecipeBook, json: &str) -> RecipeLoadResult<usize> {
    RecipeFile::from_json(json)?.register_with(book)
}

/// Statistics for the recipe loader.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecipeLoaderStats {
    /// Number of documents loaded.
    pub files_loaded: u32,
    /// Number of recipes loaded.
    pub recipes_loaded: u32,
}

/// Recipe loader that keeps track of what it has loaded.
#[derive(Debug, Default)]
pub struct RecipeLoader {
    /// Statistics.
    stats: RecipeLoaderStats,
}

impl RecipeLoader {
    /// Creates a new recipe loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns loader statistics.
    #[must_use]
    pub fn stats(&self) -> &RecipeLoaderStats {
        &self.stats
    }

    /// Loads recipes from a JSON string into `book`.
    ///
    /// `recipes_loaded` counts every recipe that ends up in the book, including
    /// those registered before a failing entry. `files_loaded` counts only
    /// documents that loaded completely.
    pub fn load_str(&mut self, json: &str, book: &mut RecipeBook) -> RecipeLoadResult<usize> {
        let before = book.len();
        let result = load_into(book, json);

        let registered = book.len().saturating_sub(before);
        self.stats.recipes_loaded = self
            .stats
            .recipes_loaded
            .saturating_add(u32::try_from(registered).unwrap_or(u32::MAX));

        let count = result?;
        self.stats.files_loaded += 1;
        Ok(count)
    }

    /// Loads recipes from a JSON file into `book`.
    pub fn load_file(&mut self, path: &Path, book: &mut RecipeBook) -> RecipeLoadResult<usize> {
        debug!("Loading recipe file: {:?}", path);

        let content = fs::read_to_string(path)?;
        let count = self.load_str(&content, book)?;

        info!("Loaded {} recipes from {:?}", count, path);
        Ok(count)
    }
}

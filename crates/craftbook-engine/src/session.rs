//! Crafting session.
//!
//! Drives a [`RecipeBook`] and an [`Inventory`] through a sequence of crafts
//! and keeps a plain-text report of what happened: the craftable recipes and
//! the inventory contents before the first craft and after each one.
//! With an [`ItemDatabase`] attached, inventory lines carry item descriptions.

use craftbook_gameplay::{
    CraftingError, CraftingResult, ErrorKind, Inventory, InventoryError, InventoryResult,
    ItemBundle, RecipeBook,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::item_loader::{ItemDatabase, ItemLoadError};
use crate::recipe_loader::{RecipeLoadError, RecipeLoader};

/// Underline used for report section titles.
const SECTION_RULE: &str = "==================";

/// Errors that can occur while setting up or running a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Recipes could not be loaded.
    #[error(transparent)]
    Load(#[from] RecipeLoadError),
    /// A recipe could not be registered or crafted.
    #[error(transparent)]
    Crafting(#[from] CraftingError),
    /// The starting inventory is invalid.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    /// Item descriptions could not be loaded.
    #[error(transparent)]
    Items(#[from] ItemLoadError),
}

impl SessionError {
    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load(e) => e.kind(),
            Self::Crafting(e) => e.kind(),
            Self::Inventory(e) => e.kind(),
            Self::Items(e) => e.kind(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Builds the built-in demo recipes.
pub fn demo_recipes() -> CraftingResult<RecipeBook> {
    let mut book = RecipeBook::new();

    book.create("flag", 1)?
        .require("cloth", 1)?
        .require("stick", 1)?;

    book.create("hammer", 1)?
        .require("stone", 1)?
        .require("stick", 1)?;

    book.create("heavy hammer", 1)?
        .require("stone", 1)?
        .require("hammer", 1)?;

    book.create("answer", 1)?
        .require("keyboard", 1)?
        .require("dedication", 10)?
        .require("code", 5)?;

    Ok(book)
}

/// A recipe book and an inventory owned by one crafter.
#[derive(Debug, Default)]
pub struct CraftingSession {
    book: RecipeBook,
    inventory: Inventory,
    items: Option<ItemDatabase>,
    report: String,
}

impl CraftingSession {
    /// Creates a session over the given recipes and inventory.
    #[must_use]
    pub fn new(book: RecipeBook, inventory: Inventory) -> Self {
        Self {
            book,
            inventory,
            items: None,
            report: String::new(),
        }
    }

    /// Attaches item descriptions to the inventory report.
    #[must_use]
    pub fn with_items(mut self, items: ItemDatabase) -> Self {
        self.items = Some(items);
        self
    }

    /// Creates a session from configuration.
    ///
    /// Recipes come from `config.recipe_file` when set, otherwise from
    /// [`demo_recipes`]. Item descriptions are loaded from `config.item_file`
    /// when set.
    pub fn from_config(config: &EngineConfig) -> SessionResult<Self> {
        let book = match &config.recipe_file {
            Some(path) => {
                let mut book = RecipeBook::new();
                RecipeLoader::new().load_file(path, &mut book)?;
                book
            },
            None => {
                debug!("No recipe file configured, using demo recipes");
                demo_recipes()?
            },
        };

        let inventory = Inventory::from_amounts(
            config
                .starting_items
                .iter()
                .map(|item| (item.name.as_str(), item.amount)),
        )?;

        let session = Self::new(book, inventory);
        match &config.item_file {
            Some(path) => Ok(session.with_items(ItemDatabase::from_file(path)?)),
            None => Ok(session),
        }
    }

    /// Returns the recipe book.
    #[must_use]
    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    /// Returns the attached item descriptions, if any.
    #[must_use]
    pub fn items(&self) -> Option<&ItemDatabase> {
        self.items.as_ref()
    }

    /// Returns the current inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Sets the amount of an item in the inventory.
    pub fn set_amount(&mut self, item: &str, amount: i64) -> InventoryResult<()> {
        self.inventory.set_amount(item, amount)
    }

    /// Returns the report accumulated so far.
    #[must_use]
    pub fn report(&self) -> &str {
        &self.report
    }

    /// Takes the accumulated report, leaving an empty one behind.
    pub fn take_report(&mut self) -> String {
        std::mem::take(&mut self.report)
    }

    /// Appends the recipes that can currently be crafted to the report.
    pub fn log_craftable_recipes(&mut self) {
        let entries: Vec<String> = self
            .book
            .craftable_recipes(&self.inventory)
            .map(ToString::to_string)
            .collect();
        debug!("{} craftable recipes", entries.len());
        self.section("Craftable Recipes", &entries);
    }

    /// Appends the inventory contents to the report.
    pub fn log_inventory(&mut self) {
        let entries: Vec<String> = self
            .inventory
            .bundles()
            .map(|bundle| {
                match self
                    .items
                    .as_ref()
                    .and_then(|items| items.description(bundle.name()))
                {
                    Some(desc) => format!("{bundle} - {desc}"),
                    None => bundle.to_string(),
                }
            })
            .collect();
        debug!("Inventory: {}", self.inventory);
        self.section("Inventory Contents", &entries);
    }

    /// Crafts a recipe into the session inventory and reports the result.
    pub fn craft(&mut self, item: &str) -> CraftingResult<ItemBundle> {
        info!("Crafting {}", item);
        self.line(&format!("Crafting {item}"));
        self.line("");

        let output = self.book.craft(item, &mut self.inventory)?;

        self.log_inventory();
        self.log_craftable_recipes();
        Ok(output)
    }

    /// Reports the starting state, then crafts each recipe in order.
    ///
    /// Stops at the first failed craft. The report keeps everything written
    /// up to that point.
    pub fn run<I, S>(&mut self, sequence: I) -> CraftingResult<Vec<ItemBundle>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.log_craftable_recipes();
        self.log_inventory();

        sequence
            .into_iter()
            .map(|item| self.craft(item.as_ref()))
            .collect()
    }

    fn section(&mut self, title: &str, entries: &[String]) {
        self.line(title);
        self.line(SECTION_RULE);
        for entry in entries {
            self.line(&format!("  {entry}"));
        }
        self.line("");
    }

    fn line(&mut self, text: &str) {
        self.report.push_str(text);
        self.report.push('\n');
    }
}

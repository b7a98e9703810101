//! Crafting system: recipes and the recipe book.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bundle::ItemBundle;
use crate::error::ErrorKind;
use crate::inventory::{Inventory, InventoryError, InventoryResult};

/// Crafting error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftingError {
    /// Recipe not found
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
    /// Recipe name already registered
    #[error("Duplicate recipe: {0}")]
    DuplicateRecipe(String),
    /// Inventory error
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),
}

impl CraftingError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RecipeNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateRecipe(_) => ErrorKind::DuplicateKey,
            Self::Inventory(e) => e.kind(),
        }
    }
}

/// Result type for crafting operations.
pub type CraftingResult<T> = Result<T, CraftingError>;

/// A crafting recipe: the ingredients consumed and the bundle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Output item and quantity
    output: ItemBundle,
    /// Required ingredients (consumed)
    ingredients: Inventory,
}

impl Recipe {
    /// Creates a recipe producing `amount` of `item` with no ingredients yet.
    pub fn new(item: impl Into<String>, amount: i64) -> InventoryResult<Self> {
        Ok(Self {
            output: ItemBundle::new(item, amount)?,
            ingredients: Inventory::new(),
        })
    }

    /// Creates a recipe producing a single `item`.
    #[must_use]
    pub fn single(item: impl Into<String>) -> Self {
        Self {
            output: ItemBundle::with_count(item, 1),
            ingredients: Inventory::new(),
        }
    }

    /// Creates a recipe from an ordered list of `(ingredient, quantity)`
    /// requirements.
    pub fn with_ingredients<I, S>(
        item: impl Into<String>,
        amount: i64,
        ingredients: I,
    ) -> InventoryResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut recipe = Self::new(item, amount)?;
        for (ingredient, quantity) in ingredients {
            recipe.require(ingredient.as_ref(), quantity)?;
        }
        Ok(recipe)
    }

    /// Adds an ingredient requirement, or raises an existing one.
    pub fn require(&mut self, item: &str, amount: i64) -> InventoryResult<&mut Self> {
        self.ingredients.change_amount(item, amount)?;
        Ok(self)
    }

    /// Returns the output item name, which is also the recipe name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.output.name()
    }

    /// Returns the output quantity.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.output.amount()
    }

    /// Returns the output bundle.
    #[must_use]
    pub const fn output(&self) -> &ItemBundle {
        &self.output
    }

    /// Returns the required ingredients.
    #[must_use]
    pub const fn ingredients(&self) -> &Inventory {
        &self.ingredients
    }

    /// Checks if `available` holds every ingredient.
    #[must_use]
    pub fn can_craft(&self, available: &Inventory) -> bool {
        available.contains(&self.ingredients)
    }

    /// Consumes the ingredients from `available` and returns the output.
    ///
    /// The output is not added anywhere; the caller decides where it goes.
    pub fn craft(&self, available: &mut Inventory) -> InventoryResult<ItemBundle> {
        available.remove_all(&self.ingredients)?;
        Ok(self.output.clone())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.output, self.ingredients)
    }
}

/// Registry of all known recipes, keyed by output name.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    /// Recipes by name
    recipes: HashMap<String, Recipe>,
    /// Recipe names in registration order
    order: Vec<String>,
}

impl RecipeBook {
    /// Creates an empty recipe book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no recipes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Checks if a recipe name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    /// Registers a recipe and returns it for further `require` calls.
    pub fn add(&mut self, recipe: Recipe) -> CraftingResult<&mut Recipe> {
        match self.recipes.entry(recipe.name().to_string()) {
            Entry::Occupied(entry) => Err(CraftingError::DuplicateRecipe(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!("Registered recipe: {}", entry.key());
                self.order.push(entry.key().clone());
                Ok(entry.insert(recipe))
            },
        }
    }

    /// Creates and registers an empty recipe producing `amount` of `item`.
    pub fn create(&mut self, item: &str, amount: i64) -> CraftingResult<&mut Recipe> {
        if self.contains(item) {
            return Err(CraftingError::DuplicateRecipe(item.to_string()));
        }
        self.add(Recipe::new(item, amount)?)
    }

    /// Gets a recipe by name.
    pub fn get(&self, name: &str) -> CraftingResult<&Recipe> {
        self.recipes
            .get(name)
            .ok_or_else(|| CraftingError::RecipeNotFound(name.to_string()))
    }

    /// Returns all registered recipes in registration order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> + '_ {
        self.order.iter().filter_map(|name| self.recipes.get(name))
    }

    /// Finds recipes that can be crafted with the given inventory.
    ///
    /// Each call performs a fresh scan.
    pub fn craftable_recipes<'a>(
        &'a self,
        available: &'a Inventory,
    ) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes()
            .filter(move |recipe| recipe.can_craft(available))
    }

    /// Checks if the named recipe can be crafted with the given inventory.
    pub fn can_craft(&self, name: &str, inventory: &Inventory) -> CraftingResult<bool> {
        Ok(self.get(name)?.can_craft(inventory))
    }

    /// Crafts the named recipe: consumes its ingredients from `inventory`
    /// and adds the output back to the same inventory.
    ///
    /// Returns the bundle that was produced. On failure the inventory is not
    /// touched, neither its amounts nor its order.
    pub fn craft(&self, name: &str, inventory: &mut Inventory) -> CraftingResult<ItemBundle> {
        let recipe = self.get(name)?;

        if recipe.can_craft(inventory) && !Self::has_room_for_output(recipe, inventory) {
            warn!("No room for {} in inventory", recipe.output());
            return Err(InventoryError::Overflow {
                item: recipe.name().to_string(),
            }
            .into());
        }

        let output = recipe.craft(inventory)?;
        inventory.add_item(&output)?;

        info!("Crafted {}", output);
        Ok(output)
    }

    /// Checks the output still fits once the ingredients are consumed.
    /// The output may be one of its own ingredients.
    fn has_room_for_output(recipe: &Recipe, inventory: &Inventory) -> bool {
        let held = inventory
            .amount(recipe.name())
            .saturating_sub(recipe.ingredients().amount(recipe.name()));
        held.checked_add(recipe.amount()).is_some()
    }
}

//! # Craftbook Gameplay
//!
//! Crafting and inventory bookkeeping for Craftbook.
//!
//! This crate provides the data model every other part of the workspace
//! builds on:
//! - Item bundles (a named item and its quantity)
//! - Inventory system (item quantities with a non-negative invariant)
//! - Recipes (ingredients consumed, one output produced)
//! - Recipe book (registration, craftable queries, craft-by-name)
//! - Error categories shared by all of the above

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod bundle;
pub mod crafting;
pub mod error;
pub mod inventory;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bundle::*;
    pub use crate::crafting::*;
    pub use crate::error::*;
    pub use crate::inventory::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_add_remove() {
        let mut inv = Inventory::new();

        assert!(inv.change_amount("stone", 5).is_ok());
        assert_eq!(inv.amount("stone"), 5);

        assert!(inv.change_amount("stone", -3).is_ok());
        assert_eq!(inv.amount("stone"), 2);
    }

    #[test]
    fn test_craft_into_separate_inventory() {
        let recipe = Recipe::with_ingredients("flag", 1, [("cloth", 1), ("stick", 1)])
            .expect("valid recipe");

        let mut workbench = Inventory::from_amounts([("cloth", 1), ("stick", 1)])
            .expect("valid amounts");
        let mut backpack = Inventory::new();

        let output = recipe.craft(&mut workbench).expect("craft");
        backpack.add_item(&output).expect("store");

        assert!(workbench.is_empty());
        assert_eq!(backpack.amount("flag"), 1);
    }

    #[test]
    fn test_error_kinds() {
        let not_found = CraftingError::RecipeNotFound("sword".to_string());
        let negative: CraftingError = InventoryError::NegativeAmount {
            item: "stone".to_string(),
            amount: -1,
        }
        .into();

        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(negative.kind(), ErrorKind::InvalidArgument);
    }
}

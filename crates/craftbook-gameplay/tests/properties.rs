//! Property-based tests for inventory and crafting invariants.

use craftbook_gameplay::prelude::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

const ITEMS: &[&str] = &["cloth", "stick", "stone", "hammer", "rope"];

fn arb_item() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(ITEMS)
}

/// Generate an inventory holding a subset of `ITEMS`.
fn arb_inventory() -> impl Strategy<Value = Inventory> {
    proptest::collection::vec((arb_item(), 0..20i64), 0..8).prop_map(|amounts| {
        let mut inventory = Inventory::new();
        for (item, amount) in amounts {
            inventory.set_amount(item, amount).expect("non-negative amount");
        }
        inventory
    })
}

/// Generate a recipe whose output is not among its ingredients.
fn arb_recipe() -> impl Strategy<Value = Recipe> {
    (
        1..4i64,
        proptest::collection::vec((arb_item(), 1..5i64), 0..4),
    )
        .prop_map(|(amount, ingredients)| {
            Recipe::with_ingredients("widget", amount, ingredients).expect("valid recipe")
        })
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// set(x, a) then change(x, b - a) leaves exactly b.
    #[test]
    fn set_then_change_reaches_target(a in 0..1000i64, b in 0..1000i64) {
        let mut inventory = Inventory::new();
        inventory.set_amount("stone", a).expect("set");
        inventory.change_amount("stone", b - a).expect("change");
        prop_assert_eq!(i64::from(inventory.amount("stone")), b);
    }

    /// Changing below zero fails and leaves the amount alone.
    #[test]
    fn change_below_zero_fails(a in 0..1000i64, extra in 1..1000i64) {
        let mut inventory = Inventory::new();
        inventory.set_amount("stone", a).expect("set");
        let result = inventory.change_amount("stone", -(a + extra));
        prop_assert!(result.is_err());
        prop_assert_eq!(
            result.expect_err("negative").kind(),
            ErrorKind::InvalidArgument
        );
        prop_assert_eq!(i64::from(inventory.amount("stone")), a);
    }

    /// set(x, 0) behaves like remove(x).
    #[test]
    fn set_zero_is_remove(inventory in arb_inventory(), item in arb_item()) {
        let mut by_set = inventory.clone();
        let mut by_remove = inventory;
        by_set.set_amount(item, 0).expect("set zero");
        by_remove.remove(item);

        prop_assert_eq!(by_set.amount(item), 0);
        prop_assert!(by_set.bundles().all(|b| b.name() != item));
        prop_assert_eq!(by_set, by_remove);
    }

    /// No bundle with amount zero is ever enumerated.
    #[test]
    fn no_empty_bundles(inventory in arb_inventory()) {
        prop_assert!(inventory.bundles().all(|b| !b.is_empty()));
    }

    /// Every inventory contains itself.
    #[test]
    fn contains_is_reflexive(inventory in arb_inventory()) {
        prop_assert!(inventory.contains(&inventory));
    }

    /// remove_all followed by adding the same bundles restores the original.
    #[test]
    fn remove_all_then_add_round_trips(inventory in arb_inventory(), take in arb_inventory()) {
        let mut working = inventory.clone();
        if working.remove_all(&take).is_ok() {
            working.add_all(&take).expect("add back");
            prop_assert_eq!(working, inventory);
        } else {
            prop_assert!(!inventory.contains(&take));
            prop_assert_eq!(working, inventory);
        }
    }

    /// Crafting either succeeds exactly when the recipe is craftable or
    /// leaves the inventory untouched.
    #[test]
    fn craft_is_all_or_nothing(inventory in arb_inventory(), recipe in arb_recipe()) {
        let mut book = RecipeBook::new();
        book.add(recipe.clone()).expect("register");

        let craftable = recipe.can_craft(&inventory);
        let mut working = inventory.clone();
        let result = book.craft("widget", &mut working);

        prop_assert_eq!(result.is_ok(), craftable);
        if craftable {
            prop_assert_eq!(working.amount("widget"), inventory.amount("widget") + recipe.amount());
            for ingredient in recipe.ingredients().bundles() {
                prop_assert_eq!(
                    working.amount(ingredient.name()),
                    inventory.amount(ingredient.name()) - ingredient.amount()
                );
            }
        } else {
            prop_assert_eq!(working, inventory);
        }
    }
}

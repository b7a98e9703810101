//! Inventory system.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::bundle::ItemBundle;
use crate::error::ErrorKind;

/// Inventory error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// An amount would drop below zero
    #[error("Negative amount for {item}: {amount}")]
    NegativeAmount {
        /// Item being changed
        item: String,
        /// Rejected amount
        amount: i64,
    },
    /// An amount would not fit in a bundle
    #[error("Amount overflow for {item}")]
    Overflow {
        /// Item being changed
        item: String,
    },
    /// Not every requested item is present in sufficient quantity
    #[error("Not enough items: missing {}", format_bundles(.missing))]
    MissingItems {
        /// Shortfall per item
        missing: Vec<ItemBundle>,
    },
}

impl InventoryError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

fn format_bundles(bundles: &[ItemBundle]) -> String {
    bundles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// A set of item quantities keyed by item name.
///
/// No entry ever holds an amount of zero: bundles are pruned as soon as they
/// run out. Iteration follows the order in which items were first added.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Bundles by item name
    bundles: HashMap<String, ItemBundle>,
    /// Item names in insertion order
    order: Vec<String>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory from `(item, amount)` pairs applied with
    /// [`Inventory::set_amount`].
    pub fn from_amounts<I, S>(amounts: I) -> InventoryResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut inventory = Self::new();
        for (item, amount) in amounts {
            inventory.set_amount(item.as_ref(), amount)?;
        }
        Ok(inventory)
    }

    /// Returns the number of distinct items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the amount of an item, or zero if it is absent.
    #[must_use]
    pub fn amount(&self, item: &str) -> u32 {
        self.bundles.get(item).map_or(0, ItemBundle::amount)
    }

    /// Checks if the inventory holds at least `amount` of an item.
    #[must_use]
    pub fn has(&self, item: &str, amount: u32) -> bool {
        self.amount(item) >= amount
    }

    /// Sets the amount of an item. Zero removes it.
    pub fn set_amount(&mut self, item: &str, amount: i64) -> InventoryResult<()> {
        if amount == 0 {
            self.remove(item);
            return Ok(());
        }

        match self.bundles.get_mut(item) {
            Some(bundle) => bundle.set(amount),
            None => {
                let bundle = ItemBundle::new(item, amount)?;
                self.insert(bundle);
                Ok(())
            },
        }
    }

    /// Adds `delta` (which may be negative) to the amount of an item.
    ///
    /// Fails without changing anything when the result would be negative.
    pub fn change_amount(&mut self, item: &str, delta: i64) -> InventoryResult<()> {
        if delta == 0 {
            return Ok(());
        }

        match self.bundles.get_mut(item) {
            Some(bundle) => {
                bundle.change(delta)?;
                if bundle.is_empty() {
                    self.remove(item);
                }
            },
            None => {
                let bundle = ItemBundle::new(item, delta)?;
                self.insert(bundle);
            },
        }
        Ok(())
    }

    /// Adds a bundle's amount to this inventory.
    pub fn add_item(&mut self, bundle: &ItemBundle) -> InventoryResult<()> {
        self.change_amount(bundle.name(), i64::from(bundle.amount()))
    }

    /// Checks that every bundle in `items` is held in at least that amount.
    #[must_use]
    pub fn contains(&self, items: &Inventory) -> bool {
        items
            .bundles()
            .all(|bundle| self.has(bundle.name(), bundle.amount()))
    }

    /// Returns how much of each bundle in `items` is lacking.
    #[must_use]
    pub fn shortfall(&self, items: &Inventory) -> Vec<ItemBundle> {
        items
            .bundles()
            .filter_map(|bundle| {
                let have = self.amount(bundle.name());
                (have < bundle.amount())
                    .then(|| ItemBundle::with_count(bundle.name(), bundle.amount() - have))
            })
            .collect()
    }

    /// Removes an item entirely. Absent items are ignored.
    pub fn remove(&mut self, item: &str) {
        if self.bundles.remove(item).is_some() {
            self.order.retain(|name| name != item);
        }
    }

    /// Subtracts every bundle in `items`.
    ///
    /// Nothing is removed unless all of `items` is present.
    pub fn remove_all(&mut self, items: &Inventory) -> InventoryResult<()> {
        if !self.contains(items) {
            return Err(InventoryError::MissingItems {
                missing: self.shortfall(items),
            });
        }

        for bundle in items.bundles() {
            self.change_amount(bundle.name(), -i64::from(bundle.amount()))?;
        }
        Ok(())
    }

    /// Adds every bundle in `items`.
    pub fn add_all(&mut self, items: &Inventory) -> InventoryResult<()> {
        for bundle in items.bundles() {
            self.add_item(bundle)?;
        }
        Ok(())
    }

    /// Returns an iterator over all bundles in insertion order.
    pub fn bundles(&self) -> impl Iterator<Item = &ItemBundle> + '_ {
        self.order.iter().filter_map(|name| self.bundles.get(name))
    }

    /// Returns an iterator over `(item, amount)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.bundles().map(|bundle| (bundle.name(), bundle.amount()))
    }

    fn insert(&mut self, bundle: ItemBundle) {
        self.order.push(bundle.name().to_string());
        self.bundles.insert(bundle.name().to_string(), bundle);
    }
}

impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .bundles()
                .all(|bundle| other.amount(bundle.name()) == bundle.amount())
    }
}

impl Eq for Inventory {}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bundle) in self.bundles().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{bundle}")?;
        }
        Ok(())
    }
}

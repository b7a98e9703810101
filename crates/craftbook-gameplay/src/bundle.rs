//! Item bundles: a quantity of a single named item.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inventory::{InventoryError, InventoryResult};

/// Converts a signed request into a stored amount.
///
/// Negative values and values above `u32::MAX` are rejected.
pub(crate) fn checked_amount(item: &str, amount: i64) -> InventoryResult<u32> {
    if amount < 0 {
        return Err(InventoryError::NegativeAmount {
            item: item.to_string(),
            amount,
        });
    }
    u32::try_from(amount).map_err(|_| InventoryError::Overflow {
        item: item.to_string(),
    })
}

/// A named item together with how many of it there are.
///
/// The amount can never go below zero. The name is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemBundle {
    /// Item name
    name: String,
    /// Quantity held
    amount: u32,
}

impl ItemBundle {
    /// Creates a bundle, rejecting negative amounts.
    pub fn new(name: impl Into<String>, amount: i64) -> InventoryResult<Self> {
        let name = name.into();
        let amount = checked_amount(&name, amount)?;
        Ok(Self { name, amount })
    }

    /// Creates a bundle from an amount that is already known to be valid.
    #[must_use]
    pub fn with_count(name: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// Overwrites the amount.
    pub fn set(&mut self, amount: i64) -> InventoryResult<()> {
        self.amount = checked_amount(&self.name, amount)?;
        Ok(())
    }

    /// Adds `delta` (which may be negative) to the amount.
    ///
    /// The bundle is left untouched when the result would be negative.
    pub fn change(&mut self, delta: i64) -> InventoryResult<()> {
        let result = i64::from(self.amount)
            .checked_add(delta)
            .ok_or_else(|| InventoryError::Overflow {
                item: self.name.clone(),
            })?;
        self.amount = checked_amount(&self.name, result)?;
        Ok(())
    }
}

impl fmt::Display for ItemBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.name)
    }
}

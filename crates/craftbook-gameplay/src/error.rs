//! Error classification shared by every crafting subsystem.

use std::fmt;

/// Broad category of a crafting failure.
///
/// Each concrete error type (`InventoryError`, `CraftingError`, and the
/// loader errors in the engine crate) maps onto one of these through its
/// `kind()` method, so callers can react to the category without matching on
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An amount would become negative, overflow, or a removal asked for
    /// items that are not present.
    InvalidArgument,
    /// A recipe name is not registered.
    NotFound,
    /// A recipe name is already registered.
    DuplicateKey,
    /// A recipe document could not be parsed.
    ParseError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::NotFound => "not found",
            Self::DuplicateKey => "duplicate key",
            Self::ParseError => "parse error",
        };
        f.write_str(name)
    }
}

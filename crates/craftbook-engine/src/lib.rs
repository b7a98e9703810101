//! # Craftbook Engine
//!
//! Runs crafting sessions on top of `craftbook-gameplay`.
//!
//! This crate ties the gameplay model to the outside world:
//! - Config: starting inventory, recipe source, craft sequence (TOML)
//! - Recipe loader: JSON recipe documents
//! - Item loader: JSON item descriptions
//! - Session: crafts in sequence and produces a text report

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod item_loader;
pub mod recipe_loader;
pub mod session;

pub use config::{ConfigError, EngineConfig, StartingItem};
pub use item_loader::{ItemDatabase, ItemInfo, ItemLoadError};
pub use recipe_loader::{RecipeFile, RecipeLoadError, RecipeLoader};
pub use session::{demo_recipes, CraftingSession, SessionError};

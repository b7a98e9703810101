//! Engine configuration.
//!
//! Provides the starting inventory, the recipe and item sources, and the
//! craft sequence for a crafting session. Configuration can be loaded from and
//! saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "craftbook.toml";

/// Errors that can occur while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("Config file I/O failed: {0}")]
    Read(#[from] io::Error),

    /// File is not valid TOML for this configuration.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// An item placed in the inventory when a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingItem {
    /// Item name
    pub name: String,
    /// Amount held
    pub amount: i64,
}

impl StartingItem {
    /// Creates a starting item.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// JSON recipe document (None = built-in demo recipes)
    pub recipe_file: Option<PathBuf>,
    /// JSON item descriptions shown in the inventory report
    pub item_file: Option<PathBuf>,
    /// Recipes to craft, in order
    pub craft_sequence: Vec<String>,
    /// Inventory contents at session start
    pub starting_items: Vec<StartingItem>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recipe_file: None,
            item_file: None,
            craft_sequence: vec!["hammer".to_string(), "heavy hammer".to_string()],
            starting_items: vec![
                StartingItem::new("cloth", 2),
                StartingItem::new("stick", 2),
                StartingItem::new("stone", 2),
            ],
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if the file is missing or unusable.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(ConfigError::Read(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("Config file not found, using defaults");
                Self::default()
            },
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            },
        }
    }

    /// Load and validate configuration, reporting why it could not be used.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.validate();
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Default configuration file path.
    fn config_path() -> PathBuf {
        config_dir().map_or_else(
            || PathBuf::from(CONFIG_FILE),
            |dir| dir.join("craftbook").join(CONFIG_FILE),
        )
    }

    /// Normalize configuration values.
    ///
    /// Names are trimmed; starting items with a non-positive amount or an
    /// empty name are dropped, as are empty craft names.
    pub fn validate(&mut self) {
        for item in &mut self.starting_items {
            item.name = item.name.trim().to_string();
        }
        self.starting_items.retain(|item| {
            let keep = !item.name.is_empty() && item.amount > 0;
            if !keep {
                warn!("Ignoring starting item {:?} x{}", item.name, item.amount);
            }
            keep
        });

        for name in &mut self.craft_sequence {
            *name = name.trim().to_string();
        }
        self.craft_sequence.retain(|name| !name.is_empty());
    }
}

/// Per-user configuration directory for the current platform.
fn config_dir() -> Option<PathBuf> {
    let var = |name: &str| std::env::var_os(name).map(PathBuf::from);

    if cfg!(target_os = "windows") {
        var("APPDATA")
    } else if cfg!(target_os = "macos") {
        var("HOME").map(|home| home.join("Library/Application Support"))
    } else {
        var("XDG_CONFIG_HOME").or_else(|| var("HOME").map(|home| home.join(".config")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.recipe_file.is_none());
        assert_eq!(config.starting_items.len(), 3);
        assert_eq!(config.craft_sequence, vec!["hammer", "heavy hammer"]);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig {
            recipe_file: None,
            item_file: None,
            craft_sequence: vec![" flag".to_string(), "   ".to_string()],
            starting_items: vec![
                StartingItem::new(" cloth ", 2),
                StartingItem::new("stone", 0),
                StartingItem::new("stick", -4),
                StartingItem::new("", 3),
            ],
        };

        config.validate();

        assert_eq!(config.starting_items, vec![StartingItem::new("cloth", 2)]);
        assert_eq!(config.craft_sequence, vec!["flag"]);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let mut config = EngineConfig::default();
        config.recipe_file = Some(PathBuf::from("assets/recipes.json"));
        config.item_file = Some(PathBuf::from("assets/items.json"));
        config.craft_sequence = vec!["flag".to_string()];

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/craftbook.toml");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_try_load_reports_cause() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let missing = EngineConfig::try_load_from(temp_dir.path().join("absent.toml"))
            .expect_err("missing");
        assert!(matches!(missing, ConfigError::Read(ref e) if e.kind() == io::ErrorKind::NotFound));

        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "starting_items = \"cloth\"").expect("write");
        let broken = EngineConfig::try_load_from(&config_path).expect_err("invalid");
        assert!(matches!(broken, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_load_directory_falls_back() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = EngineConfig::load_from(temp_dir.path());
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "craft_sequence = 7").expect("write");

        let config = EngineConfig::load_from(&config_path);
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(
            &config_path,
            r#"
craft_sequence = ["flag"]

[[starting_items]]
name = "cloth"
amount = 1

[[starting_items]]
name = "stick"
amount = 1
"#,
        )
        .expect("write");

        let config = EngineConfig::load_from(&config_path);
        assert!(config.recipe_file.is_none());
        assert_eq!(config.craft_sequence, vec!["flag"]);
        assert_eq!(config.starting_items.len(), 2);
    }

    #[test]
    fn test_config_toml_serialization() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");

        assert!(toml_str.contains("craft_sequence"));
        assert!(toml_str.contains("starting_items"));
    }
}

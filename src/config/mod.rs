//! Configuration module
//!
//! Handles loading and saving the extension pack configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main extension pack configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Bow-draw FOV zoom settings
    #[serde(default)]
    pub zoom: ZoomConfig,

    /// Trigger-block spin settings
    #[serde(default)]
    pub spin: SpinConfig,

    /// Scoreboard team settings
    #[serde(default)]
    pub team: TeamConfig,

    /// Loot chat formatting
    #[serde(default)]
    pub chat: ChatConfig,
}

/// General configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log file path (optional)
    pub log_file: Option<PathBuf>,
}

/// Bow-draw FOV zoom configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoomConfig {
    /// Item kind that triggers the zoom
    #[serde(default = "default_bow_kind")]
    pub bow_kind: String,
    /// Ticks of drawing needed for full zoom
    #[serde(default = "default_max_draw_ticks")]
    pub max_draw_ticks: u32,
    /// Fraction of FOV removed at full draw
    #[serde(default = "default_fov_scale")]
    pub fov_scale: f32,
}

fn default_bow_kind() -> String {
    "bow".to_string()
}

fn default_max_draw_ticks() -> u32 {
    20
}

fn default_fov_scale() -> f32 {
    0.15
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            bow_kind: default_bow_kind(),
            max_draw_ticks: default_max_draw_ticks(),
            fov_scale: default_fov_scale(),
        }
    }
}

/// Trigger-block spin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Block kind the player must stand on
    #[serde(default = "default_trigger_block")]
    pub trigger_block: String,
    /// Yaw rotation per end-phase tick, in degrees
    #[serde(default = "default_yaw_step")]
    pub yaw_step: f32,
}

fn default_trigger_block() -> String {
    "iron_block".to_string()
}

fn default_yaw_step() -> f32 {
    5.0
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            trigger_block: default_trigger_block(),
            yaw_step: default_yaw_step(),
        }
    }
}

/// Scoreboard team configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Team name entities are added to
    #[serde(default = "default_team_name")]
    pub name: String,
    /// Team display color
    #[serde(default = "default_team_color")]
    pub color: String,
}

fn default_team_name() -> String {
    "lootlink".to_string()
}

fn default_team_color() -> String {
    "dark_aqua".to_string()
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            name: default_team_name(),
            color: default_team_color(),
        }
    }
}

/// Loot chat formatting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Sentence the item list is wrapped in; `{items}` is the placeholder
    #[serde(default = "default_base_template")]
    pub base_template: String,
    /// Per-item representation; `{count}` and `{name}` are the placeholders
    #[serde(default = "default_item_template")]
    pub item_template: String,
}

fn default_base_template() -> String {
    "You received the following loot: {items}".to_string()
}

fn default_item_template() -> String {
    "{count} {name}".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_template: default_base_template(),
            item_template: default_item_template(),
        }
    }
}

impl ModConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: ModConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load_default() -> ConfigResult<Self> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("lootlink/config.toml")),
            Some(PathBuf::from("./lootlink.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config() -> String {
    let config = ModConfig {
        spin: SpinConfig {
            trigger_block: "iron_block".to_string(),
            yaw_step: 5.0,
        },
        team: TeamConfig {
            name: "my-team".to_string(),
            color: "gold".to_string(),
        },
        ..Default::default()
    };

    toml::to_string_pretty(&config).unwrap()
}

use crate::action::Action;
use crate::record::OutputFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Start and goal world files, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WorldConfig {
    pub start: PathBuf,
    pub goal: PathBuf,
}

// The calls made on the agent, in order
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ProgramConfig {
    #[serde(default)]
    pub actions: Vec<Action>,
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_save_history")]
    pub save_history: bool,
    #[serde(default)]
    pub save_checkpoints: bool, // <base>_checkpoints.csv
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartAt {
    First,
    #[default]
    Last,
}

// Settings read by the viewer only
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ViewerConfig {
    #[serde(default)]
    pub show_goal: bool,
    #[serde(default)]
    pub start_at: StartAt,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_base_filename() -> String {
    "bit_run".to_string()
}

fn default_save_history() -> bool {
    true
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: default_base_filename(),
            format: OutputFormat::default(),
            save_history: default_save_history(),
            save_checkpoints: false,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            show_goal: false,
            start_at: StartAt::default(),
            color: default_color(),
        }
    }
}

// Main configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BitConfig {
    pub world: WorldConfig,
    #[serde(default)]
    pub program: ProgramConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl BitConfig {
    /// Loads the configuration from a TOML file.
    ///
    /// Relative world paths are resolved against the directory holding the
    /// config file, so a run can be started from anywhere.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let mut config: BitConfig = toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML from '{}': {}", path_ref.display(), e))?;

        // --- Validation ---
        if config.output.base_filename.trim().is_empty() {
            anyhow::bail!("output.base_filename must not be empty.");
        }

        if let Some(dir) = path_ref.parent() {
            config.world.start = dir.join(&config.world.start);
            config.world.goal = dir.join(&config.world.goal);
        }

        Ok(config)
    }
}

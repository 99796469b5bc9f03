// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use directories::BaseDirs;

use crate::geometry::{CHAR_HEIGHT, CHAR_WIDTH, grid_height, grid_width};

/// ---------------------------------------------------------------------------------------------
///  Top-level Config Structure
/// ---------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub panel: PanelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            panel: PanelConfig::default(),
        }
    }
}

/// ---------------------------------------------------------------------------------------------
///  Panel
/// ---------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Panel width in pixels.
    pub width: u16,
    /// Panel height in pixels.
    pub height: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        // 240x320 portrait, the classic ILI934x panel.
        Self {
            width: 240,
            height: 320,
        }
    }
}

/// ---------------------------------------------------------------------------------------------
///  Partial config (for layered merging)
/// ---------------------------------------------------------------------------------------------
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigPartial {
    pub version: Option<u32>,
    pub panel: Option<PanelConfig>,
}

impl Config {
    fn apply_partial(&mut self, partial: ConfigPartial) {
        if let Some(v) = partial.version {
            self.version = v;
        }
        if let Some(panel) = partial.panel {
            self.panel = panel;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::Validation("version must be >= 1".to_string()));
        }

        if grid_width(self.panel.width) == 0 || grid_height(self.panel.height) == 0 {
            return Err(ConfigError::Validation(format!(
                "panel {}x{} px cannot hold a single {CHAR_WIDTH}x{CHAR_HEIGHT} px character cell",
                self.panel.width, self.panel.height
            )));
        }

        Ok(())
    }
}

/// ---------------------------------------------------------------------------------------------
///  Errors
/// ---------------------------------------------------------------------------------------------
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// ---------------------------------------------------------------------------------------------
///  Public loader
/// ---------------------------------------------------------------------------------------------
/// Loads the configuration by applying layers in order (later layers override
/// earlier ones): defaults, the user config file, a `PANELTERM_CONFIG=` path,
/// then an explicit path from the command line.
///
/// # Errors
/// Returns `ConfigError` if any config file cannot be read or parsed, or if
/// the final config is invalid.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(user_path) = user_config_path()
        && user_path.is_file()
    {
        let partial = load_partial(&user_path)?;
        cfg.apply_partial(partial);
    }

    if let Ok(env_path) = env::var("PANELTERM_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.is_file() {
            let partial = load_partial(&path)?;
            cfg.apply_partial(partial);
        }
    }

    if let Some(path) = explicit_path {
        let partial = load_partial(path)?;
        cfg.apply_partial(partial);
    }

    cfg.validate()?;
    Ok(cfg)
}

/// ---------------------------------------------------------------------------------------------
///  Helpers
/// ---------------------------------------------------------------------------------------------
fn load_partial(path: &Path) -> Result<ConfigPartial, ConfigError> {
    debug!("Loading config layer from {}", path.display());

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// User config path: `<platform config dir>/panelterm/config.toml`.
fn user_config_path() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    Some(base.config_dir().join("panelterm").join("config.toml"))
}

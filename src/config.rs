//! Session configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! demo page defaults (300x300 canvas, 20x40 cursor at (0, 1), one second
//! timer, click mode).

use crate::cursor::{CanvasSize, CursorRect};
use crate::session::Mode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the cursor program comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShaderConfig {
    /// Directory shader names are resolved against
    pub root: PathBuf,
    /// Fragment body
    pub fragment: String,
    /// Optional wrapper containing the fragment marker
    pub wrapper: Option<String>,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("shaders"),
            fragment: "cursor_example.glsl".to_string(),
            wrapper: None,
        }
    }
}

fn positive(extent: f32) -> bool {
    extent.is_finite() && extent > 0.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub canvas: CanvasSize,
    /// Initial cursor rectangle
    pub cursor: CursorRect,
    pub tick_period_ms: u64,
    pub initial_mode: Mode,
    /// Horizontal step per key press; the cursor width when unset
    pub key_step: Option<f32>,
    /// Fixed seed for random mode; entropy when unset
    pub rng_seed: Option<u64>,
    pub shader: ShaderConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            cursor: CursorRect::default(),
            tick_period_ms: 1000,
            initial_mode: Mode::Click,
            key_step: None,
            rng_seed: None,
            shader: ShaderConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Read, parse and validate a JSON config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(positive(self.canvas.width) && positive(self.canvas.height)) {
            return Err(ConfigError::Invalid(format!(
                "canvas must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if !(positive(self.cursor.width) && positive(self.cursor.height)) {
            return Err(ConfigError::Invalid(format!(
                "cursor size must be positive, got {}x{}",
                self.cursor.width, self.cursor.height
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tickPeriodMs must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn key_step(&self) -> f32 {
        self.key_step.unwrap_or(self.cursor.width)
    }
}

#![forbid(unsafe_code)]

//! Switch and controller configuration.
//!
//! Configuration is plain serde data. Hosts may build it in code or load it
//! from JSON:
//!
//! ```json
//! {
//!   "switch": { "strategy": "move_bottom", "speed": "fast", "scale_modifier": true },
//!   "style": { "background": { "color": { "r": 0, "g": 0, "b": 0, "a": 255 } },
//!              "margins": { "left": 8, "top": 8, "right": 8, "bottom": 8 } }
//! }
//! ```
//!
//! The engine reads the switch configuration when a navigation request is
//! accepted and keeps that snapshot until the request finishes.

use std::path::{Path, PathBuf};

use fstack_core::animation::Interpolator;
use serde::{Deserialize, Serialize};

use crate::panel::{Background, PanelStyle};

/// Visual treatment of a panel switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchStrategy {
    /// Instant visibility swap.
    #[default]
    None,
    Fade,
    Scale,
    Swipe,
    MoveRight,
    MoveBottom,
    MoveLeft,
    MoveTop,
    ScrollVertical,
    ScrollHorizontal,
}

impl SwitchStrategy {
    pub const ALL: [Self; 10] = [
        Self::None,
        Self::Fade,
        Self::Scale,
        Self::Swipe,
        Self::MoveRight,
        Self::MoveBottom,
        Self::MoveLeft,
        Self::MoveTop,
        Self::ScrollVertical,
        Self::ScrollHorizontal,
    ];

    /// Strategies without a stepped form: every request is a single hop.
    pub const fn forces_fast(self) -> bool {
        matches!(self, Self::None | Self::Fade)
    }

    /// Whether an accepted request rejects others until it finishes.
    pub const fn blocks(self) -> bool {
        !self.forces_fast()
    }

    /// Curve used for every motion of this strategy.
    pub const fn interpolator(self) -> Interpolator {
        match self {
            Self::Fade | Self::Swipe | Self::ScrollVertical | Self::ScrollHorizontal => {
                Interpolator::Linear
            }
            _ => Interpolator::FastOutSlowIn,
        }
    }
}

/// Animation speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

/// How panel switches look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    pub strategy: SwitchStrategy,
    pub speed: SwitchSpeed,
    /// Add the strategy's scale motions on top of its base motion.
    pub scale_modifier: bool,
}

impl SwitchConfig {
    #[must_use]
    pub fn new(strategy: SwitchStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn speed(mut self, speed: SwitchSpeed) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn scale_modifier(mut self, enabled: bool) -> Self {
        self.scale_modifier = enabled;
        self
    }
}

/// Everything a frame controller can be configured with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub switch: SwitchConfig,
    pub style: PanelStyle,
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ControllerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values serde accepts but the controller cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.style.background {
            Background::Drawable(name) if name.trim().is_empty() => Err(ConfigError::Invalid(
                "background drawable name is empty".to_owned(),
            )),
            _ => Ok(()),
        }
    }
}

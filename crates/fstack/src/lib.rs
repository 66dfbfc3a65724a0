#![forbid(unsafe_code)]

//! fstack public facade crate.
//!
//! Stacks mutually exclusive panels in one host surface and switches between
//! them with animated or instant strategies. This crate re-exports the
//! day-to-day types from the internal crates and offers a small prelude.
//!
//! ```
//! use std::time::Duration;
//! use fstack::prelude::*;
//!
//! let mut stack = FrameController::new();
//! stack.set_switch_animation(SwitchStrategy::Fade, false);
//! let home = stack.add_panel_with_tag("home");
//! stack.add_panel_with_tag("settings");
//!
//! assert!(stack.go_to_tag("settings"));
//! stack.tick(Duration::from_millis(600));
//! assert!(stack.go_to_panel(home));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use fstack_core::animation::{
    Animation, Interpolator, Motion, MotionKind, MotionLibrary, MotionPlayer, MotionSet, Offset,
    Pivot, Relative, Transformation, TranslateMode,
};
pub use fstack_core::geometry::{Bounds, Sides};

// --- Engine re-exports -----------------------------------------------------

pub use fstack_engine::{
    Background, ConfigError, ControllerConfig, Direction, EngineState, EventLog, FrameController,
    NavRequest, NavTarget, Panel, PanelError, PanelFrame, PanelId, PanelStack, PanelStyle,
    PanelTag, Phase, Rgba, SwitchConfig, SwitchEvent, SwitchListener, SwitchSpeed,
    SwitchStrategy, Timing, TransitionEngine, Visibility,
};

#[cfg(feature = "tracing-json")]
pub use fstack_core::logging::init_json_subscriber;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for fstack hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A positional panel operation was out of range.
    #[error(transparent)]
    Panel(#[from] PanelError),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for fstack APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a controller from a JSON configuration file.
pub fn controller_from_file(path: impl AsRef<std::path::Path>) -> Result<FrameController> {
    let config = ControllerConfig::from_json_file(path)?;
    Ok(FrameController::with_config(&config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Background, ControllerConfig, Error, EventLog, FrameController, PanelFrame, PanelId,
        PanelTag, Result, Rgba, Sides, SwitchEvent, SwitchListener, SwitchSpeed, SwitchStrategy,
        Visibility,
    };

    pub use crate::{core, engine};
}

pub use fstack_core as core;
pub use fstack_engine as engine;

#![forbid(unsafe_code)]

//! Panel collection and transition engine for fstack.
//!
//! A [`FrameController`] stacks mutually exclusive panels in one host
//! surface and switches between them with one of the [`SwitchStrategy`]
//! animations. The [`TransitionEngine`] behind it serializes navigation
//! requests, visits intermediate panels in stepped mode, and reports each
//! switch through a [`SwitchListener`].
//!
//! Time is driven by the host: call [`FrameController::tick`] with elapsed
//! time and draw [`FrameController::frames`].

pub mod config;
pub mod controller;
pub mod engine;
pub mod listener;
pub mod panel;
pub mod panel_stack;
pub mod strategy;
pub mod timing;

mod runner;

pub use config::{ConfigError, ControllerConfig, SwitchConfig, SwitchSpeed, SwitchStrategy};
pub use controller::{FrameController, PanelFrame};
pub use engine::{EngineState, NavRequest, NavTarget, Phase, TransitionEngine};
pub use listener::{EventLog, SwitchEvent, SwitchListener};
pub use panel::{Background, Panel, PanelId, PanelStyle, PanelTag, Rgba, Visibility};
pub use panel_stack::{PanelError, PanelStack};
pub use strategy::Direction;
pub use timing::Timing;

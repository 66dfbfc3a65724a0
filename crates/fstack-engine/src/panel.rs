#![forbid(unsafe_code)]

//! Panels: identity, tag, visibility, and style.
//!
//! A [`Panel`] carries no content. The host keeps its own map from
//! [`PanelId`] to whatever it draws inside the panel.

use std::fmt;

use fstack_core::geometry::Sides;
use serde::{Deserialize, Serialize};

/// Stable panel identity. Never reused within one [`PanelStack`](crate::PanelStack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Opaque lookup tag. Tags are compared by value and need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelTag(String);

impl PanelTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanelTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_owned())
    }
}

impl From<String> for PanelTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl fmt::Display for PanelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a panel (or the whole surface) is drawn and takes space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Visible,
    /// Not drawn, still laid out.
    #[default]
    Invisible,
    /// Not drawn, takes no space.
    Collapsed,
}

impl Visibility {
    #[inline]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// From a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Panel background: a flat color or a host-resolved drawable resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Color(Rgba),
    Drawable(String),
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Rgba::WHITE)
    }
}

impl From<Rgba> for Background {
    fn from(color: Rgba) -> Self {
        Self::Color(color)
    }
}

/// Style shared by every panel of a stack.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    pub background: Background,
    pub margins: Sides,
    pub padding: Sides,
}

/// One stacked panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: PanelId,
    tag: Option<PanelTag>,
    visibility: Visibility,
    style: PanelStyle,
}

impl Panel {
    pub(crate) fn new(id: PanelId, tag: Option<PanelTag>, style: PanelStyle) -> Self {
        Self {
            id,
            tag,
            visibility: Visibility::Invisible,
            style,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn tag(&self) -> Option<&PanelTag> {
        self.tag.as_ref()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_ref().is_some_and(|t| t.as_str() == tag)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub(crate) fn set_style(&mut self, style: PanelStyle) {
        self.style = style;
    }
}

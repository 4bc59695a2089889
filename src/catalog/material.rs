//! Material presets and colors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// sRGB color, written as `#RRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color from a `0xRRGGBB` literal
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Material family, drives the price multiplier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialGroup {
    Wood,
    Stone,
    Metal,
    Upholstery,
    /// Library-only family; carries no multiplier of its own
    Glass,
}

impl MaterialGroup {
    pub const ALL: [MaterialGroup; 5] = [
        MaterialGroup::Wood,
        MaterialGroup::Stone,
        MaterialGroup::Metal,
        MaterialGroup::Upholstery,
        MaterialGroup::Glass,
    ];
}

impl fmt::Display for MaterialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaterialGroup::Wood => "wood",
            MaterialGroup::Stone => "stone",
            MaterialGroup::Metal => "metal",
            MaterialGroup::Upholstery => "upholstery",
            MaterialGroup::Glass => "glass",
        })
    }
}

/// A named material preset selectable as a unit.
///
/// Unset fields fall back to the store's defaults when applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialOption {
    pub name: String,
    pub primary_color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metal_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metalness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f32>,
    /// Transparency for glass-like presets; opaque when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Speckled finish (terrazzo) rendered from several tones
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multi_color: bool,
    pub group: MaterialGroup,
}

impl MaterialOption {
    pub fn new(name: impl Into<String>, primary_color: Color, group: MaterialGroup) -> Self {
        Self {
            name: name.into(),
            primary_color,
            secondary_color: None,
            metal_color: None,
            metalness: None,
            roughness: None,
            opacity: None,
            multi_color: false,
            group,
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = Some(metalness);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_multi_color(mut self) -> Self {
        self.multi_color = true;
        self
    }
}

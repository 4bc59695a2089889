//! The material parameters of the configured piece

use serde::{Deserialize, Serialize};

use super::bounded::Unit;
use crate::catalog::{Color, MaterialOption};

/// Metal color used when a preset does not name one (brass)
pub const DEFAULT_METAL_COLOR: Color = Color::rgb(0xD4, 0xAC, 0x0D);

/// Metalness used when a preset does not name one
pub const DEFAULT_METALNESS: f32 = 0.0;

/// Roughness used when a preset does not name one
pub const DEFAULT_ROUGHNESS: f32 = 0.5;

/// Current material parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConfig {
    pub primary_color: Color,
    pub secondary_color: Color,
    pub metal_color: Color,
    pub metalness: Unit,
    pub roughness: Unit,
    /// Set only by transparent presets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Unit>,
}

impl Default for MaterialConfig {
    /// Saddle-brown wood look the configurator opens with
    fn default() -> Self {
        Self {
            primary_color: Color::rgb(0x8B, 0x45, 0x13),
            secondary_color: Color::rgb(0x5D, 0x40, 0x37),
            metal_color: DEFAULT_METAL_COLOR,
            metalness: Unit::new(0.7),
            roughness: Unit::new(0.6),
            opacity: None,
        }
    }
}

impl MaterialConfig {
    /// Material produced by applying `preset`; unset fields take the defaults
    pub fn from_preset(preset: &MaterialOption) -> Self {
        Self {
            primary_color: preset.primary_color,
            secondary_color: preset.secondary_color.unwrap_or(preset.primary_color),
            metal_color: preset.metal_color.unwrap_or(DEFAULT_METAL_COLOR),
            metalness: Unit::new(preset.metalness.unwrap_or(DEFAULT_METALNESS)),
            roughness: Unit::new(preset.roughness.unwrap_or(DEFAULT_ROUGHNESS)),
            opacity: preset.opacity.map(Unit::new),
        }
    }
}

//! Viewing environment settings

use serde::{Deserialize, Serialize};

use super::bounded::{AmbientIntensity, LightIntensity, ShadowOpacity};
use crate::catalog::EnvironmentPreset;

/// Lighting and backdrop the piece is viewed in
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSettings {
    pub preset: EnvironmentPreset,
    pub light_intensity: LightIntensity,
    pub ambient_intensity: AmbientIntensity,
    pub shadow_opacity: ShadowOpacity,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            preset: EnvironmentPreset::Apartment,
            light_intensity: LightIntensity::new(1.5),
            ambient_intensity: AmbientIntensity::new(0.5),
            shadow_opacity: ShadowOpacity::new(0.6),
        }
    }
}

/// Partial update; only the fields that are set are applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<EnvironmentPreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_intensity: Option<LightIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_intensity: Option<AmbientIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_opacity: Option<ShadowOpacity>,
}

impl EnvironmentSettings {
    /// Shallow merge of `update` into these settings
    pub fn apply(&mut self, update: EnvironmentUpdate) {
        if let Some(preset) = update.preset {
            self.preset = preset;
        }
        if let Some(v) = update.light_intensity {
            self.light_intensity = v;
        }
        if let Some(v) = update.ambient_intensity {
            self.ambient_intensity = v;
        }
        if let Some(v) = update.shadow_opacity {
            self.shadow_opacity = v;
        }
    }
}

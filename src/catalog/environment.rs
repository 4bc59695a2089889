//! Viewing environment presets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lighting environment the model is shown in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentPreset {
    #[default]
    Apartment,
    City,
    Dawn,
    Forest,
    Lobby,
    Night,
    Park,
    Studio,
    Sunset,
    Warehouse,
}

impl EnvironmentPreset {
    pub const ALL: [EnvironmentPreset; 10] = [
        EnvironmentPreset::Apartment,
        EnvironmentPreset::City,
        EnvironmentPreset::Dawn,
        EnvironmentPreset::Forest,
        EnvironmentPreset::Lobby,
        EnvironmentPreset::Night,
        EnvironmentPreset::Park,
        EnvironmentPreset::Studio,
        EnvironmentPreset::Sunset,
        EnvironmentPreset::Warehouse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnvironmentPreset::Apartment => "apartment",
            EnvironmentPreset::City => "city",
            EnvironmentPreset::Dawn => "dawn",
            EnvironmentPreset::Forest => "forest",
            EnvironmentPreset::Lobby => "lobby",
            EnvironmentPreset::Night => "night",
            EnvironmentPreset::Park => "park",
            EnvironmentPreset::Studio => "studio",
            EnvironmentPreset::Sunset => "sunset",
            EnvironmentPreset::Warehouse => "warehouse",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            EnvironmentPreset::Apartment => "Apartment",
            EnvironmentPreset::City => "City",
            EnvironmentPreset::Dawn => "Dawn",
            EnvironmentPreset::Forest => "Forest",
            EnvironmentPreset::Lobby => "Lobby",
            EnvironmentPreset::Night => "Night",
            EnvironmentPreset::Park => "Park",
            EnvironmentPreset::Studio => "Studio",
            EnvironmentPreset::Sunset => "Sunset",
            EnvironmentPreset::Warehouse => "Warehouse",
        }
    }
}

impl fmt::Display for EnvironmentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvironmentPreset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown environment preset '{}'", s))
    }
}

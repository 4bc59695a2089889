//! Bridge protocol - JSON message definitions

use serde::{Deserialize, Serialize};

/// Messages delivered to the hosting page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    /// The component's value changed (a saved configuration)
    #[serde(rename = "streamlit:setComponentValue")]
    SetComponentValue { value: serde_json::Value },
    /// The component wants its frame resized
    #[serde(rename = "streamlit:setFrameHeight")]
    SetFrameHeight { height: u32 },
}

/// Commands sent by the host to the configurator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum ConfiguratorCommand {
    /// Select a model by identifier (e.g. "sofa", "coffeeTable")
    SelectModel { model_id: String },
    /// Apply a catalog material preset by display name
    SetMaterial { name: String },
    /// Set metalness from a 0..100 slider position
    SetMetalness { slider: u32 },
    /// Set roughness from a 0..100 slider position
    SetRoughness { slider: u32 },
    /// Set a custom primary color (#RRGGBB)
    SetPrimaryColor { color: String },
    /// Set one dimension in centimetres ("width", "depth" or "height")
    SetDimension { axis: String, value: f32 },
    /// Toggle an optional feature
    ToggleFeature { feature_id: String },
    /// Update environment settings (only specified fields are updated).
    /// Intensities are 0..30 / 0..20 / 0..10 slider positions.
    SetEnvironment {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preset: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        light_intensity: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ambient_intensity: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shadow_opacity: Option<u32>,
    },
    /// Get the current price and how it was reached
    GetPrice,
    /// Get the current configuration snapshot
    GetConfiguration,
    /// Export the configuration and send it to the host
    Save,
    /// Ask the host to resize the frame
    ResizeFrame { height: u32 },
    /// Ping (health check)
    Ping,
}

/// Responses from the configurator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum BridgeResponse {
    #[serde(rename = "ok")]
    Ok { data: ResponseData },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    None,
    Pong { message: String },
    Applied { applied: bool },
    Dimension { axis: String, value: f32 },
    Price {
        price: u32,
        base_price: u32,
        material_multiplier: f64,
        features_total: u32,
        custom_size: bool,
    },
    Configuration { configuration: serde_json::Value },
}

impl BridgeResponse {
    pub fn ok(data: ResponseData) -> Self {
        BridgeResponse::Ok { data }
    }

    pub fn ok_empty() -> Self {
        BridgeResponse::Ok {
            data: ResponseData::None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        BridgeResponse::Error {
            message: message.into(),
        }
    }
}

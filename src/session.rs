//! Configurator session: dispatches host commands onto the store

use std::sync::Arc;

use atelier_bridge::{BridgeResponse, CommandHandler, ConfiguratorCommand, HostBridge, ResponseData};

use crate::catalog::{Catalog, Color, EnvironmentPreset, ModelId};
use crate::configuration::{
    AmbientIntensity, Axis, ConfigurationStore, EnvironmentUpdate, LightIntensity, ShadowOpacity,
    Unit,
};

/// One user's configurator: the store plus the bridge back to the host page
pub struct ConfiguratorSession<B: HostBridge> {
    catalog: Arc<Catalog>,
    store: ConfigurationStore,
    bridge: B,
}

impl<B: HostBridge> ConfiguratorSession<B> {
    pub fn new(catalog: Arc<Catalog>, initial_model: ModelId, bridge: B) -> Self {
        let store = ConfigurationStore::new(Arc::clone(&catalog), initial_model);
        Self {
            catalog,
            store,
            bridge,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigurationStore {
        &mut self.store
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    fn configuration_value(&self) -> Result<serde_json::Value, String> {
        serde_json::to_value(self.store.export_configuration())
            .map_err(|e| format!("Failed to serialize configuration: {}", e))
    }

    fn set_environment(
        &mut self,
        preset: Option<String>,
        light_intensity: Option<u32>,
        ambient_intensity: Option<u32>,
        shadow_opacity: Option<u32>,
    ) -> Result<(), String> {
        let preset = preset
            .map(|p| p.parse::<EnvironmentPreset>())
            .transpose()?;
        self.store.set_environment(EnvironmentUpdate {
            preset,
            light_intensity: light_intensity.map(LightIntensity::from_slider),
            ambient_intensity: ambient_intensity.map(AmbientIntensity::from_slider),
            shadow_opacity: shadow_opacity.map(ShadowOpacity::from_slider),
        });
        Ok(())
    }
}

impl<B: HostBridge> CommandHandler for ConfiguratorSession<B> {
    fn handle_command(&mut self, cmd: ConfiguratorCommand) -> BridgeResponse {
        match cmd {
            ConfiguratorCommand::SelectModel { model_id } => {
                let applied = self.store.select_model(&model_id);
                BridgeResponse::ok(ResponseData::Applied { applied })
            }

            ConfiguratorCommand::SetMaterial { name } => {
                match self.store.set_material_by_name(&name) {
                    Ok(()) => BridgeResponse::ok_empty(),
                    Err(e) => BridgeResponse::error(e.to_string()),
                }
            }

            ConfiguratorCommand::SetMetalness { slider } => {
                self.store.set_metalness(Unit::from_slider(slider));
                BridgeResponse::ok_empty()
            }

            ConfiguratorCommand::SetRoughness { slider } => {
                self.store.set_roughness(Unit::from_slider(slider));
                BridgeResponse::ok_empty()
            }

            ConfiguratorCommand::SetPrimaryColor { color } => match color.parse::<Color>() {
                Ok(color) => {
                    self.store.set_primary_color(color);
                    BridgeResponse::ok_empty()
                }
                Err(e) => BridgeResponse::error(e.to_string()),
            },

            ConfiguratorCommand::SetDimension { axis, value } => {
                let axis = match axis.parse::<Axis>() {
                    Ok(axis) => axis,
                    Err(e) => return BridgeResponse::error(e),
                };
                match self.store.set_dimension(axis, value) {
                    Ok(value) => BridgeResponse::ok(ResponseData::Dimension {
                        axis: axis.to_string(),
                        value,
                    }),
                    Err(e) => BridgeResponse::error(e.to_string()),
                }
            }

            ConfiguratorCommand::ToggleFeature { feature_id } => {
                let applied = self.store.toggle_feature(&feature_id);
                BridgeResponse::ok(ResponseData::Applied { applied })
            }

            ConfiguratorCommand::SetEnvironment {
                preset,
                light_intensity,
                ambient_intensity,
                shadow_opacity,
            } => match self.set_environment(preset, light_intensity, ambient_intensity, shadow_opacity) {
                Ok(()) => BridgeResponse::ok_empty(),
                Err(e) => BridgeResponse::error(e),
            },

            ConfiguratorCommand::GetPrice => {
                let price = self.store.price_breakdown();
                BridgeResponse::ok(ResponseData::Price {
                    price: price.total,
                    base_price: price.base_price,
                    material_multiplier: price.material_multiplier,
                    features_total: price.features_total,
                    custom_size: price.custom_size,
                })
            }

            ConfiguratorCommand::GetConfiguration => match self.configuration_value() {
                Ok(configuration) => BridgeResponse::ok(ResponseData::Configuration { configuration }),
                Err(e) => BridgeResponse::error(e),
            },

            ConfiguratorCommand::Save => {
                let configuration = match self.configuration_value() {
                    Ok(v) => v,
                    Err(e) => return BridgeResponse::error(e),
                };
                if let Err(e) = self.bridge.emit_value(configuration.clone()) {
                    log::warn!("Failed to send configuration to host: {}", e);
                    return BridgeResponse::error(format!("Failed to send configuration: {}", e));
                }
                log::info!(
                    "Saved {} configuration at {}",
                    self.store.selected_model(),
                    self.store.compute_price()
                );
                BridgeResponse::ok(ResponseData::Configuration { configuration })
            }

            ConfiguratorCommand::ResizeFrame { height } => match self.bridge.emit_height(height) {
                Ok(()) => BridgeResponse::ok_empty(),
                Err(e) => BridgeResponse::error(format!("Failed to resize frame: {}", e)),
            },

            ConfiguratorCommand::Ping => BridgeResponse::ok(ResponseData::Pong {
                message: "pong".to_string(),
            }),
        }
    }
}

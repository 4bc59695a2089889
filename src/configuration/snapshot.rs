//! Plain, serializable projection of a configuration

use serde::{Deserialize, Serialize};

use super::dimensions::Dimensions;
use super::material::MaterialConfig;
use super::store::ConfigurationStore;
use crate::catalog::ModelId;

/// Name reported for a material that matches no catalog preset
pub const CUSTOM_MATERIAL_NAME: &str = "Custom";

/// Material block of a snapshot: resolved name plus the raw parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialSnapshot {
    pub primary: String,
    #[serde(flatten)]
    pub config: MaterialConfig,
}

/// What gets handed to the host page when a configuration is saved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSnapshot {
    pub model_id: ModelId,
    pub model_name: String,
    pub materials: MaterialSnapshot,
    pub dimensions: Dimensions,
    /// Display names; ids the model does not offer are reported verbatim
    pub features: Vec<String>,
    pub price: u32,
}

impl ConfigurationStore {
    /// Read-only projection of the current state
    pub fn export_configuration(&self) -> ConfigurationSnapshot {
        let catalog = self.catalog();
        let model = self.selected_model();
        let material = *self.material();

        let primary = catalog
            .material_by_color(material.primary_color)
            .map_or(CUSTOM_MATERIAL_NAME, |m| m.name.as_str())
            .to_string();

        let features = self
            .enabled_features()
            .iter()
            .map(|id| {
                catalog
                    .feature(model, id)
                    .map_or_else(|| id.clone(), |f| f.name.clone())
            })
            .collect();

        ConfigurationSnapshot {
            model_id: model,
            model_name: catalog.display_name(model).to_string(),
            materials: MaterialSnapshot {
                primary,
                config: material,
            },
            dimensions: self.dimensions(),
            features,
            price: self.compute_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::configuration::Axis;

    fn store() -> ConfigurationStore {
        ConfigurationStore::new(Arc::new(Catalog::standard()), ModelId::Sofa)
    }

    #[test]
    fn test_select_then_export_is_standard_for_every_model() {
        let catalog = Catalog::standard();
        let mut s = store();
        for id in ModelId::ALL {
            s.toggle_feature("brass_feet");
            s.set_dimension(Axis::Height, 70.0).unwrap();
            assert!(s.select_model(id.as_str()));

            let snap = s.export_configuration();
            assert_eq!(snap.model_id, id);
            assert_eq!(snap.dimensions, catalog.standard_dimensions(id));
            assert!(snap.features.is_empty());
        }
    }

    #[test]
    fn test_export_resolves_names() {
        let mut s = store();
        s.set_material_by_name("Black Marble").unwrap();
        s.toggle_feature("brass_feet");
        s.toggle_feature("mystery_option");

        let snap = s.export_configuration();
        assert_eq!(snap.model_name, "Milano Sofa");
        assert_eq!(snap.materials.primary, "Black Marble");
        assert_eq!(snap.features, ["Brass Feet", "mystery_option"]);
        assert_eq!(snap.price, 12829);
    }

    #[test]
    fn test_unmatched_material_is_custom() {
        let snap = store().export_configuration();
        assert_eq!(snap.materials.primary, CUSTOM_MATERIAL_NAME);
        assert_eq!(snap.price, 8950);
    }

    #[test]
    fn test_library_material_names() {
        let mut s = store();
        s.set_material_by_name("Onyx").unwrap();
        assert_eq!(s.export_configuration().materials.primary, CUSTOM_MATERIAL_NAME);

        s.set_material_by_name("Tinted Glass").unwrap();
        let json = serde_json::to_value(s.export_configuration()).unwrap();
        assert_eq!(json["materials"]["primary"], CUSTOM_MATERIAL_NAME);
        assert!(json["materials"]["opacity"].is_number());

        // Mirror shares White Marble's color
        s.set_material_by_name("Mirror").unwrap();
        assert_eq!(s.export_configuration().materials.primary, "White Marble");
    }

    #[test]
    fn test_json_shape() {
        let mut s = store();
        s.set_material_by_name("Brass").unwrap();
        let json = serde_json::to_value(s.export_configuration()).unwrap();

        assert_eq!(json["modelId"], "sofa");
        assert_eq!(json["modelName"], "Milano Sofa");
        assert_eq!(json["materials"]["primary"], "Brass");
        assert_eq!(json["materials"]["primaryColor"], "#D4AC0D");
        assert_eq!(json["materials"]["metalColor"], "#D4AC0D");
        assert_eq!(json["dimensions"]["width"], 220.0);
        assert_eq!(json["price"], 10740);
        assert!(json["features"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_reads_back() {
        let snap = store().export_configuration();
        let json = serde_json::to_string(&snap).unwrap();
        let back: ConfigurationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}

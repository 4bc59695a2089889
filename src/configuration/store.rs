//! The single source of truth for the in-progress configuration

use std::sync::Arc;

use glam::Vec3;

use super::bounded::Unit;
use super::dimensions::{Axis, DimensionBounds, Dimensions};
use super::environment::{EnvironmentSettings, EnvironmentUpdate};
use super::material::MaterialConfig;
use crate::catalog::{Catalog, Color, FeatureSpec, MaterialOption, ModelId};
use crate::core::ConfigError;

/// Holds the user's selections and derives price and snapshot from them.
///
/// The only coupling between fields: selecting a model resets the dimensions
/// to that model's standard size and clears the enabled features.
#[derive(Clone, Debug)]
pub struct ConfigurationStore {
    catalog: Arc<Catalog>,
    selected_model: ModelId,
    material: MaterialConfig,
    dimensions: Dimensions,
    /// Insertion-ordered; may hold ids the current model does not offer
    enabled_features: Vec<String>,
    environment: EnvironmentSettings,
}

impl ConfigurationStore {
    /// Create a store positioned on `initial_model` with its standard size
    pub fn new(catalog: Arc<Catalog>, initial_model: ModelId) -> Self {
        let dimensions = catalog.standard_dimensions(initial_model);
        Self {
            catalog,
            selected_model: initial_model,
            material: MaterialConfig::default(),
            dimensions,
            enabled_features: Vec::new(),
            environment: EnvironmentSettings::default(),
        }
    }

    /// Select a model by wire identifier.
    ///
    /// Unknown identifiers are ignored and `false` is returned.
    pub fn select_model(&mut self, model_id: &str) -> bool {
        match model_id.parse::<ModelId>() {
            Ok(id) => {
                self.select(id);
                true
            }
            Err(e) => {
                log::debug!("Ignoring model selection: {}", e);
                false
            }
        }
    }

    /// Select a known model
    pub fn select(&mut self, id: ModelId) {
        self.selected_model = id;
        self.dimensions = self.catalog.standard_dimensions(id);
        self.enabled_features.clear();
        log::debug!("Selected model {}", id);
    }

    /// Apply a material preset, filling unset fields with defaults
    pub fn set_material(&mut self, preset: &MaterialOption) {
        self.material = MaterialConfig::from_preset(preset);
    }

    /// Apply a catalog material by display name; priced options and library
    /// presets are both accepted
    pub fn set_material_by_name(&mut self, name: &str) -> Result<(), ConfigError> {
        let catalog = Arc::clone(&self.catalog);
        let preset = catalog
            .material_by_name(name)
            .ok_or_else(|| ConfigError::UnknownMaterial(name.to_string()))?;
        self.set_material(preset);
        Ok(())
    }

    pub fn set_metalness(&mut self, metalness: Unit) {
        self.material.metalness = metalness;
    }

    pub fn set_roughness(&mut self, roughness: Unit) {
        self.material.roughness = roughness;
    }

    /// Set a custom primary color. A color no preset uses prices as "Custom".
    pub fn set_primary_color(&mut self, color: Color) {
        self.material.primary_color = color;
    }

    /// Set one dimension, clamped to the model's customizable range.
    ///
    /// Returns the value actually stored. Non-finite and non-positive values
    /// are rejected and leave the dimensions untouched.
    pub fn set_dimension(&mut self, axis: Axis, value: f32) -> Result<f32, ConfigError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidDimension { axis, value });
        }
        let applied = self.dimension_bounds(axis).clamp(value);
        self.dimensions.set(axis, applied);
        Ok(applied)
    }

    /// Range `axis` may be set within for the current model
    pub fn dimension_bounds(&self, axis: Axis) -> DimensionBounds {
        DimensionBounds::for_axis(&self.standard_dimensions(), axis)
    }

    /// Toggle a feature; returns whether it is now enabled.
    ///
    /// Ids the model does not offer are accepted but never priced.
    pub fn toggle_feature(&mut self, feature_id: &str) -> bool {
        if let Some(pos) = self.enabled_features.iter().position(|f| f == feature_id) {
            self.enabled_features.remove(pos);
            false
        } else {
            self.enabled_features.push(feature_id.to_string());
            true
        }
    }

    /// Shallow merge into the environment settings
    pub fn set_environment(&mut self, update: EnvironmentUpdate) {
        self.environment.apply(update);
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn selected_model(&self) -> ModelId {
        self.selected_model
    }

    pub fn material(&self) -> &MaterialConfig {
        &self.material
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn enabled_features(&self) -> &[String] {
        &self.enabled_features
    }

    pub fn is_feature_enabled(&self, feature_id: &str) -> bool {
        self.enabled_features.iter().any(|f| f == feature_id)
    }

    pub fn environment(&self) -> &EnvironmentSettings {
        &self.environment
    }

    /// Standard size of the selected model
    pub fn standard_dimensions(&self) -> Dimensions {
        self.catalog.standard_dimensions(self.selected_model)
    }

    /// Whether any dimension differs from the standard size
    pub fn is_custom_size(&self) -> bool {
        self.dimensions != self.standard_dimensions()
    }

    /// Features the selected model offers
    pub fn available_features(&self) -> &[FeatureSpec] {
        self.catalog.features(self.selected_model)
    }

    /// Asset path of the selected model, if catalogued
    pub fn model_path(&self) -> Option<&str> {
        self.catalog
            .model(self.selected_model)
            .map(|m| m.model_path.as_str())
    }

    /// Scale to apply to the rendered model (x = width, y = height, z = depth),
    /// one unit per metre
    pub fn viewer_scale(&self) -> Vec3 {
        Vec3::new(
            self.dimensions.width / 100.0,
            self.dimensions.height / 100.0,
            self.dimensions.depth / 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EnvironmentPreset;

    fn store() -> ConfigurationStore {
        ConfigurationStore::new(Arc::new(Catalog::standard()), ModelId::Sofa)
    }

    #[test]
    fn test_starts_on_standard_size() {
        let s = store();
        assert_eq!(s.selected_model(), ModelId::Sofa);
        assert_eq!(s.dimensions(), Dimensions::new(220.0, 95.0, 85.0));
        assert!(!s.is_custom_size());
        assert!(s.enabled_features().is_empty());
    }

    #[test]
    fn test_select_model_resets_size_and_features() {
        let mut s = store();
        s.set_dimension(Axis::Width, 200.0).unwrap();
        s.toggle_feature("brass_feet");

        assert!(s.select_model("bookshelf"));
        assert_eq!(s.selected_model(), ModelId::Bookshelf);
        assert_eq!(s.dimensions(), Dimensions::new(180.0, 45.0, 240.0));
        assert!(s.enabled_features().is_empty());
    }

    #[test]
    fn test_reselecting_same_model_still_resets() {
        let mut s = store();
        s.toggle_feature("usb_charger");
        assert!(s.select_model("sofa"));
        assert!(s.enabled_features().is_empty());
    }

    #[test]
    fn test_unknown_model_is_ignored() {
        let mut s = store();
        s.toggle_feature("brass_feet");
        s.set_dimension(Axis::Depth, 90.0).unwrap();

        assert!(!s.select_model("ottoman"));
        assert_eq!(s.selected_model(), ModelId::Sofa);
        assert_eq!(s.dimensions().depth, 90.0);
        assert_eq!(s.enabled_features(), ["brass_feet"]);
    }

    #[test]
    fn test_model_missing_from_catalog_uses_fallback_size() {
        let mut catalog = Catalog::standard();
        catalog.models.retain(|m| m.id != ModelId::DiningChair);
        let mut s = ConfigurationStore::new(Arc::new(catalog), ModelId::Sofa);

        assert!(s.select_model("diningChair"));
        assert_eq!(s.dimensions(), crate::catalog::FALLBACK_DIMENSIONS);
        assert!(s.model_path().is_none());
        assert!(s.available_features().is_empty());
    }

    #[test]
    fn test_set_material_applies_defaults() {
        let mut s = store();
        s.set_material_by_name("White Marble").unwrap();
        let m = s.material();
        assert_eq!(m.primary_color.to_string(), "#ECEFF1");
        assert_eq!(m.secondary_color, m.primary_color);
        assert_eq!(m.metalness.get(), 0.0);
        assert_eq!(m.roughness.get(), 0.2);

        assert_eq!(
            s.set_material_by_name("Plywood"),
            Err(ConfigError::UnknownMaterial("Plywood".to_string()))
        );
    }

    #[test]
    fn test_set_library_material() {
        let mut s = store();
        s.set_material_by_name("Clear Glass").unwrap();
        let m = s.material();
        assert_eq!(m.primary_color.to_string(), "#E0F7FA");
        assert_eq!(m.roughness.get(), 0.1);
        assert_eq!(m.opacity, Some(Unit::new(0.3)));

        // An opaque preset clears the previous transparency
        s.set_material_by_name("Cherry").unwrap();
        assert_eq!(s.material().opacity, None);
        assert_eq!(s.material().primary_color.to_string(), "#A1554D");
    }

    #[test]
    fn test_advanced_material_controls() {
        let mut s = store();
        s.set_metalness(Unit::from_slider(35));
        s.set_roughness(Unit::from_slider(180));
        assert_eq!(s.material().metalness.get(), 0.35);
        assert_eq!(s.material().roughness.get(), 1.0);
    }

    #[test]
    fn test_set_dimension_clamps() {
        let mut s = store();
        assert_eq!(s.set_dimension(Axis::Width, 200.0), Ok(200.0));
        let applied = s.set_dimension(Axis::Height, 500.0).unwrap();
        assert_eq!(applied, s.dimension_bounds(Axis::Height).max);
        assert_eq!(s.dimensions().height, applied);
        assert!(s.is_custom_size());
    }

    #[test]
    fn test_set_dimension_rejects_non_positive() {
        let mut s = store();
        for bad in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            assert!(s.set_dimension(Axis::Depth, bad).is_err());
        }
        assert_eq!(s.dimensions().depth, 95.0);
    }

    #[test]
    fn test_toggle_feature() {
        let mut s = store();
        assert!(s.toggle_feature("brass_feet"));
        assert!(s.toggle_feature("usb_charger"));
        assert!(s.is_feature_enabled("brass_feet"));
        assert!(!s.toggle_feature("brass_feet"));
        assert_eq!(s.enabled_features(), ["usb_charger"]);
    }

    #[test]
    fn test_toggle_unknown_feature_is_kept() {
        let mut s = store();
        assert!(s.toggle_feature("glass_doors"));
        assert_eq!(s.enabled_features(), ["glass_doors"]);
    }

    #[test]
    fn test_set_environment_merges() {
        let mut s = store();
        s.set_environment(EnvironmentUpdate {
            preset: Some(EnvironmentPreset::Night),
            ..Default::default()
        });
        assert_eq!(s.environment().preset, EnvironmentPreset::Night);
        assert_eq!(s.environment().light_intensity.get(), 1.5);
    }

    #[test]
    fn test_viewer_scale() {
        let s = store();
        let scale = s.viewer_scale();
        assert!((scale - Vec3::new(2.2, 0.85, 0.95)).length() < 1e-5);
    }
}

//! Static lookup tables: models, materials, features, textures
//!
//! The catalog is plain configuration data. [`Catalog::standard`] carries the
//! built-in tables; a replacement can be loaded from JSON.

pub mod environment;
pub mod feature;
pub mod material;
pub mod model;

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use environment::EnvironmentPreset;
pub use feature::FeatureSpec;
pub use material::{Color, MaterialGroup, MaterialOption};
pub use model::{ModelId, ModelSpec, UnknownModel};

use crate::configuration::Dimensions;

/// Base price used for a model missing from the catalog
pub const FALLBACK_BASE_PRICE: u32 = 3000;

/// Standard dimensions used for a model missing from the catalog
pub const FALLBACK_DIMENSIONS: Dimensions = Dimensions::new(100.0, 80.0, 45.0);

/// All lookup tables consumed by the configuration store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub models: Vec<ModelSpec>,
    /// Material presets, in reverse-lookup order
    pub materials: Vec<MaterialOption>,
    /// Price multiplier per material group (missing group → 1.0)
    pub group_multipliers: BTreeMap<MaterialGroup, f64>,
    /// Display-only material library, browsed by category. Entries price
    /// through `materials` by color and otherwise count as custom.
    #[serde(default)]
    pub library: Vec<MaterialOption>,
    /// Texture paths, grouped by family then name
    #[serde(default)]
    pub textures: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Look up a model record
    pub fn model(&self, id: ModelId) -> Option<&ModelSpec> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Base price, falling back to [`FALLBACK_BASE_PRICE`]
    pub fn base_price(&self, id: ModelId) -> u32 {
        self.model(id).map_or(FALLBACK_BASE_PRICE, |m| m.base_price)
    }

    /// Standard dimensions, falling back to [`FALLBACK_DIMENSIONS`]
    pub fn standard_dimensions(&self, id: ModelId) -> Dimensions {
        self.model(id).map_or(FALLBACK_DIMENSIONS, |m| m.standard_dimensions)
    }

    /// Display name, falling back to the raw identifier
    pub fn display_name(&self, id: ModelId) -> &str {
        match self.model(id) {
            Some(m) => &m.name,
            None => id.as_str(),
        }
    }

    /// Features offered for a model (empty if the model is not catalogued)
    pub fn features(&self, id: ModelId) -> &[FeatureSpec] {
        self.model(id)
            .map(|m| m.features.as_slice())
            .unwrap_or_default()
    }

    /// Find a feature of `id` by feature id
    pub fn feature(&self, id: ModelId, feature_id: &str) -> Option<&FeatureSpec> {
        self.model(id).and_then(|m| m.feature(feature_id))
    }

    /// First material whose primary color equals `color`
    pub fn material_by_color(&self, color: Color) -> Option<&MaterialOption> {
        self.materials.iter().find(|m| m.primary_color == color)
    }

    /// Material by display name, priced options first, then the library
    pub fn material_by_name(&self, name: &str) -> Option<&MaterialOption> {
        self.materials
            .iter()
            .chain(&self.library)
            .find(|m| m.name == name)
    }

    /// Library presets of one category, in catalog order
    pub fn library_category(&self, group: MaterialGroup) -> Vec<&MaterialOption> {
        self.library.iter().filter(|m| m.group == group).collect()
    }

    /// Multiplier for a group, 1.0 if the group has none
    pub fn group_multiplier(&self, group: MaterialGroup) -> f64 {
        self.group_multipliers.get(&group).copied().unwrap_or(1.0)
    }

    /// Materials grouped by family, each group in catalog order
    pub fn materials_by_group(&self) -> BTreeMap<MaterialGroup, Vec<&MaterialOption>> {
        let mut groups: BTreeMap<MaterialGroup, Vec<&MaterialOption>> = BTreeMap::new();
        for material in &self.materials {
            groups.entry(material.group).or_default().push(material);
        }
        groups
    }

    /// Model asset path per model id
    pub fn model_paths(&self) -> BTreeMap<ModelId, String> {
        self.models
            .iter()
            .map(|m| (m.id, m.model_path.clone()))
            .collect()
    }

    /// Texture paths keyed "family/name"
    pub fn texture_paths(&self) -> BTreeMap<String, String> {
        self.textures
            .iter()
            .flat_map(|(family, entries)| {
                entries
                    .iter()
                    .map(move |(name, path)| (format!("{}/{}", family, name), path.clone()))
            })
            .collect()
    }

    /// Save to a JSON file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<(), io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)
    }

    /// Load from a JSON file (sync)
    pub fn load_sync(path: &Path) -> Result<Self, io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    /// The built-in catalog
    pub fn standard() -> Self {
        let f = FeatureSpec::new;
        let models = vec![
            ModelSpec {
                id: ModelId::Sofa,
                name: "Milano Sofa".into(),
                base_price: 8950,
                standard_dimensions: Dimensions::new(220.0, 95.0, 85.0),
                model_path: "/models/milano_sofa.glb".into(),
                features: vec![
                    f("premium_cushions", "Premium Down Cushions", 499),
                    f("brass_feet", "Brass Feet", 299),
                    f("contrast_piping", "Contrast Piping", 199),
                    f("usb_charger", "USB Charging Port", 349),
                    f("lumbar_pillows", "Lumbar Support Pillows", 249),
                ],
            },
            ModelSpec {
                id: ModelId::CoffeeTable,
                name: "Vienna Coffee Table".into(),
                base_price: 5650,
                standard_dimensions: Dimensions::new(120.0, 80.0, 45.0),
                model_path: "/models/vienna_coffee_table.glb".into(),
                features: vec![
                    f("storage_drawer", "Hidden Storage Drawer", 399),
                    f("glass_inlay", "Glass Inlay", 499),
                    f("brass_details", "Brass Detail Work", 299),
                    f("matched_veining", "Book-Matched Veining", 599),
                    f("felt_lining", "Felt-Lined Base", 149),
                ],
            },
            ModelSpec {
                id: ModelId::DiningChair,
                name: "Oslo Dining Chair".into(),
                base_price: 2450,
                standard_dimensions: Dimensions::new(50.0, 55.0, 80.0),
                model_path: "/models/oslo_dining_chair.glb".into(),
                features: vec![
                    f("premium_cushion", "Premium Seat Cushion", 199),
                    f("brass_caps", "Brass Foot Caps", 149),
                    f("leather_back", "Leather Back Panel", 299),
                    f("arm_rests", "Custom Arm Rests", 249),
                    f("caning_detail", "Caning Detail", 349),
                ],
            },
            ModelSpec {
                id: ModelId::Bookshelf,
                name: "Manhattan Bookshelf".into(),
                base_price: 11200,
                standard_dimensions: Dimensions::new(180.0, 45.0, 240.0),
                model_path: "/models/manhattan_bookshelf.glb".into(),
                features: vec![
                    f("integrated_lighting", "Integrated Lighting", 899),
                    f("glass_doors", "Glass Cabinet Doors", 599),
                    f("cable_management", "Cable Management System", 249),
                    f("adjustable_shelves", "Adjustable Shelving", 349),
                    f("metal_accents", "Metal Accent Details", 399),
                ],
            },
        ];

        use MaterialGroup::*;
        let m = |name: &str, hex: u32, roughness: f32, group| {
            MaterialOption::new(name, Color::hex(hex), group).with_roughness(roughness)
        };
        let materials = vec![
            m("Walnut", 0x5D4037, 0.6, Wood),
            m("Oak", 0xA1887F, 0.5, Wood),
            m("Mahogany", 0x3E2723, 0.4, Wood),
            m("White Marble", 0xECEFF1, 0.2, Stone),
            m("Black Marble", 0x263238, 0.2, Stone),
            m("Brass", 0xD4AC0D, 0.3, Metal).with_metalness(0.7),
            m("Chrome", 0xBDBDBD, 0.1, Metal).with_metalness(0.9),
            m("Leather Black", 0x212121, 0.8, Upholstery),
            m("Leather Brown", 0x5D4037, 0.7, Upholstery),
            m("Linen", 0xEFEBE9, 0.9, Upholstery),
            m("Velvet Blue", 0x1A237E, 0.8, Upholstery),
            m("Velvet Green", 0x1B5E20, 0.8, Upholstery),
        ];

        let library = vec![
            m("Walnut", 0x5D4037, 0.6, Wood),
            m("Oak", 0xA1887F, 0.5, Wood),
            m("Maple", 0xD7CCC8, 0.4, Wood),
            m("Mahogany", 0x3E2723, 0.4, Wood),
            m("Ebony", 0x212121, 0.3, Wood),
            m("Cherry", 0xA1554D, 0.5, Wood),
            m("White Marble", 0xECEFF1, 0.2, Stone),
            m("Black Marble", 0x263238, 0.2, Stone),
            m("Travertine", 0xE0E0E0, 0.4, Stone),
            m("Granite", 0x546E7A, 0.5, Stone),
            m("Terrazzo", 0xCFD8DC, 0.6, Stone).with_multi_color(),
            m("Onyx", 0x4E342E, 0.1, Stone),
            m("Brass", 0xD4AC0D, 0.3, Metal).with_metalness(0.7),
            m("Chrome", 0xBDBDBD, 0.1, Metal).with_metalness(0.9),
            m("Copper", 0xCB6D51, 0.2, Metal).with_metalness(0.8),
            m("Brushed Steel", 0x9E9E9E, 0.4, Metal).with_metalness(0.6),
            m("Bronze", 0xCD7F32, 0.3, Metal).with_metalness(0.7),
            m("Platinum", 0xE5E4E2, 0.1, Metal).with_metalness(0.9),
            m("Leather Black", 0x212121, 0.8, Upholstery),
            m("Leather Brown", 0x5D4037, 0.7, Upholstery),
            m("Linen", 0xEFEBE9, 0.9, Upholstery),
            m("Velvet Blue", 0x1A237E, 0.8, Upholstery),
            m("Velvet Green", 0x1B5E20, 0.8, Upholstery),
            m("Cotton White", 0xFFFFFF, 0.9, Upholstery),
            m("Clear Glass", 0xE0F7FA, 0.1, Glass).with_opacity(0.3),
            m("Frosted Glass", 0xE0F7FA, 0.6, Glass).with_opacity(0.7),
            m("Tinted Glass", 0xB2DFDB, 0.1, Glass).with_opacity(0.5),
            m("Smoked Glass", 0x424242, 0.1, Glass).with_opacity(0.6),
            m("Bronze Glass", 0xA1887F, 0.1, Glass).with_opacity(0.5),
            m("Mirror", 0xECEFF1, 0.1, Glass).with_metalness(0.9),
        ];

        let group_multipliers = BTreeMap::from([
            (Wood, 1.0),
            (Stone, 1.4),
            (Metal, 1.2),
            (Upholstery, 1.1),
        ]);

        let family = |names: &[&str]| -> BTreeMap<String, String> {
            names
                .iter()
                .map(|n| (n.to_string(), format!("/textures/{}.jpg", n)))
                .collect()
        };
        let textures = BTreeMap::from([
            ("wood".to_string(), family(&["oak", "walnut", "maple", "mahogany", "ebony"])),
            ("stone".to_string(), family(&["marble", "granite", "travertine"])),
            ("metal".to_string(), family(&["brass", "chrome", "copper"])),
            ("fabric".to_string(), family(&["linen", "velvet", "leather"])),
        ]);

        Self {
            models,
            materials,
            group_multipliers,
            library,
            textures,
        }
    }
}

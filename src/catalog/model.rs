//! Furniture model identifiers and their catalog records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::feature::FeatureSpec;
use crate::configuration::Dimensions;

/// Known furniture models
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelId {
    #[default]
    Sofa,
    CoffeeTable,
    DiningChair,
    Bookshelf,
}

impl ModelId {
    /// All known models in catalog order
    pub const ALL: [ModelId; 4] = [
        ModelId::Sofa,
        ModelId::CoffeeTable,
        ModelId::DiningChair,
        ModelId::Bookshelf,
    ];

    /// Wire identifier, as used by the host page
    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Sofa => "sofa",
            ModelId::CoffeeTable => "coffeeTable",
            ModelId::DiningChair => "diningChair",
            ModelId::Bookshelf => "bookshelf",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModel(pub String);

impl fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown model '{}'", self.0)
    }
}

impl std::error::Error for UnknownModel {}

impl FromStr for ModelId {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// Catalog record for one model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    pub id: ModelId,
    /// Display name (e.g., "Milano Sofa")
    pub name: String,
    /// Base price before material and options
    pub base_price: u32,
    /// Standard (uncustomized) dimensions in centimetres
    pub standard_dimensions: Dimensions,
    /// Path of the model asset
    pub model_path: String,
    /// Optional features offered for this model
    #[serde(default)]
    pub features: Vec<FeatureSpec>,
}

impl ModelSpec {
    /// Find one of this model's features by id
    pub fn feature(&self, feature_id: &str) -> Option<&FeatureSpec> {
        self.features.iter().find(|f| f.id == feature_id)
    }
}
